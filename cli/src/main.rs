mod command;

use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use kagie::{render_gate, render_locked, GateAction, GateHooks, GateWidget};
use kagie_core::{CellId, GatePhase, ImageRef, PuzzleSpec, TileId};

use command::{parse_command, CommandError, PlayCommand};

#[derive(Parser)]
#[command(name = "kagie-cli", version, about = "Terminal host for the kagie puzzle gate")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GridArgs {
    #[arg(long, default_value_t = 3)]
    rows: u32,
    #[arg(long, default_value_t = 3)]
    cols: u32,
    #[arg(long, default_value_t = 4)]
    missing: usize,
    #[arg(long)]
    seed: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    label: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    Demo {
        #[command(flatten)]
        grid: GridArgs,
    },
    Play {
        #[command(flatten)]
        grid: GridArgs,
    },
    Svg {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo { grid } => run_demo(&grid)?,
        Commands::Play { grid } => run_play(&grid)?,
        Commands::Svg { grid, out } => {
            let widget = build_widget(&grid)?;
            export_svg(&widget, &out)?;
        }
    }

    Ok(())
}

fn build_widget(args: &GridArgs) -> Result<Rc<GateWidget>, Box<dyn std::error::Error>> {
    let image = match args.image.as_deref() {
        Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
            ImageRef::External {
                url: raw.to_string(),
            }
        }
        Some(raw) => ImageRef::BuiltIn {
            slug: raw.to_string(),
        },
        None => ImageRef::BuiltIn {
            slug: "puzzles/harbor.jpg".to_string(),
        },
    };
    let spec = PuzzleSpec {
        image,
        rows: args.rows,
        cols: args.cols,
        missing_count: args.missing,
        label: args.label.clone(),
    };
    let seed = match args.seed.as_deref() {
        Some(raw) => parse_seed_arg(raw)?,
        None => rand::random(),
    };
    Ok(GateWidget::with_seed(spec, seed))
}

fn parse_seed_arg(raw: &str) -> Result<u32, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    let value = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(hex, 16)?
    } else {
        trimmed.parse::<u32>()?
    };
    Ok(value)
}

fn print_board(widget: &GateWidget) {
    let snapshot = widget.snapshot();
    println!("moves: {}", snapshot.moves);
    for row in 0..snapshot.rows {
        let mut line = String::new();
        for col in 0..snapshot.cols {
            let cell = CellId::new(row, col);
            let index = cell.index(snapshot.cols);
            let mark = if snapshot.error_cell == Some(cell) {
                'x'
            } else if snapshot.placements[index].is_some() {
                '#'
            } else {
                '.'
            };
            line.push(mark);
            line.push(' ');
        }
        println!("{line}");
    }
}

fn print_tray(widget: &GateWidget) {
    let snapshot = widget.snapshot();
    if snapshot.tray.is_empty() {
        println!("tray is empty");
        return;
    }
    for slot in &snapshot.tray {
        let marker = if snapshot.selected == Some(slot.tile) {
            " *"
        } else {
            ""
        };
        println!(
            "  {} at ({:.2}, {:.2}) z{}{}",
            slot.tile, slot.entry.left_frac, slot.entry.top_frac, slot.entry.z_index, marker
        );
    }
}

fn export_svg(widget: &GateWidget, path: &Path) -> io::Result<()> {
    let svg = render_locked(&widget.assets(), &widget.snapshot());
    std::fs::write(path, svg)?;
    println!("wrote {}", path.display());
    Ok(())
}

fn drag_onto(widget: &GateWidget, tile: TileId, target: Option<CellId>) {
    widget.dispatch(GateAction::BeginDrag { tile });
    widget.dispatch(GateAction::DragMove {
        tile,
        x: 48.0,
        y: 48.0,
    });
    widget.dispatch(GateAction::DragEnd {
        tile,
        x: 48.0,
        y: 48.0,
        target,
    });
}

fn run_demo(args: &GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let widget = build_widget(args)?;
    widget.set_hooks(GateHooks {
        on_solved: Rc::new(|| println!(">> solved callback fired")),
    });

    println!("starting board:");
    print_board(&widget);
    print_tray(&widget);

    let unplaced: Vec<TileId> = widget.snapshot().tray.iter().map(|slot| slot.tile).collect();
    if let Some(&first) = unplaced.first() {
        let wrong = CellId::new(first.row, (first.col + 1) % widget.snapshot().cols);
        if wrong != CellId::new(first.row, first.col) {
            println!("dropping {first} on {wrong}:");
            drag_onto(&widget, first, Some(wrong));
            print_board(&widget);
        }
    }

    for tile in unplaced {
        drag_onto(&widget, tile, Some(CellId::new(tile.row, tile.col)));
    }

    let snapshot = widget.snapshot();
    println!("finished in {} moves", snapshot.moves);
    let unlocked = render_gate(
        &widget.assets(),
        &snapshot,
        "<p>the gated content appears here</p>",
    );
    println!("{unlocked}");
    Ok(())
}

const PLAY_HELP: &str = "commands:
  board            show the board
  tray             list unplaced tiles
  select R C       choose a tile for tap placement
  tap R C          drop the selected tile on a cell
  drag R C R C     drag a tile onto a cell
  toss R C         drag a tile and release it over the tray
  reset            deal a fresh puzzle
  svg PATH         export the locked view
  quit             leave";

fn run_play(args: &GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let widget = build_widget(args)?;
    widget.set_hooks(GateHooks {
        on_solved: Rc::new(|| println!(">> gate unlocked")),
    });
    let started = Instant::now();

    println!("{PLAY_HELP}");
    print_board(&widget);

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let now_ms = started.elapsed().as_secs_f64() * 1000.0;
        widget.dispatch(GateAction::Tick { now_ms });

        let parsed = match parse_command(&line) {
            Ok(parsed) => parsed,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        match parsed {
            PlayCommand::Board => print_board(&widget),
            PlayCommand::Tray => print_tray(&widget),
            PlayCommand::Select { tile } => {
                widget.dispatch(GateAction::SelectTile { tile });
                print_tray(&widget);
            }
            PlayCommand::Tap { cell } => {
                widget.dispatch(GateAction::TapCell { cell });
                print_board(&widget);
            }
            PlayCommand::Drag { tile, cell } => {
                drag_onto(&widget, tile, Some(cell));
                print_board(&widget);
            }
            PlayCommand::Toss { tile } => {
                drag_onto(&widget, tile, None);
                print_tray(&widget);
            }
            PlayCommand::Reset => {
                widget.dispatch(GateAction::Reset);
                print_board(&widget);
            }
            PlayCommand::Svg { path } => export_svg(&widget, Path::new(&path))?,
            PlayCommand::Help => println!("{PLAY_HELP}"),
            PlayCommand::Quit => break,
        }
        if widget.snapshot().phase == GatePhase::Unlocked {
            println!("solved in {} moves", widget.snapshot().moves);
            break;
        }
    }
    Ok(())
}

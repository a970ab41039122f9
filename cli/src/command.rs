use kagie_core::{CellId, TileId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum PlayCommand {
    Board,
    Tray,
    Select { tile: TileId },
    Tap { cell: CellId },
    Drag { tile: TileId, cell: CellId },
    Toss { tile: TileId },
    Reset,
    Svg { path: String },
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected}")]
    BadArity {
        command: &'static str,
        expected: &'static str,
    },
    #[error("'{0}' is not a number")]
    BadNumber(String),
}

fn parse_number(raw: &str) -> Result<u32, CommandError> {
    raw.parse::<u32>()
        .map_err(|_| CommandError::BadNumber(raw.to_string()))
}

fn parse_pair(
    command: &'static str,
    expected: &'static str,
    args: &[&str],
) -> Result<(u32, u32), CommandError> {
    if args.len() != 2 {
        return Err(CommandError::BadArity { command, expected });
    }
    Ok((parse_number(args[0])?, parse_number(args[1])?))
}

pub fn parse_command(line: &str) -> Result<PlayCommand, CommandError> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = parts.split_first() else {
        return Err(CommandError::Empty);
    };
    match head {
        "board" => Ok(PlayCommand::Board),
        "tray" => Ok(PlayCommand::Tray),
        "select" => {
            let (row, col) = parse_pair("select", "a tile row and column", args)?;
            Ok(PlayCommand::Select {
                tile: TileId::new(row, col),
            })
        }
        "tap" => {
            let (row, col) = parse_pair("tap", "a cell row and column", args)?;
            Ok(PlayCommand::Tap {
                cell: CellId::new(row, col),
            })
        }
        "drag" => {
            if args.len() != 4 {
                return Err(CommandError::BadArity {
                    command: "drag",
                    expected: "a tile row/column and a cell row/column",
                });
            }
            let tile_row = parse_number(args[0])?;
            let tile_col = parse_number(args[1])?;
            let cell_row = parse_number(args[2])?;
            let cell_col = parse_number(args[3])?;
            Ok(PlayCommand::Drag {
                tile: TileId::new(tile_row, tile_col),
                cell: CellId::new(cell_row, cell_col),
            })
        }
        "toss" => {
            let (row, col) = parse_pair("toss", "a tile row and column", args)?;
            Ok(PlayCommand::Toss {
                tile: TileId::new(row, col),
            })
        }
        "reset" => Ok(PlayCommand::Reset),
        "svg" => {
            if args.len() != 1 {
                return Err(CommandError::BadArity {
                    command: "svg",
                    expected: "an output path",
                });
            }
            Ok(PlayCommand::Svg {
                path: args[0].to_string(),
            })
        }
        "help" => Ok(PlayCommand::Help),
        "quit" | "exit" => Ok(PlayCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

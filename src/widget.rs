use std::cell::RefCell;
use std::rc::Rc;

use kagie_core::{
    validate_image_ref, Blueprint, CellId, Gate, GateEvent, GatePhase, PuzzleSpec, TileId,
    TrayBounds, TrayEntry,
};

pub const ERROR_FLASH_MS: f64 = 500.0;

pub type WidgetSubscriber = Rc<dyn Fn()>;

#[derive(Clone)]
pub struct GateHooks {
    pub on_solved: Rc<dyn Fn()>,
}

impl GateHooks {
    pub fn empty() -> Self {
        Self {
            on_solved: Rc::new(|| {}),
        }
    }
}

#[derive(Clone, Debug)]
pub enum GateAction {
    SelectTile { tile: TileId },
    ClearSelection,
    TapCell { cell: CellId },
    BeginDrag { tile: TileId },
    DragMove { tile: TileId, x: f32, y: f32 },
    DragEnd {
        tile: TileId,
        x: f32,
        y: f32,
        target: Option<CellId>,
    },
    SetTrayBounds { bounds: TrayBounds },
    Tick { now_ms: f64 },
    Reset,
}

#[derive(Clone)]
pub struct GateAssets {
    pub spec: PuzzleSpec,
    pub blueprint: Blueprint,
}

#[derive(Clone, Copy, Debug)]
pub struct TraySlot {
    pub tile: TileId,
    pub entry: TrayEntry,
}

#[derive(Clone, Debug)]
pub struct GateSnapshot {
    pub phase: GatePhase,
    pub rows: u32,
    pub cols: u32,
    pub moves: u32,
    pub selected: Option<TileId>,
    pub error_cell: Option<CellId>,
    pub solved: bool,
    pub placements: Vec<Option<TileId>>,
    pub tray: Vec<TraySlot>,
}

#[derive(Clone, Copy)]
struct ErrorStamp {
    token: u64,
    raised_ms: f64,
}

struct WidgetState {
    gate: Gate,
    now_ms: f64,
    error_stamp: Option<ErrorStamp>,
}

impl WidgetState {
    fn apply(&mut self, action: GateAction) -> bool {
        match action {
            GateAction::SelectTile { tile } => {
                self.gate.select(Some(tile));
                true
            }
            GateAction::ClearSelection => {
                self.gate.select(None);
                true
            }
            GateAction::TapCell { cell } => {
                let before = self.gate.session().error_token();
                let result = self.gate.tap_cell(cell);
                tracing::debug!(?result, cell = %cell, "tap placement");
                self.note_rejection(before);
                true
            }
            GateAction::BeginDrag { tile } => {
                self.gate.begin_drag(tile);
                true
            }
            GateAction::DragMove { tile, x, y } => {
                self.gate.update_drag(tile, (x, y));
                false
            }
            GateAction::DragEnd { tile, x, y, target } => {
                let before = self.gate.session().error_token();
                let outcome = self.gate.end_drag(tile, (x, y), target);
                tracing::debug!(?outcome, %tile, "drag finished");
                self.note_rejection(before);
                true
            }
            GateAction::SetTrayBounds { bounds } => {
                self.gate.set_tray_bounds(bounds);
                true
            }
            GateAction::Tick { now_ms } => {
                self.now_ms = now_ms;
                if let Some(stamp) = self.error_stamp {
                    if now_ms - stamp.raised_ms >= ERROR_FLASH_MS {
                        self.gate.clear_error_if(stamp.token);
                        self.error_stamp = None;
                        return true;
                    }
                }
                false
            }
            GateAction::Reset => {
                self.gate.reset(rand::random());
                self.error_stamp = None;
                tracing::debug!("gate reset");
                true
            }
        }
    }

    fn note_rejection(&mut self, before_token: u64) {
        let token = self.gate.session().error_token();
        if token != before_token {
            self.error_stamp = Some(ErrorStamp {
                token,
                raised_ms: self.now_ms,
            });
        }
    }
}

pub struct GateWidget {
    state: RefCell<WidgetState>,
    assets: Rc<GateAssets>,
    subscribers: RefCell<Vec<WidgetSubscriber>>,
    hooks: RefCell<GateHooks>,
}

impl GateWidget {
    pub fn new(spec: PuzzleSpec) -> Rc<Self> {
        Self::with_seed(spec, rand::random())
    }

    pub fn with_seed(spec: PuzzleSpec, seed: u32) -> Rc<Self> {
        if let Err(reason) = validate_image_ref(&spec.image) {
            tracing::warn!(%reason, "image reference failed validation");
        }
        let gate = Gate::new(spec, seed);
        let assets = Rc::new(GateAssets {
            spec: gate.spec().clone(),
            blueprint: gate.blueprint().clone(),
        });
        Rc::new(Self {
            state: RefCell::new(WidgetState {
                gate,
                now_ms: 0.0,
                error_stamp: None,
            }),
            assets,
            subscribers: RefCell::new(Vec::new()),
            hooks: RefCell::new(GateHooks::empty()),
        })
    }

    pub fn set_hooks(&self, hooks: GateHooks) {
        *self.hooks.borrow_mut() = hooks;
    }

    pub fn subscribe(&self, subscriber: WidgetSubscriber) {
        self.subscribers.borrow_mut().push(subscriber);
    }

    pub fn assets(&self) -> Rc<GateAssets> {
        Rc::clone(&self.assets)
    }

    pub fn dispatch(&self, action: GateAction) {
        let (changed, solved_fired) = {
            let mut state = self.state.borrow_mut();
            let changed = state.apply(action);
            let mut solved = false;
            while let Some(event) = state.gate.poll_event() {
                match event {
                    GateEvent::Solved => solved = true,
                }
            }
            (changed || solved, solved)
        };
        if solved_fired {
            tracing::info!("gate unlocked");
            let hook = self.hooks.borrow().on_solved.clone();
            (hook)();
        }
        if changed {
            self.notify();
        }
    }

    pub fn snapshot(&self) -> GateSnapshot {
        let state = self.state.borrow();
        let session = state.gate.session();
        GateSnapshot {
            phase: state.gate.phase(),
            rows: session.rows(),
            cols: session.cols(),
            moves: session.moves(),
            selected: session.selected(),
            error_cell: session.error_cell(),
            solved: session.solved(),
            placements: session.placements().to_vec(),
            tray: state
                .gate
                .tray()
                .entries_by_z()
                .into_iter()
                .map(|(tile, entry)| TraySlot { tile, entry })
                .collect(),
        }
    }

    fn notify(&self) {
        let subscribers = self.subscribers.borrow().clone();
        for subscriber in subscribers {
            (subscriber)();
        }
    }
}

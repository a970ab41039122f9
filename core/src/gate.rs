use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::blueprint::{build_blueprint, Blueprint, TileId};
use crate::cell::CellId;
use crate::image_ref::ImageRef;
use crate::rng::splitmix32;
use crate::session::{PlaceResult, Session};
use crate::tray::{TrayBounds, TrayLayout};

const MISSING_STREAM: u32 = 0x4D15_51E5;
const SCATTER_STREAM: u32 = 0x5CA7_7E12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleSpec {
    pub image: ImageRef,
    pub rows: u32,
    pub cols: u32,
    pub missing_count: usize,
    pub label: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatePhase {
    Locked,
    Unlocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateEvent {
    Solved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragOutcome {
    Placed,
    Rejected,
    ReturnedToTray,
    Ignored,
}

#[derive(Clone, Copy, Debug)]
struct DragState {
    tile: TileId,
    last_point: Option<(f32, f32)>,
}

#[derive(Clone, Debug)]
pub struct Gate {
    spec: PuzzleSpec,
    blueprint: Blueprint,
    session: Session,
    tray: TrayLayout,
    tray_bounds: TrayBounds,
    drag: Option<DragState>,
    phase: GatePhase,
    solved_notified: bool,
    events: VecDeque<GateEvent>,
}

impl Gate {
    pub fn new(spec: PuzzleSpec, seed: u32) -> Self {
        let blueprint = build_blueprint(spec.rows, spec.cols, seed);
        let (session, tray) = deal(&blueprint, spec.missing_count, seed);
        Self {
            spec,
            blueprint,
            session,
            tray,
            tray_bounds: TrayBounds::default(),
            drag: None,
            phase: GatePhase::Locked,
            solved_notified: false,
            events: VecDeque::new(),
        }
    }

    pub fn reset(&mut self, seed: u32) {
        let (session, tray) = deal(&self.blueprint, self.spec.missing_count, seed);
        self.session = session;
        self.tray = tray;
        self.drag = None;
        self.phase = GatePhase::Locked;
        self.solved_notified = false;
        self.events.clear();
    }

    pub fn select(&mut self, tile: Option<TileId>) {
        self.session.select(tile);
    }

    pub fn tap_cell(&mut self, cell: CellId) -> PlaceResult {
        let Some(tile) = self.session.selected() else {
            return PlaceResult::Ignored;
        };
        self.place(tile, cell)
    }

    pub fn place(&mut self, tile: TileId, cell: CellId) -> PlaceResult {
        let result = self.session.attempt_place(tile, cell);
        match result {
            PlaceResult::Placed => {
                self.tray.remove(tile);
                self.after_placement();
            }
            PlaceResult::Rejected => {
                let _ = self.tray.rescatter(tile);
            }
            PlaceResult::Ignored => {}
        }
        result
    }

    pub fn place_raw(&mut self, tile: TileId, raw_cell: &str) -> PlaceResult {
        match CellId::parse(raw_cell) {
            Ok(cell) => self.place(tile, cell),
            Err(_) => {
                let _ = self.tray.rescatter(tile);
                PlaceResult::Rejected
            }
        }
    }

    fn after_placement(&mut self) {
        if self.session.solved() && !self.solved_notified {
            self.solved_notified = true;
            self.phase = GatePhase::Unlocked;
            self.events.push_back(GateEvent::Solved);
        }
    }

    pub fn begin_drag(&mut self, tile: TileId) {
        if !self.session.is_missing(tile) {
            return;
        }
        self.drag = Some(DragState {
            tile,
            last_point: None,
        });
        self.tray.elevate(tile);
    }

    pub fn update_drag(&mut self, tile: TileId, point: (f32, f32)) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.tile != tile {
            return;
        }
        if point != (0.0, 0.0) {
            drag.last_point = Some(point);
        }
    }

    pub fn end_drag(
        &mut self,
        tile: TileId,
        point: (f32, f32),
        target: Option<CellId>,
    ) -> DragOutcome {
        let Some(drag) = self.drag else {
            return DragOutcome::Ignored;
        };
        if drag.tile != tile {
            return DragOutcome::Ignored;
        }
        self.drag = None;
        let effective = if point == (0.0, 0.0) {
            drag.last_point
        } else {
            Some(point)
        };
        match target {
            Some(cell) => match self.place(tile, cell) {
                PlaceResult::Placed => DragOutcome::Placed,
                PlaceResult::Rejected => DragOutcome::Rejected,
                PlaceResult::Ignored => DragOutcome::Ignored,
            },
            None => {
                let dim = self.blueprint.geometry.dimension;
                let _ = self.tray.release(tile, effective, self.tray_bounds, dim);
                DragOutcome::ReturnedToTray
            }
        }
    }

    pub fn set_tray_bounds(&mut self, bounds: TrayBounds) {
        self.tray_bounds = bounds;
    }

    pub fn clear_error_if(&mut self, token: u64) {
        self.session.clear_error_if(token);
    }

    pub fn poll_event(&mut self) -> Option<GateEvent> {
        self.events.pop_front()
    }

    pub fn spec(&self) -> &PuzzleSpec {
        &self.spec
    }

    pub fn blueprint(&self) -> &Blueprint {
        &self.blueprint
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn tray(&self) -> &TrayLayout {
        &self.tray
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn dragging(&self) -> Option<TileId> {
        self.drag.map(|drag| drag.tile)
    }
}

fn deal(blueprint: &Blueprint, missing_count: usize, seed: u32) -> (Session, TrayLayout) {
    let session = Session::initialize(blueprint, missing_count, splitmix32(seed ^ MISSING_STREAM));
    let unplaced: Vec<TileId> = blueprint
        .tile_ids()
        .into_iter()
        .filter(|tile| session.is_missing(*tile))
        .collect();
    let tray = TrayLayout::scatter(&unplaced, splitmix32(seed ^ SCATTER_STREAM));
    (session, tray)
}

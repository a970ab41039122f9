use std::collections::HashSet;

use crate::blueprint::{Blueprint, TileId};
use crate::cell::CellId;
use crate::rng::shuffle;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaceResult {
    Placed,
    Rejected,
    Ignored,
}

pub fn placements_complete(placements: &[Option<TileId>]) -> bool {
    placements.iter().all(|slot| slot.is_some())
}

#[derive(Clone, Debug)]
pub struct Session {
    rows: u32,
    cols: u32,
    placements: Vec<Option<TileId>>,
    missing: HashSet<TileId>,
    selected: Option<TileId>,
    moves: u32,
    error_cell: Option<CellId>,
    error_token: u64,
    solved: bool,
}

impl Session {
    pub fn initialize(blueprint: &Blueprint, missing_count: usize, seed: u32) -> Self {
        let total = blueprint.total_tiles();
        let wanted = missing_count.clamp(1, total);
        let mut ids = blueprint.tile_ids();
        shuffle(&mut ids, seed);
        let missing: HashSet<TileId> = ids.iter().take(wanted).copied().collect();

        let mut placements = vec![None; total];
        for tile in &blueprint.tiles {
            if !missing.contains(&tile.id) {
                placements[(tile.row * blueprint.cols + tile.col) as usize] = Some(tile.id);
            }
        }

        Self {
            rows: blueprint.rows,
            cols: blueprint.cols,
            placements,
            missing,
            selected: None,
            moves: 0,
            error_cell: None,
            error_token: 0,
            solved: false,
        }
    }

    pub fn attempt_place(&mut self, tile: TileId, cell: CellId) -> PlaceResult {
        if !self.missing.contains(&tile) {
            return PlaceResult::Ignored;
        }
        if self.placements.iter().flatten().any(|placed| *placed == tile) {
            return PlaceResult::Ignored;
        }
        if cell.row() != tile.row || cell.col() != tile.col {
            self.raise_error(cell);
            return PlaceResult::Rejected;
        }
        let index = cell.index(self.cols);
        self.placements[index] = Some(tile);
        self.missing.remove(&tile);
        self.moves += 1;
        self.selected = None;
        if !self.solved && placements_complete(&self.placements) {
            self.solved = true;
        }
        PlaceResult::Placed
    }

    pub fn attempt_place_raw(&mut self, tile: TileId, raw_cell: &str) -> PlaceResult {
        match CellId::parse(raw_cell) {
            Ok(cell) => self.attempt_place(tile, cell),
            Err(_) => PlaceResult::Rejected,
        }
    }

    pub fn select(&mut self, tile: Option<TileId>) {
        match tile {
            Some(tile) if !self.missing.contains(&tile) => {}
            other => self.selected = other,
        }
    }

    fn raise_error(&mut self, cell: CellId) {
        self.error_cell = Some(cell);
        self.error_token = self.error_token.wrapping_add(1);
    }

    pub fn clear_error_if(&mut self, token: u64) {
        if self.error_token == token {
            self.error_cell = None;
        }
    }

    pub fn is_solved(&self) -> bool {
        placements_complete(&self.placements)
    }

    pub fn solved(&self) -> bool {
        self.solved
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn placements(&self) -> &[Option<TileId>] {
        &self.placements
    }

    pub fn placement_at(&self, cell: CellId) -> Option<TileId> {
        if cell.row() >= self.rows || cell.col() >= self.cols {
            return None;
        }
        self.placements.get(cell.index(self.cols)).copied().flatten()
    }

    pub fn missing(&self) -> &HashSet<TileId> {
        &self.missing
    }

    pub fn is_missing(&self, tile: TileId) -> bool {
        self.missing.contains(&tile)
    }

    pub fn selected(&self) -> Option<TileId> {
        self.selected
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn error_cell(&self) -> Option<CellId> {
        self.error_cell
    }

    pub fn error_token(&self) -> u64 {
        self.error_token
    }
}

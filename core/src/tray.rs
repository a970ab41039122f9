use std::collections::HashMap;

use crate::blueprint::TileId;
use crate::rng::rand_range;

pub const SCATTER_MIN_FRAC: f32 = 0.05;
pub const SCATTER_MAX_FRAC: f32 = 0.95;

const AXIS_TOP: u32 = 0;
const AXIS_LEFT: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrayEntry {
    pub top_frac: f32,
    pub left_frac: f32,
    pub z_index: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrayBounds {
    pub origin_x: f32,
    pub origin_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for TrayBounds {
    fn default() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

fn scatter_salt(tile: TileId, axis: u32, bump: u32) -> u32 {
    axis.wrapping_mul(0x9E37_79B9)
        ^ tile.row.wrapping_mul(0x85EB_CA6B)
        ^ tile.col.wrapping_mul(0xC2B2_AE35)
        ^ bump.wrapping_mul(0x27D4_EB2F)
}

#[derive(Clone, Debug)]
pub struct TrayLayout {
    entries: HashMap<TileId, TrayEntry>,
    seed: u32,
    z_counter: u32,
}

impl TrayLayout {
    pub fn scatter(tile_ids: &[TileId], seed: u32) -> Self {
        let mut layout = Self {
            entries: HashMap::with_capacity(tile_ids.len()),
            seed,
            z_counter: 0,
        };
        for &tile in tile_ids {
            layout.insert_scattered(tile, 0);
        }
        layout
    }

    fn insert_scattered(&mut self, tile: TileId, bump: u32) -> TrayEntry {
        self.z_counter += 1;
        let entry = TrayEntry {
            top_frac: rand_range(
                self.seed,
                scatter_salt(tile, AXIS_TOP, bump),
                SCATTER_MIN_FRAC,
                SCATTER_MAX_FRAC,
            ),
            left_frac: rand_range(
                self.seed,
                scatter_salt(tile, AXIS_LEFT, bump),
                SCATTER_MIN_FRAC,
                SCATTER_MAX_FRAC,
            ),
            z_index: self.z_counter,
        };
        self.entries.insert(tile, entry);
        entry
    }

    pub fn rescatter(&mut self, tile: TileId) -> Option<TrayEntry> {
        if !self.entries.contains_key(&tile) {
            return None;
        }
        let bump = self.z_counter;
        Some(self.insert_scattered(tile, bump))
    }

    pub fn release(
        &mut self,
        tile: TileId,
        point: Option<(f32, f32)>,
        bounds: TrayBounds,
        tile_dim: f32,
    ) -> Option<TrayEntry> {
        if !self.entries.contains_key(&tile) {
            return None;
        }
        let entry = match point {
            Some((x, y)) => {
                let usable_w = (bounds.width - tile_dim).max(1.0);
                let usable_h = (bounds.height - tile_dim).max(1.0);
                self.z_counter += 1;
                TrayEntry {
                    left_frac: ((x - bounds.origin_x) / usable_w).clamp(0.0, 1.0),
                    top_frac: ((y - bounds.origin_y) / usable_h).clamp(0.0, 1.0),
                    z_index: self.z_counter,
                }
            }
            None => {
                let bump = self.z_counter;
                return Some(self.insert_scattered(tile, bump));
            }
        };
        self.entries.insert(tile, entry);
        Some(entry)
    }

    pub fn elevate(&mut self, tile: TileId) {
        if let Some(entry) = self.entries.get_mut(&tile) {
            self.z_counter += 1;
            entry.z_index = self.z_counter;
        }
    }

    pub fn remove(&mut self, tile: TileId) {
        let _ = self.entries.remove(&tile);
    }

    pub fn entry(&self, tile: TileId) -> Option<TrayEntry> {
        self.entries.get(&tile).copied()
    }

    pub fn contains(&self, tile: TileId) -> bool {
        self.entries.contains_key(&tile)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_by_z(&self) -> Vec<(TileId, TrayEntry)> {
        let mut entries: Vec<(TileId, TrayEntry)> =
            self.entries.iter().map(|(tile, entry)| (*tile, *entry)).collect();
        entries.sort_by_key(|(_, entry)| entry.z_index);
        entries
    }
}

use std::fmt;
use std::fmt::Write;

use crate::rng::rand_unit;

pub const BOARD_TARGET_WIDTH: f32 = 480.0;
pub const BASE_MIN: f32 = 60.0;
pub const BASE_MAX: f32 = 160.0;
pub const KNOB_RATIO: f32 = 0.25;
pub const TAB_SPAN_RATIO: f32 = 0.3;
pub const TAB_CONTROL_FACTOR: f32 = 4.0 / 3.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectorDirection {
    Intrude,
    Flat,
    Protrude,
}

impl ConnectorDirection {
    pub fn sign(self) -> i8 {
        match self {
            ConnectorDirection::Intrude => -1,
            ConnectorDirection::Flat => 0,
            ConnectorDirection::Protrude => 1,
        }
    }

    pub fn negate(self) -> Self {
        match self {
            ConnectorDirection::Intrude => ConnectorDirection::Protrude,
            ConnectorDirection::Flat => ConnectorDirection::Flat,
            ConnectorDirection::Protrude => ConnectorDirection::Intrude,
        }
    }

    pub fn is_flat(self) -> bool {
        matches!(self, ConnectorDirection::Flat)
    }

    fn coin(seed: u32, salt: u32) -> Self {
        if rand_unit(seed, salt) < 0.5 {
            ConnectorDirection::Protrude
        } else {
            ConnectorDirection::Intrude
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Top => Side::Bottom,
            Side::Right => Side::Left,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConnectorSet {
    pub top: ConnectorDirection,
    pub right: ConnectorDirection,
    pub bottom: ConnectorDirection,
    pub left: ConnectorDirection,
}

impl ConnectorSet {
    pub fn get(&self, side: Side) -> ConnectorDirection {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId {
    pub row: u32,
    pub col: u32,
}

impl TileId {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile-{}-{}", self.row, self.col)
    }
}

#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub row: u32,
    pub col: u32,
    pub connectors: ConnectorSet,
    pub outline: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub base: f32,
    pub knob: f32,
    pub offset: f32,
    pub dimension: f32,
}

impl Geometry {
    pub fn for_board(target_width: f32, cols: u32) -> Self {
        let cols = cols.max(1) as f32;
        let base = (target_width / cols).clamp(BASE_MIN, BASE_MAX);
        let knob = base * KNOB_RATIO;
        let offset = knob;
        Self {
            base,
            knob,
            offset,
            dimension: base + 2.0 * offset,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Blueprint {
    pub rows: u32,
    pub cols: u32,
    pub geometry: Geometry,
    pub board_width: f32,
    pub board_height: f32,
    pub tiles: Vec<Tile>,
}

impl Blueprint {
    pub fn tile_at(&self, row: u32, col: u32) -> Option<&Tile> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.tiles.get((row * self.cols + col) as usize)
    }

    pub fn tile_by_id(&self, id: TileId) -> Option<&Tile> {
        self.tile_at(id.row, id.col)
    }

    pub fn tile_ids(&self) -> Vec<TileId> {
        self.tiles.iter().map(|tile| tile.id).collect()
    }

    pub fn total_tiles(&self) -> usize {
        self.tiles.len()
    }
}

fn connector_salt(orientation: u32, row: u32, col: u32) -> u32 {
    orientation.wrapping_mul(0x9E37_79B9)
        ^ row.wrapping_mul(0x85EB_CA6B)
        ^ col.wrapping_mul(0xC2B2_AE35)
}

pub fn build_blueprint(rows: u32, cols: u32, seed: u32) -> Blueprint {
    let rows = rows.max(1);
    let cols = cols.max(1);
    let geometry = Geometry::for_board(BOARD_TARGET_WIDTH, cols);

    let mut tiles = Vec::with_capacity((rows * cols) as usize);
    let mut prev_bottom = vec![ConnectorDirection::Flat; cols as usize];
    for row in 0..rows {
        let mut left_neighbor_right = ConnectorDirection::Flat;
        for col in 0..cols {
            let top = if row == 0 {
                ConnectorDirection::Flat
            } else {
                prev_bottom[col as usize].negate()
            };
            let left = if col == 0 {
                ConnectorDirection::Flat
            } else {
                left_neighbor_right.negate()
            };
            let right = if col + 1 == cols {
                ConnectorDirection::Flat
            } else {
                ConnectorDirection::coin(seed, connector_salt(1, row, col))
            };
            let bottom = if row + 1 == rows {
                ConnectorDirection::Flat
            } else {
                ConnectorDirection::coin(seed, connector_salt(0, row, col))
            };
            let connectors = ConnectorSet {
                top,
                right,
                bottom,
                left,
            };
            let outline = tile_outline(&connectors, &geometry);
            tiles.push(Tile {
                id: TileId::new(row, col),
                row,
                col,
                connectors,
                outline,
            });
            prev_bottom[col as usize] = bottom;
            left_neighbor_right = right;
        }
    }

    Blueprint {
        rows,
        cols,
        geometry,
        board_width: cols as f32 * geometry.base,
        board_height: rows as f32 * geometry.base,
        tiles,
    }
}

pub fn fmt_f32(value: f32) -> String {
    format!("{:.3}", value)
}

fn append_edge(
    path: &mut String,
    from: (f32, f32),
    to: (f32, f32),
    outward: (f32, f32),
    direction: ConnectorDirection,
    knob: f32,
) {
    if direction.is_flat() {
        let _ = write!(path, " L {} {}", fmt_f32(to.0), fmt_f32(to.1));
        return;
    }
    let span = (to.0 - from.0, to.1 - from.1);
    let neck_a = 0.5 - TAB_SPAN_RATIO * 0.5;
    let neck_b = 0.5 + TAB_SPAN_RATIO * 0.5;
    let neck_in = (from.0 + span.0 * neck_a, from.1 + span.1 * neck_a);
    let neck_out = (from.0 + span.0 * neck_b, from.1 + span.1 * neck_b);
    let depth = knob * direction.sign() as f32 * TAB_CONTROL_FACTOR;
    let lift = (outward.0 * depth, outward.1 * depth);
    let c1 = (neck_in.0 + lift.0, neck_in.1 + lift.1);
    let c2 = (neck_out.0 + lift.0, neck_out.1 + lift.1);
    let _ = write!(path, " L {} {}", fmt_f32(neck_in.0), fmt_f32(neck_in.1));
    let _ = write!(
        path,
        " C {} {} {} {} {} {}",
        fmt_f32(c1.0),
        fmt_f32(c1.1),
        fmt_f32(c2.0),
        fmt_f32(c2.1),
        fmt_f32(neck_out.0),
        fmt_f32(neck_out.1)
    );
    let _ = write!(path, " L {} {}", fmt_f32(to.0), fmt_f32(to.1));
}

pub fn tile_outline(connectors: &ConnectorSet, geometry: &Geometry) -> String {
    let near = geometry.offset;
    let far = geometry.offset + geometry.base;
    let tl = (near, near);
    let tr = (far, near);
    let br = (far, far);
    let bl = (near, far);

    let mut path = String::new();
    let _ = write!(path, "M {} {}", fmt_f32(tl.0), fmt_f32(tl.1));
    append_edge(&mut path, tl, tr, (0.0, -1.0), connectors.top, geometry.knob);
    append_edge(&mut path, tr, br, (1.0, 0.0), connectors.right, geometry.knob);
    append_edge(&mut path, br, bl, (0.0, 1.0), connectors.bottom, geometry.knob);
    append_edge(&mut path, bl, tl, (-1.0, 0.0), connectors.left, geometry.knob);
    path.push_str(" Z");
    path
}

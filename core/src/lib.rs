pub mod blueprint;
pub mod cell;
pub mod gate;
pub mod image_ref;
pub mod rng;
pub mod session;
pub mod tray;

pub use blueprint::{
    build_blueprint, fmt_f32, tile_outline, Blueprint, ConnectorDirection, ConnectorSet, Geometry,
    Side, Tile, TileId,
};
pub use cell::{CellId, CellIdError, CELL_ID_PREFIX};
pub use gate::{DragOutcome, Gate, GateEvent, GatePhase, PuzzleSpec};
pub use image_ref::{validate_image_ref, ImageRef};
pub use session::{placements_complete, PlaceResult, Session};
pub use tray::{TrayBounds, TrayEntry, TrayLayout};

use std::fmt::Write;

use kagie_core::{fmt_f32, CellId, GatePhase, TileId};

use crate::widget::{GateAssets, GateSnapshot};

pub const BOARD_MARGIN: f32 = 16.0;
pub const HUD_HEIGHT: f32 = 28.0;
pub const TRAY_GAP: f32 = 24.0;
pub const TRAY_WIDTH_RATIO: f32 = 0.6;

pub fn render_gate(assets: &GateAssets, snapshot: &GateSnapshot, unlocked_content: &str) -> String {
    match snapshot.phase {
        GatePhase::Unlocked => unlocked_content.to_string(),
        GatePhase::Locked => render_locked(assets, snapshot),
    }
}

fn xml_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn append_tile_image(
    svg: &mut String,
    assets: &GateAssets,
    tile: TileId,
    origin_x: f32,
    origin_y: f32,
    selected: bool,
) {
    let geometry = assets.blueprint.geometry;
    let board_w = assets.blueprint.board_width;
    let board_h = assets.blueprint.board_height;
    let image_x = geometry.offset - tile.col as f32 * geometry.base;
    let image_y = geometry.offset - tile.row as f32 * geometry.base;
    let class = if selected { "tile selected" } else { "tile" };
    let _ = write!(
        svg,
        "<g class=\"{}\" data-tile=\"{}\" transform=\"translate({} {})\">",
        class,
        tile,
        fmt_f32(origin_x),
        fmt_f32(origin_y)
    );
    let _ = write!(
        svg,
        "<g clip-path=\"url(#clip-{})\"><image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/></g>",
        tile,
        xml_escape(assets.spec.image.source()),
        fmt_f32(image_x),
        fmt_f32(image_y),
        fmt_f32(board_w),
        fmt_f32(board_h)
    );
    if let Some(outline) = assets
        .blueprint
        .tile_by_id(tile)
        .map(|tile| tile.outline.as_str())
    {
        let _ = write!(svg, "<path class=\"tile-edge\" d=\"{}\"/>", outline);
    }
    svg.push_str("</g>");
}

pub fn render_locked(assets: &GateAssets, snapshot: &GateSnapshot) -> String {
    let geometry = assets.blueprint.geometry;
    let base = geometry.base;
    let board_w = assets.blueprint.board_width;
    let board_h = assets.blueprint.board_height;
    let board_x = BOARD_MARGIN;
    let board_y = BOARD_MARGIN + HUD_HEIGHT;
    let tray_x = board_x + board_w + TRAY_GAP;
    let tray_w = board_w * TRAY_WIDTH_RATIO;
    let tray_h = board_h;
    let svg_w = tray_x + tray_w + BOARD_MARGIN;
    let svg_h = board_y + board_h + BOARD_MARGIN;

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        fmt_f32(svg_w),
        fmt_f32(svg_h),
        fmt_f32(svg_w),
        fmt_f32(svg_h)
    );

    svg.push_str("<defs>");
    for tile in &assets.blueprint.tiles {
        let _ = write!(
            svg,
            "<clipPath id=\"clip-{}\"><path d=\"{}\"/></clipPath>",
            tile.id, tile.outline
        );
    }
    svg.push_str("</defs>");

    if let Some(label) = assets.spec.label.as_deref() {
        let _ = write!(
            svg,
            "<text class=\"gate-label\" x=\"{}\" y=\"{}\">{}</text>",
            fmt_f32(board_x),
            fmt_f32(BOARD_MARGIN + 12.0),
            xml_escape(label)
        );
    }
    let _ = write!(
        svg,
        "<text class=\"moves\" x=\"{}\" y=\"{}\">Moves: {}</text>",
        fmt_f32(tray_x),
        fmt_f32(BOARD_MARGIN + 12.0),
        snapshot.moves
    );
    let _ = write!(
        svg,
        "<text class=\"reset-control\" data-action=\"reset\" x=\"{}\" y=\"{}\">Reset</text>",
        fmt_f32(tray_x + tray_w - 44.0),
        fmt_f32(BOARD_MARGIN + 12.0)
    );

    let _ = write!(
        svg,
        "<g class=\"board\" data-rows=\"{}\" data-cols=\"{}\">",
        snapshot.rows, snapshot.cols
    );
    for row in 0..snapshot.rows {
        for col in 0..snapshot.cols {
            let cell = CellId::new(row, col);
            let class = if snapshot.error_cell == Some(cell) {
                "slot slot-error"
            } else {
                "slot"
            };
            let _ = write!(
                svg,
                "<rect class=\"{}\" data-cell=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
                class,
                cell,
                fmt_f32(board_x + col as f32 * base),
                fmt_f32(board_y + row as f32 * base),
                fmt_f32(base),
                fmt_f32(base)
            );
        }
    }
    for slot in snapshot.placements.iter().flatten() {
        let origin_x = board_x + slot.col as f32 * base - geometry.offset;
        let origin_y = board_y + slot.row as f32 * base - geometry.offset;
        append_tile_image(&mut svg, assets, *slot, origin_x, origin_y, false);
    }
    svg.push_str("</g>");

    let _ = write!(
        svg,
        "<g class=\"tray\"><rect class=\"tray-backdrop\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>",
        fmt_f32(tray_x),
        fmt_f32(board_y),
        fmt_f32(tray_w),
        fmt_f32(tray_h)
    );
    for slot in &snapshot.tray {
        let origin_x = tray_x + slot.entry.left_frac * (tray_w - geometry.dimension).max(0.0);
        let origin_y = board_y + slot.entry.top_frac * (tray_h - geometry.dimension).max(0.0);
        let selected = snapshot.selected == Some(slot.tile);
        append_tile_image(&mut svg, assets, slot.tile, origin_x, origin_y, selected);
    }
    svg.push_str("</g>");

    svg.push_str("</svg>");
    svg
}

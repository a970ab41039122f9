use kagie_core::{
    CellId, DragOutcome, Gate, GateEvent, GatePhase, ImageRef, PlaceResult, PuzzleSpec,
    TileId, TrayBounds,
};

fn spec(rows: u32, cols: u32, missing_count: usize) -> PuzzleSpec {
    PuzzleSpec {
        image: ImageRef::BuiltIn {
            slug: "harbor".to_string(),
        },
        rows,
        cols,
        missing_count,
        label: Some("unlock me".to_string()),
    }
}

fn drain_solved(gate: &mut Gate) -> usize {
    let mut count = 0;
    while let Some(event) = gate.poll_event() {
        match event {
            GateEvent::Solved => count += 1,
        }
    }
    count
}

#[test]
fn full_solve_unlocks_and_notifies_once() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    assert_eq!(gate.phase(), GatePhase::Locked);
    assert_eq!(gate.tray().len(), 4);

    let order = [(1, 1), (0, 0), (1, 0), (0, 1)];
    let mut solved_events = 0;
    for (row, col) in order {
        let result = gate.place(TileId::new(row, col), CellId::new(row, col));
        assert_eq!(result, PlaceResult::Placed);
        solved_events += drain_solved(&mut gate);
    }

    assert_eq!(solved_events, 1);
    assert_eq!(gate.phase(), GatePhase::Unlocked);
    assert!(gate.session().is_solved());
    assert!(gate.tray().is_empty());

    assert!(gate.session().is_solved());
    assert_eq!(drain_solved(&mut gate), 0);

    let result = gate.place(TileId::new(0, 0), CellId::new(0, 0));
    assert_eq!(result, PlaceResult::Ignored);
    assert_eq!(drain_solved(&mut gate), 0);
}

#[test]
fn rejected_placement_rescatters_the_tile() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(0, 0);
    let before = gate.tray().entry(tile).expect("tray entry");

    let result = gate.place(tile, CellId::new(0, 1));
    assert_eq!(result, PlaceResult::Rejected);
    assert_eq!(gate.session().error_cell(), Some(CellId::new(0, 1)));

    let after = gate.tray().entry(tile).expect("tray entry");
    assert!(after.z_index > before.z_index);
    assert_eq!(gate.tray().len(), 4);
}

#[test]
fn drag_release_outside_targets_returns_to_tray() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(1, 0);
    let bounds = TrayBounds {
        origin_x: 0.0,
        origin_y: 0.0,
        width: 500.0,
        height: 400.0,
    };
    gate.set_tray_bounds(bounds);

    gate.begin_drag(tile);
    assert_eq!(gate.dragging(), Some(tile));
    gate.update_drag(tile, (120.0, 80.0));
    gate.update_drag(tile, (0.0, 0.0));

    let outcome = gate.end_drag(tile, (0.0, 0.0), None);
    assert_eq!(outcome, DragOutcome::ReturnedToTray);
    assert_eq!(gate.dragging(), None);

    let dim = gate.blueprint().geometry.dimension;
    let entry = gate.tray().entry(tile).expect("tray entry");
    let expected_left = (120.0 / (bounds.width - dim).max(1.0)).clamp(0.0, 1.0);
    let expected_top = (80.0 / (bounds.height - dim).max(1.0)).clamp(0.0, 1.0);
    assert!((entry.left_frac - expected_left).abs() < 1e-4);
    assert!((entry.top_frac - expected_top).abs() < 1e-4);
}

#[test]
fn drag_onto_the_matching_cell_places() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(0, 1);

    gate.begin_drag(tile);
    gate.update_drag(tile, (42.0, 17.0));
    let outcome = gate.end_drag(tile, (44.0, 19.0), Some(CellId::new(0, 1)));
    assert_eq!(outcome, DragOutcome::Placed);
    assert!(!gate.tray().contains(tile));
    assert_eq!(gate.session().placement_at(CellId::new(0, 1)), Some(tile));
}

#[test]
fn stale_drag_events_are_ignored() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(0, 0);

    let outcome = gate.end_drag(tile, (10.0, 10.0), Some(CellId::new(0, 0)));
    assert_eq!(outcome, DragOutcome::Ignored);
    assert!(gate.session().is_missing(tile));

    gate.place(tile, CellId::new(0, 0));
    gate.begin_drag(tile);
    assert_eq!(gate.dragging(), None);
}

#[test]
fn end_drag_for_another_tile_keeps_the_drag_alive() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let dragged = TileId::new(0, 0);
    let other = TileId::new(0, 1);

    gate.begin_drag(dragged);
    let outcome = gate.end_drag(other, (10.0, 10.0), None);
    assert_eq!(outcome, DragOutcome::Ignored);
    assert_eq!(gate.dragging(), Some(dragged));
}

#[test]
fn tap_path_funnels_through_the_same_placement() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(1, 1);

    assert_eq!(gate.tap_cell(CellId::new(1, 1)), PlaceResult::Ignored);

    gate.select(Some(tile));
    assert_eq!(gate.tap_cell(CellId::new(0, 0)), PlaceResult::Rejected);
    assert_eq!(gate.session().selected(), Some(tile));

    assert_eq!(gate.tap_cell(CellId::new(1, 1)), PlaceResult::Placed);
    assert_eq!(gate.session().selected(), None);
}

#[test]
fn reset_rearms_the_gate_and_reuses_the_blueprint() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let outlines: Vec<String> = gate
        .blueprint()
        .tiles
        .iter()
        .map(|tile| tile.outline.clone())
        .collect();

    for row in 0..2 {
        for col in 0..2 {
            gate.place(TileId::new(row, col), CellId::new(row, col));
        }
    }
    assert_eq!(gate.phase(), GatePhase::Unlocked);

    gate.reset(99);
    assert_eq!(gate.phase(), GatePhase::Locked);
    assert_eq!(gate.session().missing().len(), 4);
    assert_eq!(gate.session().moves(), 0);
    assert_eq!(gate.tray().len(), 4);
    assert_eq!(gate.poll_event(), None);

    let after: Vec<String> = gate
        .blueprint()
        .tiles
        .iter()
        .map(|tile| tile.outline.clone())
        .collect();
    assert_eq!(outlines, after);
}

#[test]
fn same_seed_gates_deal_identically() {
    let first = Gate::new(spec(3, 3, 5), 21);
    let second = Gate::new(spec(3, 3, 5), 21);
    assert_eq!(first.session().missing(), second.session().missing());
    for tile in first.session().missing() {
        assert_eq!(first.tray().entry(*tile), second.tray().entry(*tile));
    }
}

#[test]
fn gate_clamps_missing_count() {
    let gate = Gate::new(spec(2, 2, 0), 4);
    assert_eq!(gate.session().missing().len(), 1);

    let gate = Gate::new(spec(2, 2, 50), 4);
    assert_eq!(gate.session().missing().len(), 4);
}

#[test]
fn malformed_drop_identifiers_reject_without_flagging() {
    let mut gate = Gate::new(spec(2, 2, 4), 8);
    let tile = TileId::new(0, 0);
    assert_eq!(gate.place_raw(tile, "cell-??"), PlaceResult::Rejected);
    assert!(gate.session().error_cell().is_none());
    assert!(gate.session().is_missing(tile));
    assert_eq!(gate.place_raw(tile, "cell-0-0"), PlaceResult::Placed);
}

use kagie_core::{build_blueprint, CellId, PlaceResult, Session, TileId};

fn all_missing_session(rows: u32, cols: u32) -> Session {
    let blueprint = build_blueprint(rows, cols, 0x5EED_0001);
    Session::initialize(&blueprint, (rows * cols) as usize, 77)
}

#[test]
fn wrong_cells_never_mutate_placements() {
    let mut session = all_missing_session(3, 3);
    let tile = TileId::new(1, 1);
    for row in 0..3 {
        for col in 0..3 {
            if (row, col) == (1, 1) {
                continue;
            }
            let cell = CellId::new(row, col);
            assert_eq!(session.attempt_place(tile, cell), PlaceResult::Rejected);
            assert!(session.placements().iter().all(|slot| slot.is_none()));
        }
    }
    assert_eq!(session.moves(), 0);
    assert_eq!(
        session.attempt_place(tile, CellId::new(1, 1)),
        PlaceResult::Placed
    );
}

#[test]
fn replacing_a_placed_tile_is_a_silent_no_op() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(0, 1);
    let cell = CellId::new(0, 1);
    assert_eq!(session.attempt_place(tile, cell), PlaceResult::Placed);
    assert_eq!(session.moves(), 1);

    assert_eq!(session.attempt_place(tile, cell), PlaceResult::Ignored);
    assert_eq!(session.moves(), 1);
    assert_eq!(session.placement_at(cell), Some(tile));
    assert!(session.error_cell().is_none());
}

#[test]
fn solved_is_monotone() {
    let mut session = all_missing_session(2, 2);
    for row in 0..2 {
        for col in 0..2 {
            let result = session.attempt_place(TileId::new(row, col), CellId::new(row, col));
            assert_eq!(result, PlaceResult::Placed);
        }
    }
    assert!(session.is_solved());
    assert!(session.solved());

    for row in 0..2 {
        for col in 0..2 {
            let result = session.attempt_place(TileId::new(row, col), CellId::new(1, 0));
            assert_eq!(result, PlaceResult::Ignored);
        }
    }
    assert!(session.is_solved());
    assert!(session.solved());
}

#[test]
fn three_by_three_with_five_missing() {
    let blueprint = build_blueprint(3, 3, 0x5EED_0001);
    let mut session = Session::initialize(&blueprint, 5, 123);

    assert_eq!(session.missing().len(), 5);
    let prefilled = session
        .placements()
        .iter()
        .filter(|slot| slot.is_some())
        .count();
    assert_eq!(prefilled, 4);

    let tile = *session.missing().iter().next().expect("a missing tile");
    let cell = CellId::new(tile.row, tile.col);
    assert_eq!(session.attempt_place(tile, cell), PlaceResult::Placed);
    assert_eq!(session.missing().len(), 4);
    assert_eq!(session.moves(), 1);

    assert_eq!(session.attempt_place(tile, cell), PlaceResult::Ignored);
    assert_eq!(session.missing().len(), 4);
    assert_eq!(session.moves(), 1);
}

#[test]
fn wrong_slot_flags_the_target_cell() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(0, 0);
    let target = CellId::new(0, 1);

    assert_eq!(session.attempt_place(tile, target), PlaceResult::Rejected);
    assert_eq!(session.error_cell(), Some(target));
    assert_eq!(session.placement_at(target), None);
    assert!(session.is_missing(tile));
}

#[test]
fn missing_count_is_clamped() {
    let blueprint = build_blueprint(2, 2, 5);
    let low = Session::initialize(&blueprint, 0, 9);
    assert_eq!(low.missing().len(), 1);

    let high = Session::initialize(&blueprint, 400, 9);
    assert_eq!(high.missing().len(), 4);
}

#[test]
fn missing_selection_is_seed_reproducible() {
    let blueprint = build_blueprint(3, 3, 5);
    let first = Session::initialize(&blueprint, 4, 31);
    let second = Session::initialize(&blueprint, 4, 31);
    assert_eq!(first.missing(), second.missing());
    assert_eq!(first.placements(), second.placements());
}

#[test]
fn malformed_cell_ids_reject_without_flagging() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(0, 0);

    assert_eq!(
        session.attempt_place_raw(tile, "slot-0-0"),
        PlaceResult::Rejected
    );
    assert_eq!(session.attempt_place_raw(tile, "cell-a-b"), PlaceResult::Rejected);
    assert!(session.error_cell().is_none());
    assert_eq!(session.moves(), 0);
    assert!(session.is_missing(tile));

    assert_eq!(
        session.attempt_place_raw(tile, "cell-0-0"),
        PlaceResult::Placed
    );
}

#[test]
fn out_of_grid_cells_are_rejected() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(0, 0);
    let beyond = CellId::new(9, 9);
    assert_eq!(session.attempt_place(tile, beyond), PlaceResult::Rejected);
    assert_eq!(session.error_cell(), Some(beyond));
}

#[test]
fn selection_ignores_tiles_not_in_the_missing_set() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(1, 1);
    session.attempt_place(tile, CellId::new(1, 1));

    session.select(Some(tile));
    assert_eq!(session.selected(), None);

    let still_missing = TileId::new(0, 0);
    session.select(Some(still_missing));
    assert_eq!(session.selected(), Some(still_missing));

    session.select(None);
    assert_eq!(session.selected(), None);
}

#[test]
fn placement_clears_selection() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(1, 0);
    session.select(Some(tile));
    assert_eq!(session.selected(), Some(tile));
    session.attempt_place(tile, CellId::new(1, 0));
    assert_eq!(session.selected(), None);
}

#[test]
fn stale_error_tokens_do_not_clear_newer_errors() {
    let mut session = all_missing_session(2, 2);
    let tile = TileId::new(0, 0);

    session.attempt_place(tile, CellId::new(0, 1));
    let first_token = session.error_token();
    session.attempt_place(tile, CellId::new(1, 1));
    assert_eq!(session.error_cell(), Some(CellId::new(1, 1)));

    session.clear_error_if(first_token);
    assert_eq!(session.error_cell(), Some(CellId::new(1, 1)));

    session.clear_error_if(session.error_token());
    assert!(session.error_cell().is_none());
}

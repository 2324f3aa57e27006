use blockdrop_ai::{
    extended_search::find_best_move_extended,
    move_search::find_best_move,
    placement::Placement,
    player::{ExtendedPlayer, HeuristicPlayer, Player as _},
    weights::{ExtendedWeights, Weights},
};
use blockdrop_engine::{
    Action, Board as _, BoardView as _, Direction, GameBoard, PieceKind, Rotation,
};

fn with_piece(mut board: GameBoard, kind: PieceKind) -> GameBoard {
    board.set_next_piece(kind);
    board.place_next_piece();
    board
}

/// A 10×20 board whose bottom four rows are full except for column 0.
fn well_board() -> GameBoard {
    let mut art = "..........\n".repeat(16);
    art.push_str(&".#########\n".repeat(4));
    art.parse().unwrap()
}

#[test]
fn o_piece_ties_resolve_to_last_candidate() {
    // O against either wall scores best; position 9 is blocked at the same
    // columns as position 8, and its last rotation is enumerated last
    let board = with_piece(GameBoard::new(10, 20), PieceKind::O);
    let result = find_best_move(&board, &Weights::DEFAULT).unwrap();

    assert_eq!(result.placement, Placement::new(9, 3));
    let expected = Weights::DEFAULT.aggregate_height * 4.0 + Weights::DEFAULT.smoothness * 2.0;
    assert!((result.score - expected).abs() < 1e-9);
}

#[test]
fn j_piece_on_empty_board_goes_to_left_wall() {
    let board = with_piece(GameBoard::new(10, 20), PieceKind::J);

    let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
    assert_eq!(result.placement, Placement::new(0, 1));

    let actions = HeuristicPlayer::default().choose_action(&board).unwrap();
    let mut expected = vec![Action::Rotate(Rotation::Clockwise)];
    expected.extend([Action::Move(Direction::Left); 5]);
    expected.push(Action::Move(Direction::Drop));
    assert_eq!(actions, expected);
    assert_eq!(
        actions.iter().filter(|&&a| a == Action::Move(Direction::Left)).count(),
        5
    );
}

#[test]
fn i_piece_fills_the_well() {
    let board = with_piece(well_board(), PieceKind::I);

    let result = find_best_move(&board, &Weights::DEFAULT).unwrap();
    assert_eq!(result.placement, Placement::new(0, 0));
    assert!(result.score.abs() < 1e-12);

    let mut player = HeuristicPlayer::new(Weights::DEFAULT);
    let actions = player.choose_action(&board).unwrap();
    let mut expected = vec![Action::Move(Direction::Left); 5];
    expected.push(Action::Move(Direction::Drop));
    assert_eq!(actions, expected);
}

#[test]
fn chosen_actions_clear_the_well_on_the_real_board() {
    let mut board = with_piece(well_board(), PieceKind::I);
    let actions = HeuristicPlayer::default().choose_action(&board).unwrap();

    for action in actions {
        let landed = match action {
            Action::Move(direction) => board.move_piece(direction),
            Action::Rotate(rotation) => board.rotate_piece(rotation),
        }
        .unwrap();
        if landed {
            break;
        }
    }

    assert_eq!(board.cleared_lines(), 4);
    assert!((0..10).all(|x| (0..20).all(|y| !board.is_occupied(x, y))));
}

#[test]
fn search_never_mutates_the_caller_board() {
    let board = with_piece(well_board(), PieceKind::T);
    let before = board.to_string();
    let first = find_best_move(&board, &Weights::DEFAULT).unwrap();
    let second = find_best_move(&board, &Weights::DEFAULT).unwrap();
    assert_eq!(first, second);
    assert_eq!(board.to_string(), before);
}

#[test]
fn extended_player_fills_the_well() {
    let board = with_piece(well_board(), PieceKind::I);

    let result = find_best_move_extended(&board, &ExtendedWeights::DEFAULT).unwrap();
    assert_eq!(result.placement, Placement::new(0, 0));
    // empty board left: 2 transitions per row and per column, ghost rows 16..=19
    let weights = ExtendedWeights::DEFAULT;
    let expected = 40.0 * weights.row_transitions
        + 20.0 * weights.column_transitions
        + 17.5 * weights.landing_height;
    assert!((result.score - expected).abs() < 1e-9);

    let actions = ExtendedPlayer::default().choose_action(&board).unwrap();
    let mut expected = vec![Action::Move(Direction::Left); 5];
    expected.push(Action::Move(Direction::Drop));
    assert_eq!(actions, expected);
}

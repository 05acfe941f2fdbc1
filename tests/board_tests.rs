//! Integration tests for board-level rules: position strings, move parsing,
//! movement and combat.

use yorktown::board::Board;
use yorktown::combat::{Combat, MoveOutcome};
use yorktown::constants::DEFAULT_POSITION;
use yorktown::piece::{Color, PieceType};
use yorktown::square::Square;

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// Build a position string from (square, character) pairs on an empty board.
fn position(pieces: &[(&str, char)], side: char, move_number: u32) -> String {
    let mut layout = vec!['a'; 100];
    for &(sq, c) in pieces {
        layout[Square::parse(sq).unwrap().index()] = c;
    }
    format!("{} {side} {move_number}", layout.into_iter().collect::<String>())
}

/// Like [`position`], with the eight lake squares in place.
fn position_with_lakes(pieces: &[(&str, char)], side: char, move_number: u32) -> String {
    let mut all: Vec<(&str, char)> = ["C5", "D5", "G5", "H5", "C6", "D6", "G6", "H6"]
        .into_iter()
        .map(|sq| (sq, '_'))
        .collect();
    all.extend_from_slice(pieces);
    position(&all, side, move_number)
}

fn board(pieces: &[(&str, char)], side: char, move_number: u32) -> Board {
    Board::from_strados3(&position(pieces, side, move_number)).unwrap()
}

/// Parse and apply a move, returning the outcome.
fn play(board: &mut Board, text: &str) -> MoveOutcome {
    let mv = board.parse_move(text).unwrap_or_else(|| panic!("{text} should be legal"));
    board.apply_move(&mv).unwrap()
}

// =============================================================================
// Position strings
// =============================================================================

#[test]
fn test_default_position_parses() {
    let board = Board::from_strados3(DEFAULT_POSITION).unwrap();
    assert_eq!(board.to_play(), Color::Red);
    assert_eq!(board.move_number(), 0);
    assert_eq!(board.living(Color::Red, PieceType::Flag), 1);
    assert_eq!(board.living(Color::Blue, PieceType::Flag), 1);
    assert_eq!(board.living_counts().iter().sum::<u32>(), 80);

    let again = Board::from_strados3(&board.to_strados3()).unwrap();
    assert_eq!(again, board);
    assert_eq!(again.hash(), board.hash());
}

#[test]
fn test_a1_is_the_first_character() {
    let board = board(&[("A1", 'C'), ("K:", 'x')], 'r', 5);
    assert_eq!(board.at(Square::new(0, 0)).piece_type, PieceType::Spy);
    assert_eq!(board.at(Square::new(9, 9)).piece_type, PieceType::Marshal);
    assert!(board.at(Square::new(9, 9)).is_visible);
    assert!(board.to_strados3().starts_with('C'));
    assert!(board.to_strados3().ends_with("x r 5"));
}

#[test]
fn test_malformed_positions_are_rejected() {
    let good = position(&[("A1", 'C')], 'r', 1);
    assert!(Board::from_strados3(&good).is_some());
    assert!(Board::from_strados3(&good[1..]).is_none());
    assert!(Board::from_strados3(&good.replace(" r ", " g ")).is_none());
    assert!(Board::from_strados3(&good.replace(" 1", " x")).is_none());
    assert!(Board::from_strados3(&good.replacen('C', "Z", 1)).is_none());
    assert!(Board::from_strados3(&format!("{good} extra")).is_none());
}

#[test]
fn test_observer_view_masks_hidden_opponents() {
    let board = board(&[("A1", 'C'), ("B1", 'd'), ("A:", 'X'), ("B:", 'p')], 'r', 1);
    let red_view = board.to_strados3_for(Some(Color::Red));
    assert!(red_view.starts_with("Cd"));
    assert_eq!(&red_view[90..92], "?p");

    let blue_view = board.to_strados3_for(Some(Color::Blue));
    assert!(blue_view.starts_with("?d"));
    assert_eq!(&blue_view[90..92], "Xp");
}

// =============================================================================
// Movement
// =============================================================================

#[test]
fn test_spy_steps_forward() {
    let mut board = board(&[("A1", 'C')], 'r', 20);
    assert_eq!(play(&mut board, "A1A2"), MoveOutcome::Relocated);
    assert_eq!(board.to_strados3(), position(&[("A2", 'C')], 'b', 21));
    assert!(board.at(Square::new(0, 1)).has_moved);
}

#[test]
fn test_all_notations_reach_the_same_move() {
    let start = board(&[("A1", 'C')], 'r', 20);
    let short = start.parse_move("A1A2").unwrap();
    for text in ["A1-A2", "a1a2", "<move id=\"20\" source=\"A1\" target=\"A2\"/>"] {
        assert_eq!(start.parse_move(text), Some(short), "{text}");
    }
    assert_eq!(start.parse_move(&short.to_strados(20)), Some(short));
}

#[test]
fn test_spy_cannot_run() {
    let board = board(&[("A1", 'C')], 'r', 20);
    assert!(board.parse_move("A1A3").is_none());
    assert!(board.parse_move("A1B2").is_none());
    assert!(board.parse_move("").is_none());
}

#[test]
fn test_blue_scout_moves() {
    let mut board = board(&[("C1", 'P')], 'b', 20);
    play(&mut board, "C1C2");
    assert_eq!(board.layout_string(None).find('P'), Some(12));
    assert_eq!(board.to_play(), Color::Red);
    assert_eq!(board.move_number(), 21);
}

#[test]
fn test_scout_is_blocked_by_lakes() {
    let board = Board::from_strados3(&position_with_lakes(&[("C1", 'D')], 'r', 1)).unwrap();
    assert!(board.parse_move("C1C4").is_some());
    assert!(board.parse_move("C1C5").is_none());
    assert!(board.parse_move("C1C7").is_none());
    assert!(board.parse_move("C1K1").is_some());
    assert!(board.parse_move("C1A1").is_some());
}

#[test]
fn test_scout_crosses_the_board() {
    let mut board = board(&[("A1", 'D')], 'r', 1);
    play(&mut board, "A1A:");
    assert_eq!(board.layout_string(None).find('D'), Some(90));
}

#[test]
fn test_scout_stops_at_first_piece() {
    let board = board(&[("A1", 'D'), ("A5", 'E'), ("E1", 'Q')], 'r', 1);
    assert!(board.parse_move("A1A4").is_some());
    assert!(board.parse_move("A1A5").is_none());
    assert!(board.parse_move("A1A6").is_none());
    // attack at range
    assert!(board.parse_move("A1E1").is_some());
    assert!(board.parse_move("A1F1").is_none());
}

#[test]
fn test_bombs_and_flags_do_not_move() {
    let board = board(&[("A1", 'B'), ("C1", 'M')], 'r', 1);
    assert!(board.legal_moves().is_empty());
    assert!(!board.has_legal_move());
}

// =============================================================================
// Combat
// =============================================================================

/// Red attacker on A1 strikes the blue defender on B1.
fn attack(attacker: char, defender: char) -> (MoveOutcome, Board) {
    let mut board = board(&[("A1", attacker), ("B1", defender)], 'r', 20);
    let outcome = play(&mut board, "A1B1");
    (outcome, board)
}

#[test]
fn test_equal_ranks_trade() {
    let (outcome, board) = attack('C', 'O');
    assert_eq!(outcome, MoveOutcome::Fight(Combat::BothCaptured));
    assert_eq!(board.to_strados3(), position(&[], 'b', 21));
}

#[test]
fn test_spy_loses_to_scout() {
    let (outcome, board) = attack('C', 'P');
    assert_eq!(outcome, MoveOutcome::Fight(Combat::DefenderWins));
    assert_eq!(board.to_strados3(), position(&[("B1", 'p')], 'b', 21));
}

#[test]
fn test_spy_takes_marshal() {
    let (outcome, board) = attack('C', 'X');
    assert_eq!(outcome, MoveOutcome::Fight(Combat::AttackerWins));
    assert_eq!(board.to_strados3(), position(&[("B1", 'c')], 'b', 21));
}

#[test]
fn test_bomb_stops_spy() {
    let (_, board) = attack('C', 'N');
    assert_eq!(board.to_strados3(), position(&[("B1", 'n')], 'b', 21));
}

#[test]
fn test_miner_defuses_bomb() {
    let (_, board) = attack('E', 'N');
    assert_eq!(board.to_strados3(), position(&[("B1", 'e')], 'b', 21));
}

#[test]
fn test_major_beats_captain() {
    let (_, board) = attack('H', 'U');
    assert_eq!(board.to_strados3(), position(&[("B1", 'u')], 'b', 21));
}

#[test]
fn test_cannot_attack_own_piece() {
    let board = board(&[("A1", 'C'), ("B1", 'B')], 'r', 20);
    assert!(board.parse_move("A1B1").is_none());
}

#[test]
fn test_captures_are_conserved() {
    let fights = [('C', 'O'), ('C', 'P'), ('C', 'X'), ('C', 'N'), ('E', 'N'), ('H', 'U'), ('L', 'W')];
    for (attacker, defender) in fights {
        let before = board(&[("A1", attacker), ("B1", defender)], 'r', 20);
        let (_, after) = attack(attacker, defender);
        for i in 0..before.living_counts().len() {
            let lost = before.living_counts()[i] - after.living_counts()[i];
            let taken = after.captured_counts()[i] - before.captured_counts()[i];
            assert_eq!(lost, taken, "{attacker}x{defender} count {i}");
        }
        assert_eq!(after.hash(), after.compute_hash());
    }
}

#[test]
fn test_annotated_rendering_after_a_fight() {
    let mut board = board(&[("A1", 'c'), ("B1", 'x'), ("A:", 'Y')], 'r', 20);
    let mv = board.parse_move("A1B1").unwrap();
    assert_eq!(mv.to_annotated(&board), "A1[S]xB1[0]");
    board.apply_move(&mv).unwrap();
    assert_eq!(board.at(Square::new(1, 0)).piece_type, PieceType::Spy);
}

//! Move generation: placement, capture, suicide and repetition.
//!
//! Each rule is switched independently by a [`RuleSet`]. The presets
//! reproduce the rule combinations older callers relied on: full capture
//! rules for game-tree export, and plain placement on vacant or own-reserved
//! points for integer value recognition.

use std::sync::Arc;

use log::trace;

use crate::board::{Cell, Player, Point};
use crate::error::MoveError;
use crate::position::Position;

/// Which rules are in force.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RuleSet {
    /// Remove opposing groups left without liberties.
    pub capture: bool,
    /// Reject placements that leave the placed group without liberties
    /// and capture nothing.
    pub suicide_check: bool,
    /// Reserved points are vacant only for their owner. When off, reserved
    /// markers are plain empty points.
    pub reserved_points: bool,
    /// Reject moves that recreate the board of the current position or of
    /// any ancestor.
    pub repetition_check: bool,
}

impl RuleSet {
    /// Every rule on.
    pub const GO: RuleSet = RuleSet {
        capture: true,
        suicide_check: true,
        reserved_points: true,
        repetition_check: true,
    };

    /// Stones are placed on vacant or own-reserved points and nothing else
    /// happens.
    pub const PLACEMENT: RuleSet = RuleSet {
        capture: false,
        suicide_check: false,
        reserved_points: true,
        repetition_check: false,
    };

    /// Stones are placed on any point without a stone.
    pub const BARE: RuleSet = RuleSet {
        capture: false,
        suicide_check: false,
        reserved_points: false,
        repetition_check: false,
    };
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::GO
    }
}

/// Play `mover`'s stone at `pt`.
///
/// The move is executed on a scratch copy of the board. Captured groups are
/// cleared to empty, the child position has the mover's opponent to move,
/// and `position` becomes its parent.
///
/// # Errors
/// - [`MoveError::OffBoard`] if `pt` is outside the board
/// - [`MoveError::Occupied`] if `pt` holds a stone
/// - [`MoveError::Reserved`] if `pt` is reserved for the opponent
/// - [`MoveError::Suicide`] if the placed group has no liberties and nothing was captured
/// - [`MoveError::Repetition`] if the resulting board repeats the history
pub fn play_move(
    position: &Arc<Position>,
    mover: Player,
    pt: Point,
    rules: &RuleSet,
) -> Result<Arc<Position>, MoveError> {
    let board = position.board();
    match board.get(pt).ok_or(MoveError::OffBoard)? {
        Cell::Stone(_) => return Err(MoveError::Occupied),
        cell if !cell.is_vacant_for(mover, rules.reserved_points) => {
            return Err(MoveError::Reserved);
        }
        _ => {}
    }

    let mut next = board.clone();
    next.set(pt, Cell::Stone(mover));

    let mut captured = 0;
    if rules.capture {
        let opponent = mover.opponent();
        let mut to_remove: Vec<Point> = Vec::new();
        for n in next.neighbors(pt) {
            if next.get(n) != Some(Cell::Stone(opponent)) || to_remove.contains(&n) {
                continue;
            }
            let (group, liberties) = next.group_and_liberties(n, rules.reserved_points);
            if liberties == 0 {
                captured += group.len();
                to_remove.extend(group);
            }
        }
        for r in to_remove {
            next.set(r, Cell::Empty);
        }
    }

    if rules.suicide_check && captured == 0 {
        let (_, liberties) = next.group_and_liberties(pt, rules.reserved_points);
        if liberties == 0 {
            return Err(MoveError::Suicide);
        }
    }

    if rules.repetition_check && position.repeats_history(&next) {
        return Err(MoveError::Repetition);
    }

    Ok(Position::child(position, next, mover.opponent(), pt))
}

/// All legal successors of `position` for `mover`, in row-major order of the
/// placed point.
///
/// The order is part of the contract: tree edges and exported listings
/// follow it.
pub fn legal_moves(position: &Arc<Position>, mover: Player, rules: &RuleSet) -> Vec<Arc<Position>> {
    let board = position.board();
    let mut moves = Vec::with_capacity(board.rows() * board.cols());
    for pt in board.points() {
        match play_move(position, mover, pt, rules) {
            Ok(child) => moves.push(child),
            Err(e) => trace!("{mover} at {pt:?} rejected: {e}"),
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Shape};

    fn root(text: &str, turn: Player) -> Arc<Position> {
        Position::root(text.parse::<Board>().unwrap(), turn)
    }

    #[test]
    fn test_play_single_stone() {
        let pos = root("0,0,0\n0,0,0\n0,0,0\n", Player::Black);
        let child = play_move(&pos, Player::Black, (1, 1), &RuleSet::GO).unwrap();
        assert_eq!(child.board().get((1, 1)), Some(Cell::Stone(Player::Black)));
        assert_eq!(child.turn(), Player::White);
        assert_eq!(child.last_move(), Some((1, 1)));
        assert_eq!(**child.parent().unwrap(), *pos);
        // the parent is untouched
        assert_eq!(pos.board().get((1, 1)), Some(Cell::Empty));
    }

    #[test]
    fn test_occupied_and_off_board() {
        let pos = root("1,0\n0,0\n", Player::White);
        assert_eq!(
            play_move(&pos, Player::White, (0, 0), &RuleSet::GO).unwrap_err(),
            MoveError::Occupied
        );
        assert_eq!(
            play_move(&pos, Player::White, (2, 0), &RuleSet::GO).unwrap_err(),
            MoveError::OffBoard
        );
    }

    #[test]
    fn test_capture_removes_whole_group() {
        // . X X .
        // X O O X
        // . X . .
        // . . . .
        let pos = root("0,1,1,0\n1,-1,-1,1\n0,1,0,0\n0,0,0,0\n", Player::Black);
        let child = play_move(&pos, Player::Black, (2, 2), &RuleSet::GO).unwrap();
        assert_eq!(
            child.board().to_codes(),
            vec![
                vec![0, 1, 1, 0],
                vec![1, 0, 0, 1],
                vec![0, 1, 1, 0],
                vec![0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn test_capture_disabled_keeps_stones() {
        let pos = root("0,1,1,0\n1,-1,-1,1\n0,1,0,0\n0,0,0,0\n", Player::Black);
        let rules = RuleSet {
            capture: false,
            ..RuleSet::GO
        };
        let child = play_move(&pos, Player::Black, (2, 2), &rules).unwrap();
        assert_eq!(child.board().count_stones(Player::White), 2);
    }

    #[test]
    fn test_suicide_rejected() {
        // . X
        // X .
        let pos = root("0,1\n1,0\n", Player::White);
        assert_eq!(
            play_move(&pos, Player::White, (0, 0), &RuleSet::GO).unwrap_err(),
            MoveError::Suicide
        );
        let rules = RuleSet {
            suicide_check: false,
            ..RuleSet::GO
        };
        let child = play_move(&pos, Player::White, (0, 0), &rules).unwrap();
        assert_eq!(child.board().get((0, 0)), Some(Cell::Stone(Player::White)));
    }

    #[test]
    fn test_capture_rescues_stone_without_liberties() {
        // X O .
        // . X .
        // X . .
        // White at (1,0) is surrounded, but takes the last liberty of (0,0).
        let pos = root("1,-1,0\n0,1,0\n1,0,0\n", Player::White);
        let child = play_move(&pos, Player::White, (1, 0), &RuleSet::GO).unwrap();
        assert_eq!(child.board().get((0, 0)), Some(Cell::Empty));
        assert_eq!(child.board().get((1, 0)), Some(Cell::Stone(Player::White)));

        let rules = RuleSet {
            capture: false,
            ..RuleSet::GO
        };
        assert_eq!(
            play_move(&pos, Player::White, (1, 0), &rules).unwrap_err(),
            MoveError::Suicide
        );
    }

    #[test]
    fn test_reserved_points() {
        let pos = root("-2,2\n0,0\n", Player::Black);
        assert_eq!(
            play_move(&pos, Player::Black, (0, 0), &RuleSet::GO).unwrap_err(),
            MoveError::Reserved
        );
        assert!(play_move(&pos, Player::Black, (0, 1), &RuleSet::GO).is_ok());
        assert!(play_move(&pos, Player::White, (0, 0), &RuleSet::GO).is_ok());
        assert!(play_move(&pos, Player::Black, (0, 0), &RuleSet::BARE).is_ok());
    }

    #[test]
    fn test_reserved_point_is_not_a_liberty() {
        // X b
        // . O
        let pos = root("1,2\n0,-1\n", Player::White);
        let child = play_move(&pos, Player::White, (1, 0), &RuleSet::GO).unwrap();
        assert_eq!(child.board(), &"0,2\n-1,-1\n".parse::<Board>().unwrap());

        // Filling one own marker next to another leaves no empty neighbour.
        let board = Board::parse("2,2\n", Shape::Rectangular).unwrap();
        let pos = Position::root(board, Player::Black);
        assert_eq!(
            play_move(&pos, Player::Black, (0, 0), &RuleSet::GO).unwrap_err(),
            MoveError::Suicide
        );
        assert!(play_move(&pos, Player::Black, (0, 0), &RuleSet::BARE).is_ok());
    }

    #[test]
    fn test_legal_moves_row_major() {
        let pos = root("0,1\n0,0\n", Player::White);
        let moves: Vec<_> = legal_moves(&pos, Player::White, &RuleSet::GO)
            .iter()
            .map(|c| c.last_move().unwrap())
            .collect();
        assert_eq!(moves, vec![(0, 0), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_presets() {
        assert_eq!(RuleSet::default(), RuleSet::GO);
        assert!(!RuleSet::PLACEMENT.capture);
        assert!(RuleSet::PLACEMENT.reserved_points);
        assert!(!RuleSet::BARE.reserved_points);
    }
}

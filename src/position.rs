//! Position snapshots.
//!
//! A [`Position`] is an immutable board plus the player to move and the move
//! that produced it. Every move creates a new position whose `parent` points
//! back at the position it was played from. The parent chain is the move
//! history and is only read by the repetition check; it never owns children.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::board::{Board, Player, Point};
use crate::identity::{IdentityScheme, Key, identity};

/// A game position.
#[derive(Clone, Debug)]
pub struct Position {
    board: Board,
    turn: Player,
    last_move: Option<Point>,
    parent: Option<Arc<Position>>,
}

impl Position {
    /// Wrap a board as the root of a game: no last move, no parent.
    pub fn root(board: Board, turn: Player) -> Arc<Position> {
        Arc::new(Position {
            board,
            turn,
            last_move: None,
            parent: None,
        })
    }

    /// Position reached from `parent` by a stone placed at `last_move`.
    pub(crate) fn child(
        parent: &Arc<Position>,
        board: Board,
        turn: Player,
        last_move: Point,
    ) -> Arc<Position> {
        Arc::new(Position {
            board,
            turn,
            last_move: Some(last_move),
            parent: Some(Arc::clone(parent)),
        })
    }

    /// Read-only board contents.
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player to move.
    #[inline]
    pub fn turn(&self) -> Player {
        self.turn
    }

    #[inline]
    pub fn last_move(&self) -> Option<Point> {
        self.last_move
    }

    #[inline]
    pub fn parent(&self) -> Option<&Arc<Position>> {
        self.parent.as_ref()
    }

    /// This position followed by each ancestor, nearest first.
    pub fn history(&self) -> impl Iterator<Item = &Position> {
        std::iter::successors(Some(self), |p| p.parent.as_deref())
    }

    /// Number of moves between the root and this position.
    pub fn ply(&self) -> usize {
        self.history().count() - 1
    }

    /// Whether `board` equals the board of this position or any ancestor.
    pub fn repeats_history(&self, board: &Board) -> bool {
        self.history().any(|p| p.board == *board)
    }

    /// Identity key under `scheme`.
    pub fn key(&self, scheme: IdentityScheme) -> Key {
        identity(&self.board, self.turn, self.last_move, scheme)
    }
}

/// Positions compare by `(board, turn, last_move)`; how they were reached
/// does not matter.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.turn == other.turn && self.last_move == other.last_move
    }
}

impl Eq for Position {}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.turn.hash(state);
        self.last_move.hash(state);
    }
}

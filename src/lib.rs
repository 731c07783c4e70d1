//! go-cgt: game trees and combinatorial game values for small Go-like boards.
//!
//! Starting from a board, this crate enumerates legal placements under
//! configurable capture rules, builds depth-bounded game trees, and
//! classifies positions as integer game values where possible.
//!
//! ## Modules
//!
//! - [`constants`] - Cell codes and defaults
//! - [`error`] - Board input and move errors
//! - [`board`] - Immutable board, groups and liberties, board text parsing
//! - [`identity`] - Position keys
//! - [`position`] - Position snapshots with move history
//! - [`rules`] - Rule selection and legal move generation
//! - [`tree`] - Depth-bounded game trees
//! - [`evaluator`] - Memoised game-value classification
//! - [`report`] - Value listings
//!
//! ## Example
//!
//! ```
//! use go_cgt::board::{Board, Player};
//! use go_cgt::evaluator::{Evaluator, Value};
//! use go_cgt::position::Position;
//! use go_cgt::rules::RuleSet;
//!
//! // Black owns the one reserved point; White has nowhere to play.
//! let board: Board = "1,2\n1,1\n".parse().unwrap();
//! let root = Position::root(board, Player::Black);
//!
//! let mut evaluator = Evaluator::new(RuleSet::PLACEMENT);
//! assert_eq!(evaluator.evaluate(&root), Value::Integer(1));
//! ```

pub mod board;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod identity;
pub mod position;
pub mod report;
pub mod rules;
pub mod tree;

//! Plain-text value listings.
//!
//! A listing explores a position depth-first, Black options before White
//! options, and prints each distinct position once with its game value:
//!
//! ```text
//! Depth 0, ID 3f2a…, Value: 1
//! Depth 1, ID 9c01…, Value: 0
//! ```
//!
//! A position is listed the first time its key is met, at whatever depth.
//! Every later occurrence is skipped together with everything below it, even
//! when the first one sat at the depth bound and was never expanded. This
//! differs from a [`TreeMode::BothPlayers`](crate::tree::TreeMode) tree,
//! which still expands a position first met at its depth bound.

use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::Arc;

use crate::board::Player;
use crate::evaluator::{Evaluator, Value};
use crate::identity::Key;
use crate::position::Position;
use crate::rules::legal_moves;

/// One line of a value listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueLine {
    pub depth: usize,
    pub key: Key,
    pub value: Value,
}

/// Evaluate every distinct position within `max_depth` plies of `root`, in
/// listing order.
///
/// Positions are keyed with the evaluator's identity scheme and explored
/// under its rules.
pub fn value_lines(
    root: &Arc<Position>,
    max_depth: usize,
    evaluator: &mut Evaluator,
) -> Vec<ValueLine> {
    let mut seen = HashSet::new();
    let mut lines = Vec::new();
    let mut stack = vec![(Arc::clone(root), 0)];

    while let Some((position, depth)) = stack.pop() {
        let key = evaluator.key(&position);
        if !seen.insert(key) {
            continue;
        }
        lines.push(ValueLine {
            depth,
            key,
            value: evaluator.evaluate(&position),
        });
        if depth == max_depth {
            continue;
        }

        let rules = *evaluator.rules();
        let children: Vec<_> = [Player::Black, Player::White]
            .into_iter()
            .flat_map(|mover| legal_moves(&position, mover, &rules))
            .collect();
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }
    lines
}

/// Write the value of every distinct position within `max_depth` plies of
/// `root` to `out`.
pub fn write_value_listing<W: Write>(
    out: &mut W,
    root: &Arc<Position>,
    max_depth: usize,
    evaluator: &mut Evaluator,
) -> io::Result<()> {
    for line in value_lines(root, max_depth, evaluator) {
        writeln!(
            out,
            "Depth {}, ID {}, Value: {}",
            line.depth, line.key, line.value
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Shape};
    use crate::rules::RuleSet;
    use crate::tree::{TreeBuilder, TreeMode};

    /// Recursive walk listing (depth, key) the way a plain dump would.
    fn dump(
        position: &Arc<Position>,
        depth: usize,
        max_depth: usize,
        rules: &RuleSet,
        seen: &mut HashSet<Key>,
        out: &mut Vec<(usize, Key)>,
    ) {
        let key = position.key(crate::identity::IdentityScheme::Board);
        if !seen.insert(key) {
            return;
        }
        out.push((depth, key));
        if depth == max_depth {
            return;
        }
        for mover in [Player::Black, Player::White] {
            for child in legal_moves(position, mover, rules) {
                dump(&child, depth + 1, max_depth, rules, seen, out);
            }
        }
    }

    #[test]
    fn test_listing_format() {
        let root = Position::root("1,2\n1,1\n".parse::<Board>().unwrap(), Player::Black);
        let mut eval = Evaluator::new(RuleSet::PLACEMENT);
        let mut out = Vec::new();
        write_value_listing(&mut out, &root, 3, &mut eval).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let root_key = eval.key(&root);
        assert_eq!(lines[0], format!("Depth 0, ID {root_key}, Value: 1"));
        assert!(lines[1].starts_with("Depth 1, ID "));
        assert!(lines[1].ends_with("Value: 0"));
    }

    #[test]
    fn test_repeated_keys_listed_once() {
        // Board-only keys merge transpositions of the two Black-only points.
        let root = Position::root("2,2\n-2,1\n".parse::<Board>().unwrap(), Player::Black);
        let mut eval = Evaluator::new(RuleSet::PLACEMENT);
        let lines = value_lines(&root, 3, &mut eval);
        let keys: HashSet<_> = lines.iter().map(|l| l.key).collect();
        assert_eq!(keys.len(), lines.len());

        let tree = TreeBuilder::new(RuleSet::PLACEMENT, TreeMode::BothPlayers)
            .with_identity(eval.scheme())
            .build(&root, 3);
        assert!(lines.len() < tree.len());
    }

    #[test]
    fn test_position_first_met_at_bound_is_not_expanded_later() {
        // On ". . ." White at (0,1) under "X . ." captures and reaches
        // ". O ." at depth 2, before the same board comes up at depth 1.
        let board = Board::parse("0,0,0\n", Shape::Rectangular).unwrap();
        let root = Position::root(board, Player::Black);
        let taken = Position::root(
            Board::parse("0,-1,0\n", Shape::Rectangular).unwrap(),
            Player::Black,
        );
        let mut eval = Evaluator::new(RuleSet::GO);
        let taken_key = eval.key(&taken);

        let lines = value_lines(&root, 2, &mut eval);
        let depths: Vec<_> = lines
            .iter()
            .filter(|l| l.key == taken_key)
            .map(|l| l.depth)
            .collect();
        assert_eq!(depths, vec![2]);

        let mut expected = Vec::new();
        dump(&root, 0, 2, &RuleSet::GO, &mut HashSet::new(), &mut expected);
        let listed: Vec<_> = lines.iter().map(|l| (l.depth, l.key)).collect();
        assert_eq!(listed, expected);
    }
}

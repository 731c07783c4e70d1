//! Combinatorial game values.
//!
//! Every position is read as a game whose Left options are all Black
//! placements and whose Right options are all White placements, whatever
//! the nominal turn. Integers are recognised inductively:
//!
//! ```text
//!  0 = { | }         no options for either player
//!  n = { n-1 | }     one distinct Left value, no Right options
//! -n = { | 1-n }     no Left options, one distinct Right value
//! ```
//!
//! Anything else (switches, stars, fractions, or any option that is itself
//! not an integer) is [`Value::Unknown`].
//!
//! Evaluation walks the option graph with an explicit worklist instead of
//! recursion, so deep graphs cannot exhaust the call stack. A position's
//! value enters the memo only after all of its options are resolved.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::board::Player;
use crate::identity::{IdentityScheme, Key};
use crate::position::Position;
use crate::rules::{RuleSet, legal_moves};

/// Game value of a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Value {
    Integer(i64),
    Unknown,
}

/// Discriminant of a [`Value`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    Unknown,
}

impl Value {
    /// The empty game `{ | }`.
    pub const ZERO: Value = Value::Integer(0);

    pub fn kind(self) -> ValueKind {
        match self {
            Value::Integer(_) => ValueKind::Integer,
            Value::Unknown => ValueKind::Unknown,
        }
    }

    /// The integer, if this value is one.
    pub fn integer(self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(n),
            Value::Unknown => None,
        }
    }

    #[inline]
    pub fn is_integer(self) -> bool {
        self.kind() == ValueKind::Integer
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Unknown => write!(f, "?"),
        }
    }
}

/// Counters for one evaluator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalStats {
    /// Positions whose value was computed and stored.
    pub computed: u64,
    /// Lookups answered from the memo.
    pub cache_hits: u64,
    /// Options found to lead back to a position still being evaluated.
    pub cycles: u64,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn player(self) -> Player {
        match self {
            Side::Left => Player::Black,
            Side::Right => Player::White,
        }
    }
}

/// A position on the worklist whose options are being resolved.
struct Frame {
    key: Key,
    /// Side this position is an option for, in the frame below it.
    side: Option<Side>,
    options: Vec<(Side, Arc<Position>)>,
    next: usize,
    left: BTreeSet<Value>,
    right: BTreeSet<Value>,
}

impl Frame {
    fn new(position: &Arc<Position>, key: Key, side: Option<Side>, rules: &RuleSet) -> Self {
        let options = [Side::Left, Side::Right]
            .into_iter()
            .flat_map(|s| {
                legal_moves(position, s.player(), rules)
                    .into_iter()
                    .map(move |child| (s, child))
            })
            .collect();
        Self {
            key,
            side,
            options,
            next: 0,
            left: BTreeSet::new(),
            right: BTreeSet::new(),
        }
    }

    fn record(&mut self, side: Side, value: Value) {
        match side {
            Side::Left => self.left.insert(value),
            Side::Right => self.right.insert(value),
        };
    }

    fn classify(&self) -> Value {
        if self.options.is_empty() {
            return Value::ZERO;
        }
        if self.left.iter().chain(&self.right).any(|v| !v.is_integer()) {
            return Value::Unknown;
        }
        let step = match (self.left.len(), self.right.len()) {
            (1, 0) => self.left.first().map(|v| (*v, 1)),
            (0, 1) => self.right.first().map(|v| (*v, -1)),
            _ => None,
        };
        step.and_then(|(v, delta)| v.integer()?.checked_add(delta))
            .map_or(Value::Unknown, Value::Integer)
    }
}

/// Memoising game-value evaluator.
///
/// The memo lives as long as the evaluator, so separate runs (for example
/// under different rule sets) use separate evaluators and never share
/// values.
pub struct Evaluator {
    rules: RuleSet,
    scheme: IdentityScheme,
    cache: HashMap<Key, Value>,
    stats: EvalStats,
}

impl Evaluator {
    /// An evaluator keyed by board contents only.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            rules,
            scheme: IdentityScheme::Board,
            cache: HashMap::new(),
            stats: EvalStats::default(),
        }
    }

    pub fn with_identity(mut self, scheme: IdentityScheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn scheme(&self) -> IdentityScheme {
        self.scheme
    }

    pub fn stats(&self) -> &EvalStats {
        &self.stats
    }

    /// Number of memoised positions.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Key of `position` under this evaluator's identity scheme.
    pub fn key(&self, position: &Position) -> Key {
        position.key(self.scheme)
    }

    /// Memoised value for `key`, if it has been evaluated.
    pub fn value_of(&self, key: &Key) -> Option<Value> {
        self.cache.get(key).copied()
    }

    fn lookup(&mut self, key: &Key) -> Option<Value> {
        let value = self.value_of(key)?;
        self.stats.cache_hits += 1;
        Some(value)
    }

    /// Value of `position`, computing and memoising it and every position
    /// reachable from it that is not memoised yet.
    ///
    /// An option that leads back to a position still on the worklist counts
    /// as [`Value::Unknown`]: a loopy game has no integer value.
    pub fn evaluate(&mut self, position: &Arc<Position>) -> Value {
        let root_key = self.key(position);
        if let Some(value) = self.lookup(&root_key) {
            return value;
        }

        let computed_before = self.stats.computed;
        let mut stack: Vec<Frame> = Vec::new();
        let mut path: HashSet<Key> = HashSet::new();
        path.insert(root_key);
        stack.push(Frame::new(position, root_key, None, &self.rules));

        while let Some(frame) = stack.last_mut() {
            if let Some((side, child)) = frame.options.get(frame.next).cloned() {
                frame.next += 1;
                let child_key = self.key(&child);
                if let Some(value) = self.lookup(&child_key) {
                    frame.record(side, value);
                } else if path.contains(&child_key) {
                    self.stats.cycles += 1;
                    frame.record(side, Value::Unknown);
                } else {
                    path.insert(child_key);
                    stack.push(Frame::new(&child, child_key, Some(side), &self.rules));
                }
                continue;
            }

            // All options resolved.
            let Some(done) = stack.pop() else { break };
            let value = done.classify();
            path.remove(&done.key);
            self.cache.insert(done.key, value);
            self.stats.computed += 1;

            match (stack.last_mut(), done.side) {
                (Some(parent), Some(side)) => parent.record(side, value),
                _ => {
                    debug!(
                        "evaluated {} positions, {} cached, value {}",
                        self.stats.computed - computed_before,
                        self.cache.len(),
                        value
                    );
                    return value;
                }
            }
        }
        Value::Unknown
    }
}

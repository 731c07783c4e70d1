//! Depth-bounded game tree construction.
//!
//! The builder expands a root position depth-first. Nodes live in a flat
//! arena and refer to each other by index. A per-build visited set of keys
//! stops a position from being expanded twice: a later occurrence is kept
//! as a [`Expansion::Revisited`] leaf and its earlier subtree is not
//! re-attached.
//!
//! Two expansion modes are supported:
//! - [`TreeMode::Alternating`]: only the player to move has options, and
//!   turns alternate (a plain game tree).
//! - [`TreeMode::BothPlayers`]: every node lists all Black placements
//!   followed by all White placements from the same position, whatever its
//!   nominal turn (the option sets of a combinatorial game).

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::board::{Board, Player, Point};
use crate::identity::{IdentityScheme, Key};
use crate::position::Position;
use crate::rules::{RuleSet, legal_moves};

/// Index of a node in its [`Tree`].
pub type NodeId = usize;

/// How a node's children are generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TreeMode {
    Alternating,
    BothPlayers,
}

/// What happened when the builder reached a node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expansion {
    /// Children generated, in move order.
    Expanded(Vec<NodeId>),
    /// No legal moves.
    Terminal,
    /// Depth bound reached before expansion.
    Frontier,
    /// Already expanded elsewhere in this build.
    Revisited,
}

/// A node in the game tree.
#[derive(Clone, Debug)]
pub struct TreeNode {
    pub position: Arc<Position>,
    pub key: Key,
    pub parent: Option<NodeId>,
    /// Player whose placement produced this node (`None` at the root).
    pub mover: Option<Player>,
    /// Distance from the root.
    pub depth: usize,
    pub expansion: Expansion,
}

impl TreeNode {
    /// Child ids, empty unless the node was expanded.
    pub fn children(&self) -> &[NodeId] {
        match &self.expansion {
            Expansion::Expanded(children) => children,
            _ => &[],
        }
    }
}

/// Read-only view of one node for exporters.
#[derive(Clone, Debug)]
pub struct NodeRecord<'a> {
    pub key: Key,
    pub parent: Option<Key>,
    pub last_move: Option<Point>,
    pub turn: Player,
    pub mover: Option<Player>,
    pub depth: usize,
    pub board: &'a Board,
}

/// A built game tree.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    mode: TreeMode,
    scheme: IdentityScheme,
    max_depth: usize,
}

impl Tree {
    #[inline]
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// The node with id `id`, if it exists.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn mode(&self) -> TreeMode {
        self.mode
    }

    pub fn scheme(&self) -> IdentityScheme {
        self.scheme
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Node ids in depth-first pre-order, children in move order.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children().iter().rev());
        }
        order
    }

    /// One record per node, in creation order.
    pub fn records(&self) -> impl Iterator<Item = NodeRecord<'_>> + '_ {
        self.nodes.iter().map(|node| NodeRecord {
            key: node.key,
            parent: node.parent.map(|p| self.nodes[p].key),
            last_move: node.position.last_move(),
            turn: node.position.turn(),
            mover: node.mover,
            depth: node.depth,
            board: node.position.board(),
        })
    }
}

/// Builds [`Tree`]s under a fixed rule set, mode and identity scheme.
#[derive(Clone, Debug)]
pub struct TreeBuilder {
    rules: RuleSet,
    mode: TreeMode,
    scheme: IdentityScheme,
}

impl TreeBuilder {
    /// A builder keyed by board, turn and last move.
    pub fn new(rules: RuleSet, mode: TreeMode) -> Self {
        Self {
            rules,
            mode,
            scheme: IdentityScheme::Full,
        }
    }

    pub fn with_identity(mut self, scheme: IdentityScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Expand `root` to at most `max_depth` plies.
    ///
    /// Building twice from the same root and depth gives the same nodes in
    /// the same order.
    pub fn build(&self, root: &Arc<Position>, max_depth: usize) -> Tree {
        let mut tree = Tree {
            nodes: vec![TreeNode {
                position: Arc::clone(root),
                key: root.key(self.scheme),
                parent: None,
                mover: None,
                depth: 0,
                expansion: Expansion::Frontier,
            }],
            mode: self.mode,
            scheme: self.scheme,
            max_depth,
        };
        let mut visited = HashSet::new();
        self.expand(&mut tree, &mut visited, 0, max_depth);
        debug!(
            "built {:?} tree: {} nodes, {} expanded, depth {}",
            self.mode,
            tree.len(),
            visited.len(),
            max_depth
        );
        tree
    }

    fn options(&self, position: &Arc<Position>) -> Vec<(Player, Arc<Position>)> {
        let movers = match self.mode {
            TreeMode::Alternating => vec![position.turn()],
            TreeMode::BothPlayers => vec![Player::Black, Player::White],
        };
        movers
            .into_iter()
            .flat_map(|mover| {
                legal_moves(position, mover, &self.rules)
                    .into_iter()
                    .map(move |child| (mover, child))
            })
            .collect()
    }

    fn expand(&self, tree: &mut Tree, visited: &mut HashSet<Key>, id: NodeId, depth_left: usize) {
        let key = tree.nodes[id].key;
        if visited.contains(&key) {
            tree.nodes[id].expansion = Expansion::Revisited;
            return;
        }
        if depth_left == 0 {
            tree.nodes[id].expansion = Expansion::Frontier;
            return;
        }
        visited.insert(key);

        let position = Arc::clone(&tree.nodes[id].position);
        let options = self.options(&position);
        if options.is_empty() {
            tree.nodes[id].expansion = Expansion::Terminal;
            return;
        }

        let depth = tree.nodes[id].depth + 1;
        let children: Vec<NodeId> = options
            .into_iter()
            .map(|(mover, child)| {
                tree.nodes.push(TreeNode {
                    key: child.key(self.scheme),
                    position: child,
                    parent: Some(id),
                    mover: Some(mover),
                    depth,
                    expansion: Expansion::Frontier,
                });
                tree.nodes.len() - 1
            })
            .collect();
        tree.nodes[id].expansion = Expansion::Expanded(children.clone());

        for child in children {
            self.expand(tree, visited, child, depth_left - 1);
        }
    }
}

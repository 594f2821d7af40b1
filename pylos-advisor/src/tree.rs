//! Bounded-depth search tree used by the heuristic strategy.

use std::fmt;

use pylos_core::movegen::successors;
use pylos_core::{GameState, Move};

use crate::stats::SearchStats;

/// A position in the search tree together with the move that reached it.
///
/// Each node owns its own copy of the state; siblings never share one.
#[derive(Clone, Debug)]
pub struct Node {
    /// Move leading here from the parent (None at the root)
    pub mov: Option<Move>,
    pub state: GameState,
    pub children: Vec<Node>,
}

impl Node {
    /// Build the tree rooted at `state`, `depth` plies deep.
    ///
    /// Decided positions are not expanded further.
    pub fn build(state: GameState, depth: usize, stats: &mut SearchStats) -> Node {
        let mut root = Node {
            mov: None,
            state,
            children: Vec::new(),
        };
        root.expand(0, depth, stats);
        root
    }

    fn expand(&mut self, ply: usize, depth: usize, stats: &mut SearchStats) {
        if ply >= depth || self.state.winner().is_some() {
            stats.record_leaf(ply);
            return;
        }

        stats.record_expansion(ply);
        self.children = successors(&self.state)
            .into_iter()
            .map(|(mov, state)| Node {
                mov: Some(mov),
                state,
                children: Vec::new(),
            })
            .collect();

        for child in &mut self.children {
            child.expand(ply + 1, depth, stats);
        }
    }

    /// Number of nodes in this subtree, root included.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(Node::len).sum::<usize>()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Iterate over the children.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }
}

impl<'a> IntoIterator for &'a Node {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn walk(node: &Node, level: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let label = node
                .mov
                .as_ref()
                .map_or_else(|| "root".to_string(), Move::to_string);
            writeln!(
                f,
                "{}{} reserve={:?}",
                "    ".repeat(level),
                label,
                node.state.reserves()
            )?;
            for child in node {
                walk(child, level + 1, f)?;
            }
            Ok(())
        }
        walk(self, 0, f)
    }
}

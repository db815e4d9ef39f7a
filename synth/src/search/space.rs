use std::fmt::{Debug, Formatter};
use std::ops::Index;

use hashbrown::HashMap;

use crate::program::{ProgramGraph, ProgramHash};
use crate::search::action::SynthAction;

/// Index of a node in the search space.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl From<NodeId> for usize {
    fn from(id: NodeId) -> Self {
        id.0
    }
}
impl From<usize> for NodeId {
    fn from(id: usize) -> Self {
        NodeId(id)
    }
}
impl Debug for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// A discovered configuration: the canonical graph realising the hash, the
/// minimal depth at which it was discovered, and whether it was explored.
pub struct SearchNode {
    pub hash: ProgramHash,
    pub graph: ProgramGraph,
    pub depth: u32,
    pub explored: bool,
}

/// A labelled transition between two configurations.
pub struct SearchEdge {
    pub source: NodeId,
    pub target: NodeId,
    pub action: SynthAction,
}

/// The search-state graph: one node per reachable program hash, labelled
/// edges, and the frontier of discovered, unexplored, incomplete nodes in
/// insertion order. Lives for the duration of one enumeration.
#[derive(Default)]
pub struct SearchSpace {
    index: HashMap<ProgramHash, NodeId>,
    nodes: Vec<SearchNode>,
    edges: Vec<SearchEdge>,
    frontier: Vec<NodeId>,
}

impl SearchSpace {
    pub fn new() -> SearchSpace {
        SearchSpace::default()
    }

    pub fn lookup(&self, hash: &ProgramHash) -> Option<NodeId> {
        self.index.get(hash).copied()
    }

    /// Registers a configuration first discovered at the given depth.
    /// Incomplete nodes join the frontier.
    pub fn insert(&mut self, hash: ProgramHash, graph: ProgramGraph, depth: u32) -> NodeId {
        debug_assert!(self.lookup(&hash).is_none(), "configuration already registered");
        let id = NodeId(self.nodes.len());
        self.index.insert(hash.clone(), id);
        let incomplete = !graph.is_complete();
        self.nodes.push(SearchNode {
            hash,
            graph,
            depth,
            explored: false,
        });
        if incomplete {
            self.frontier.push(id);
        }
        tracing::trace!(node = ?id, depth, "discovered configuration");
        id
    }

    /// Lowers the recorded depth of a node if the candidate depth is smaller.
    pub fn tighten_depth(&mut self, id: NodeId, depth: u32) {
        let node = &mut self.nodes[id.0];
        if depth < node.depth {
            node.depth = depth;
        }
    }

    /// Flags the node as explored and drops it from the frontier.
    pub fn mark_explored(&mut self, id: NodeId) {
        self.nodes[id.0].explored = true;
        self.frontier.retain(|&n| n != id);
    }

    pub fn add_edge(&mut self, source: NodeId, target: NodeId, action: SynthAction) {
        self.edges.push(SearchEdge { source, target, action });
    }

    /// Discovered, unexplored, incomplete nodes in insertion order.
    pub fn frontier(&self) -> &[NodeId] {
        &self.frontier
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[SearchEdge] {
        &self.edges
    }
}

impl Index<NodeId> for SearchSpace {
    type Output = SearchNode;

    fn index(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }
}

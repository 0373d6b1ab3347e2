//! Node-link graph model

use serde::{Deserialize, Serialize};

/// Stable identifier for a node within one loaded graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One graph node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub name: String,
    /// Weight driving the size encoding (e.g. scene count)
    pub weight: f64,
    /// Base color supplied by the dataset, if any
    pub colour: Option<[u8; 3]>,
}

/// One undirected edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: NodeId,
    pub target: NodeId,
    /// Weight driving the width encoding and threshold filtering
    pub weight: f64,
}

impl GraphEdge {
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// A loaded node-link dataset, shared immutably across views
#[derive(Debug, Clone, Default)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn node(&self, id: NodeId) -> Option<&GraphNode> {
        self.nodes.get(id.index())
    }

    /// Iterate nodes together with their stable ids
    pub fn iter_nodes(&self) -> impl Iterator<Item = (NodeId, &GraphNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    /// Number of edges incident to a node
    pub fn degree(&self, id: NodeId) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// Whether two nodes share an edge
    pub fn adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.edges
            .iter()
            .any(|e| (e.source == a && e.target == b) || (e.source == b && e.target == a))
    }

    /// Indices of edges with weight at or above a threshold
    pub fn edges_at_least(&self, threshold: f64) -> Vec<usize> {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.weight >= threshold)
            .map(|(i, _)| i)
            .collect()
    }
}

//! Node-link JSON loader
//!
//! Reads the `{ "nodes": [...], "links": [...] }` interaction format
//! where links reference nodes by index.

use std::io::Read;

use serde::Deserialize;
use tracing::{info, warn};

use super::{parse_colour, DataError};
use crate::graph::{GraphData, GraphEdge, GraphNode, NodeId};

#[derive(Debug, Deserialize)]
struct RawGraph {
    nodes: Vec<RawNode>,
    links: Vec<RawLink>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    name: String,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    colour: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: usize,
    target: usize,
    #[serde(default = "default_link_weight")]
    value: f64,
}

fn default_link_weight() -> f64 {
    1.0
}

/// Load a graph dataset from JSON. Links with out-of-range endpoints or
/// non-finite weights are dropped; the load only fails on I/O or JSON
/// structure errors.
pub fn read_graph_json<R: Read>(reader: R) -> Result<GraphData, DataError> {
    let raw: RawGraph = serde_json::from_reader(reader)?;

    let nodes: Vec<GraphNode> = raw
        .nodes
        .into_iter()
        .map(|n| GraphNode {
            weight: if n.value.is_finite() { n.value } else { 0.0 },
            colour: n.colour.as_deref().and_then(parse_colour),
            name: n.name,
        })
        .collect();

    let mut edges = Vec::with_capacity(raw.links.len());
    let mut dropped = 0usize;
    for link in raw.links {
        if link.source >= nodes.len() || link.target >= nodes.len() || !link.value.is_finite() {
            dropped += 1;
            continue;
        }
        edges.push(GraphEdge {
            source: NodeId(link.source as u32),
            target: NodeId(link.target as u32),
            weight: link.value,
        });
    }

    if dropped > 0 {
        warn!(dropped, "some links referenced missing nodes");
    }
    info!(nodes = nodes.len(), edges = edges.len(), "loaded graph dataset");
    Ok(GraphData { nodes, edges })
}

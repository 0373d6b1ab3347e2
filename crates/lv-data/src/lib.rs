//! Data ingestion for the linked-view visualization engine
//!
//! Loads point datasets from delimited text and node-link graphs from
//! JSON, validating field by field. A malformed row is dropped, never a
//! reason to abort the whole load.

pub mod graph;
pub mod ingest;

pub use graph::{GraphData, GraphEdge, GraphNode, NodeId};
pub use ingest::{read_graph_json, read_points_csv, DataError, DATE_FORMAT};

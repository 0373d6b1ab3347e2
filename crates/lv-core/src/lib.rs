//! Core functionality for the linked-view visualization engine
//!
//! This crate provides the shared data model, the data<->screen scale
//! model, redraw scheduling and cross-view link registration that the
//! view crates build on.

pub mod error;
pub mod events;
pub mod link;
pub mod record;
pub mod scale;

// Re-export commonly used types
pub use error::EngineError;
pub use events::{EngineEvent, EventBus, EventSink, RedrawScheduler};
pub use link::{LinkManager, ViewLinkSettings};
pub use record::{Axis, Dataset, Record, RecordId};
pub use scale::{Scale, ScaleKind};

/// Unique identifier for a rendered view
pub type ViewId = uuid::Uuid;

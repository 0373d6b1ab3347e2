//! View implementations for the linked-view visualization engine
//!
//! Each view owns its interaction state and produces a [`Scene`] per
//! redraw; hit-testing, analytics and style resolution live here as
//! pure building blocks the view aggregates wire together.

pub mod analytics;
pub mod coordinator;
pub mod drag;
pub mod layout;
pub mod network_view;
pub mod scatter_view;
pub mod scene;
pub mod style;
pub mod transform;
pub mod view_state;

// Re-export commonly used types
pub use analytics::{Quadrant, DEFAULT_NEIGHBOR_K};
pub use coordinator::{FocusContextLink, SharedControls, VisibleSetListener};
pub use drag::DragController;
pub use hit_test::{Projector, DEFAULT_HIT_RADIUS_PX};
pub use layout::{ForceLayout, ForceParams, SpringSimulation};
pub use network_view::NetworkView;
pub use scatter_view::{PlotGeometry, ScatterView};
pub use scene::{Color, Scene, SceneEdge, ScenePoint};
pub use style::{EncodingToggles, PointStyle, StylePalette};
pub use transform::{ViewTransform, GRAPH_SCALE_EXTENT, PLOT_SCALE_EXTENT};
pub use view_state::{SelectionState, ViewState};

//! Per-view interaction state
//!
//! All mutable interaction state lives in an explicit [`ViewState`]
//! owned by its view and passed into handlers; nothing is ambient. The
//! selection holds at most one origin (left click) and one probe
//! (alternate click), toggled independently. Generic over the element
//! id so plot views select records and graph views select nodes with
//! the same toggle rules.

use std::fmt::Debug;

use lv_core::ViewId;
use serde_json::{json, Value};
use tracing::debug;

use crate::style::EncodingToggles;
use crate::transform::ViewTransform;

/// Origin/probe selection for one view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionState<Id> {
    /// Reference point for quadrant classification
    pub origin: Option<Id>,
    /// Reference point for neighbor highlighting
    pub probe: Option<Id>,
}

impl<Id> Default for SelectionState<Id> {
    fn default() -> Self {
        Self {
            origin: None,
            probe: None,
        }
    }
}

/// Interaction state owned by one rendered view
#[derive(Debug, Clone)]
pub struct ViewState<Id> {
    pub id: ViewId,
    pub selection: SelectionState<Id>,
    /// Quadrant recoloring is active only while an origin exists
    pub quadrant_mode: bool,
    pub encoding: EncodingToggles,
    pub transform: ViewTransform,
}

impl<Id: Copy + PartialEq + Debug> ViewState<Id> {
    pub fn new(scale_extent: (f64, f64)) -> Self {
        Self {
            id: ViewId::new_v4(),
            selection: SelectionState::default(),
            quadrant_mode: false,
            encoding: EncodingToggles::default(),
            transform: ViewTransform::new(scale_extent),
        }
    }

    /// Left-click selection. Clicking the current origin clears it and
    /// every mode depending on it; clicking a different element replaces
    /// it. A click that hit nothing changes nothing. Returns whether
    /// state changed.
    pub fn click(&mut self, hit: Option<Id>) -> bool {
        let Some(element) = hit else {
            return false;
        };
        if self.selection.origin == Some(element) {
            self.selection.origin = None;
            self.quadrant_mode = false;
            debug!(view = %self.id, ?element, "origin cleared");
        } else {
            self.selection.origin = Some(element);
            self.quadrant_mode = true;
            debug!(view = %self.id, ?element, "origin selected");
        }
        true
    }

    /// Alternate-click selection driving neighbor highlighting. Fully
    /// independent of the origin: both may be active at once, and
    /// toggling one never clears the other.
    pub fn alt_click(&mut self, hit: Option<Id>) -> bool {
        let Some(element) = hit else {
            return false;
        };
        if self.selection.probe == Some(element) {
            self.selection.probe = None;
            debug!(view = %self.id, ?element, "probe cleared");
        } else {
            self.selection.probe = Some(element);
            debug!(view = %self.id, ?element, "probe selected");
        }
        true
    }

    /// Dataset reload invalidates every element id held here.
    pub fn clear_selection(&mut self) {
        self.selection = SelectionState::default();
        self.quadrant_mode = false;
    }

    pub fn save_config(&self) -> Value {
        json!({
            "size_by_weight": self.encoding.size_by_weight,
            "width_by_weight": self.encoding.width_by_weight,
            "zoom": self.transform.scale(),
        })
    }

    pub fn load_config(&mut self, config: Value) {
        if let Some(v) = config.get("size_by_weight").and_then(|v| v.as_bool()) {
            self.encoding.size_by_weight = v;
        }
        if let Some(v) = config.get("width_by_weight").and_then(|v| v.as_bool()) {
            self.encoding.width_by_weight = v;
        }
        if let Some(v) = config.get("zoom").and_then(|v| v.as_f64()) {
            self.transform.set_scale(v);
        }
    }
}

//! Linked-view coordination
//!
//! Keeps a context (overview) pane and a focus (detail) pane of one
//! dataset consistent, and routes shared-control changes to the views
//! that declared themselves linked. Brushing operates on scale domains;
//! zooming operates on view transforms. The two never touch the same
//! state.

use std::sync::{Arc, Weak};

use ahash::AHashMap;
use lv_core::{
    scale, Axis, Dataset, EngineEvent, EventBus, LinkManager, RecordId, RedrawScheduler, Scale,
    ScaleKind, ViewId,
};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::style::EncodingToggles;
use crate::view_state::ViewState;

/// External collaborator tracking which records are currently visible
/// in the focus view (e.g. a linked map)
pub trait VisibleSetListener: Send + Sync {
    fn visible_set_changed(&self, ids: &[RecordId]);
}

struct BrushState {
    focus_domain: (f64, f64),
    brush_px: Option<(f64, f64)>,
}

/// Brush-to-domain coordinator between one context view and one focus
/// view.
///
/// The context scale spans the full data extent and never changes while
/// brushing; every brush movement is inverted through it to produce the
/// focus view's new domain window.
///
/// Brush movements store the domain here and request a focus redraw.
/// The focus view must pull the stored domain before painting that
/// frame (`ScatterView::follow_brush`); a paint that drains the redraw
/// without it would show a stale domain.
pub struct FocusContextLink {
    focus_view: ViewId,
    context_scale: Scale,
    state: RwLock<BrushState>,
    listeners: RwLock<Vec<Weak<dyn VisibleSetListener>>>,
    redraw: Arc<RedrawScheduler>,
    events: Arc<EventBus>,
}

impl FocusContextLink {
    pub fn new(
        context_scale: Scale,
        focus_view: ViewId,
        redraw: Arc<RedrawScheduler>,
        events: Arc<EventBus>,
    ) -> Self {
        Self {
            focus_view,
            context_scale,
            state: RwLock::new(BrushState {
                focus_domain: context_scale.domain(),
                brush_px: None,
            }),
            listeners: RwLock::new(Vec::new()),
            redraw,
            events,
        }
    }

    pub fn add_listener(&self, listener: Arc<dyn VisibleSetListener>) {
        self.listeners.write().push(Arc::downgrade(&listener));
    }

    /// The context scale the brush operates over
    pub fn context_scale(&self) -> &Scale {
        &self.context_scale
    }

    /// Current focus-domain window
    pub fn focus_domain(&self) -> (f64, f64) {
        self.state.read().focus_domain
    }

    pub fn brush_px(&self) -> Option<(f64, f64)> {
        self.state.read().brush_px
    }

    /// Brush movement: invert the pixel interval through the context
    /// scale and assign the result as the focus domain.
    pub fn brush_moved(&self, px0: f64, px1: f64) {
        let (lo, hi) = if px0 <= px1 { (px0, px1) } else { (px1, px0) };
        let domain = (
            self.context_scale.to_domain(lo),
            self.context_scale.to_domain(hi),
        );
        {
            let mut state = self.state.write();
            state.brush_px = Some((lo, hi));
            state.focus_domain = domain;
        }
        debug!(view = %self.focus_view, ?domain, "brush moved");
        self.events.publish(EngineEvent::DomainChanged {
            view: self.focus_view,
            domain,
        });
        self.redraw.request(self.focus_view);
    }

    /// Gesture release: recompute which records fall inside the focus
    /// domain and notify visible-set listeners.
    pub fn brush_ended(&self, dataset: &Dataset, x_kind: ScaleKind) {
        let (lo, hi) = self.focus_domain();
        let ids: Vec<RecordId> = dataset
            .iter()
            .filter_map(|(id, record)| {
                let v = scale::axis_value(record, Axis::X, x_kind)?;
                (v >= lo && v <= hi).then_some(id)
            })
            .collect();

        info!(view = %self.focus_view, visible = ids.len(), "brush ended");
        let mut listeners = self.listeners.write();
        listeners.retain(|weak| weak.strong_count() > 0);
        for weak in listeners.iter() {
            if let Some(listener) = weak.upgrade() {
                listener.visible_set_changed(&ids);
            }
        }
        self.events.publish(EngineEvent::VisibleSetChanged { ids });
        self.redraw.request(self.focus_view);
    }

    /// An empty brush selection restores the full context domain.
    pub fn brush_cleared(&self) {
        let domain = self.context_scale.domain();
        {
            let mut state = self.state.write();
            state.brush_px = None;
            state.focus_domain = domain;
        }
        self.events.publish(EngineEvent::DomainChanged {
            view: self.focus_view,
            domain,
        });
        self.redraw.request(self.focus_view);
    }
}

/// Shared-control routing: threshold filters and encoding toggles.
///
/// A threshold change applies to the view it was issued on plus every
/// view registered as filter-linked; sibling views keep their own
/// derived sets untouched.
pub struct SharedControls {
    links: Arc<LinkManager>,
    redraw: Arc<RedrawScheduler>,
    thresholds: RwLock<AHashMap<ViewId, f64>>,
}

impl SharedControls {
    pub fn new(links: Arc<LinkManager>, redraw: Arc<RedrawScheduler>) -> Self {
        Self {
            links,
            redraw,
            thresholds: RwLock::new(AHashMap::new()),
        }
    }

    /// Apply an edge-weight threshold. Returns the views it reached.
    pub fn set_edge_threshold(&self, origin: ViewId, threshold: f64) -> Vec<ViewId> {
        let targets = self.links.filter_targets(origin);
        let mut thresholds = self.thresholds.write();
        for &view in &targets {
            thresholds.insert(view, threshold);
            self.redraw.request(view);
        }
        debug!(%origin, threshold, targets = targets.len(), "threshold updated");
        targets
    }

    /// Active threshold for a view; unfiltered views see everything.
    pub fn edge_threshold(&self, view: ViewId) -> f64 {
        self.thresholds.read().get(&view).copied().unwrap_or(0.0)
    }

    /// Flip the weight-driven encodings for one view. Style-only: the
    /// next redraw recomputes style attributes, no hit-testing or
    /// analytics runs here.
    pub fn set_encoding<Id>(&self, view: &mut ViewState<Id>, toggles: EncodingToggles) {
        view.encoding = toggles;
        self.redraw.request(view.id);
    }
}

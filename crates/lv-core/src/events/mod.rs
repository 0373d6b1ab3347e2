//! Engine events and redraw scheduling
//!
//! State mutation and painting are decoupled: handlers commit a change,
//! then ask the [`RedrawScheduler`] for a repaint. Requests are
//! idempotent and coalesce until the renderer drains them once per
//! frame, so a burst of changes costs one redraw but is never dropped.

use std::sync::{Arc, Weak};

use ahash::AHashSet;
use parking_lot::{Mutex, RwLock};

use crate::record::RecordId;
use crate::ViewId;

/// Notifications published by the engine
#[derive(Debug, Clone)]
pub enum EngineEvent {
    /// A dataset was replaced wholesale
    DatasetReloaded { generation: u64, records: usize },

    /// A view's origin or probe selection changed
    SelectionChanged { view: ViewId },

    /// A view's axis domain changed (brush-driven)
    DomainChanged { view: ViewId, domain: (f64, f64) },

    /// The set of records inside the focus domain changed (brush end)
    VisibleSetChanged { ids: Vec<RecordId> },
}

/// Receiver for engine events
pub trait EventSink: Send + Sync {
    fn on_event(&self, event: &EngineEvent);
}

/// System-wide event bus.
///
/// Sinks are held weakly; dropped subscribers are pruned on the next
/// publish.
#[derive(Default)]
pub struct EventBus {
    sinks: RwLock<Vec<Weak<dyn EventSink>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, sink: Arc<dyn EventSink>) {
        self.sinks.write().push(Arc::downgrade(&sink));
    }

    pub fn publish(&self, event: EngineEvent) {
        let mut sinks = self.sinks.write();
        sinks.retain(|weak| weak.strong_count() > 0);
        for weak in sinks.iter() {
            if let Some(sink) = weak.upgrade() {
                sink.on_event(&event);
            }
        }
    }
}

/// Coalescing redraw requests, drained once per paint
#[derive(Default)]
pub struct RedrawScheduler {
    pending: Mutex<AHashSet<ViewId>>,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a repaint of one view. Requesting an already-pending view
    /// is a no-op.
    pub fn request(&self, view: ViewId) {
        self.pending.lock().insert(view);
    }

    /// Views with committed changes since the last drain
    pub fn take_pending(&self) -> Vec<ViewId> {
        self.pending.lock().drain().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redraw_requests_coalesce_but_are_not_dropped() {
        let scheduler = RedrawScheduler::new();
        let a = ViewId::new_v4();
        let b = ViewId::new_v4();

        scheduler.request(a);
        scheduler.request(a);
        scheduler.request(b);

        let mut pending = scheduler.take_pending();
        pending.sort();
        let mut expected = vec![a, b];
        expected.sort();
        assert_eq!(pending, expected);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn dead_sinks_are_pruned() {
        struct Counter(Mutex<usize>);
        impl EventSink for Counter {
            fn on_event(&self, _: &EngineEvent) {
                *self.0.lock() += 1;
            }
        }

        let bus = EventBus::new();
        let kept = Arc::new(Counter(Mutex::new(0)));
        bus.subscribe(kept.clone());
        {
            let dropped = Arc::new(Counter(Mutex::new(0)));
            bus.subscribe(dropped.clone());
        }

        bus.publish(EngineEvent::DatasetReloaded {
            generation: 1,
            records: 3,
        });
        assert_eq!(*kept.0.lock(), 1);
    }
}

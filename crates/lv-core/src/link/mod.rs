//! Cross-view link registration
//!
//! Views render one shared dataset but act independently by default: a
//! filter applied to one view leaves its siblings untouched unless they
//! were explicitly registered as linked for that concern.

use ahash::AHashMap;
use parking_lot::RwLock;

use crate::ViewId;

/// Link settings for a specific view
#[derive(Debug, Clone, Copy)]
pub struct ViewLinkSettings {
    /// Whether this view follows shared filter changes (e.g. the edge
    /// weight threshold)
    pub link_filter: bool,

    /// Whether this view follows another view's selection
    pub link_selection: bool,
}

impl Default for ViewLinkSettings {
    fn default() -> Self {
        Self {
            link_filter: false,
            link_selection: false,
        }
    }
}

/// Registry of per-view link settings
#[derive(Default)]
pub struct LinkManager {
    settings: RwLock<AHashMap<ViewId, ViewLinkSettings>>,
}

impl LinkManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_view(&self, view: ViewId, settings: ViewLinkSettings) {
        self.settings.write().insert(view, settings);
    }

    pub fn unregister_view(&self, view: ViewId) {
        self.settings.write().remove(&view);
    }

    pub fn links_filter(&self, view: ViewId) -> bool {
        self.settings
            .read()
            .get(&view)
            .map(|s| s.link_filter)
            .unwrap_or(false)
    }

    pub fn links_selection(&self, view: ViewId) -> bool {
        self.settings
            .read()
            .get(&view)
            .map(|s| s.link_selection)
            .unwrap_or(false)
    }

    /// The views a filter change on `origin` must be applied to: the
    /// origin itself plus every registered view linked for filters.
    pub fn filter_targets(&self, origin: ViewId) -> Vec<ViewId> {
        let settings = self.settings.read();
        let mut targets = vec![origin];
        for (&view, s) in settings.iter() {
            if view != origin && s.link_filter {
                targets.push(view);
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_views_are_not_filter_targets() {
        let links = LinkManager::new();
        let a = ViewId::new_v4();
        let b = ViewId::new_v4();
        links.register_view(a, ViewLinkSettings::default());
        links.register_view(b, ViewLinkSettings::default());

        assert_eq!(links.filter_targets(a), vec![a]);
    }

    #[test]
    fn linked_views_follow_filter_changes() {
        let links = LinkManager::new();
        let a = ViewId::new_v4();
        let b = ViewId::new_v4();
        links.register_view(a, ViewLinkSettings::default());
        links.register_view(
            b,
            ViewLinkSettings {
                link_filter: true,
                link_selection: false,
            },
        );

        let targets = links.filter_targets(a);
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&a) && targets.contains(&b));
        // Unregistered views never participate.
        links.unregister_view(b);
        assert_eq!(links.filter_targets(a), vec![a]);
    }
}

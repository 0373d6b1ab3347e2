//! Scatter view with a focus pane and a context pane
//!
//! Both panes draw the same shared dataset. The context pane keeps the
//! full data extent; the focus pane's x domain follows the brush. Scene
//! building recomputes quadrant membership and neighbor sets from the
//! live selection on every pass, so stale caches cannot survive a
//! dataset reload.

use std::collections::BTreeSet;
use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use lv_core::{
    scale, Axis, Dataset, EngineError, EngineEvent, EventBus, RecordId, RedrawScheduler, Scale,
    ScaleKind,
};
use nalgebra::{Point2, Vector2};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::analytics::{self, Quadrant, DEFAULT_NEIGHBOR_K};
use crate::coordinator::FocusContextLink;
use crate::hit_test::{self, Projector, DEFAULT_HIT_RADIUS_PX};
use crate::scene::{Scene, ScenePoint};
use crate::style::{self, StylePalette};
use crate::transform::PLOT_SCALE_EXTENT;
use crate::view_state::ViewState;

/// Pixel ranges of the two panes. Y ranges are inverted per screen
/// convention.
#[derive(Debug, Clone, Copy)]
pub struct PlotGeometry {
    pub focus_x: (f64, f64),
    pub focus_y: (f64, f64),
    pub context_x: (f64, f64),
    pub context_y: (f64, f64),
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            focus_x: (40.0, 760.0),
            focus_y: (400.0, 20.0),
            context_x: (40.0, 760.0),
            context_y: (470.0, 430.0),
        }
    }
}

/// Interactive scatter plot over the shared dataset
pub struct ScatterView {
    pub state: ViewState<RecordId>,
    data: Arc<RwLock<Dataset>>,
    x_kind: ScaleKind,
    geometry: PlotGeometry,
    x_scale: Scale,
    y_scale: Scale,
    context_x: Scale,
    palette: StylePalette,
    categories: Vec<String>,
    redraw: Arc<RedrawScheduler>,
    events: Arc<EventBus>,
}

impl ScatterView {
    pub fn new(
        data: Arc<RwLock<Dataset>>,
        x_kind: ScaleKind,
        geometry: PlotGeometry,
        redraw: Arc<RedrawScheduler>,
        events: Arc<EventBus>,
    ) -> Result<Self, EngineError> {
        let (x_scale, y_scale, context_x, categories) = {
            let dataset = data.read();
            let x = Scale::build(&dataset, Axis::X, x_kind, geometry.focus_x)?;
            let y = Scale::build(&dataset, Axis::Y, ScaleKind::Linear, geometry.focus_y)?;
            let cx = Scale::build(&dataset, Axis::X, x_kind, geometry.context_x)?;
            (x, y, cx, Self::category_order(&dataset))
        };
        let view = Self {
            state: ViewState::new(PLOT_SCALE_EXTENT),
            data,
            x_kind,
            geometry,
            x_scale,
            y_scale,
            context_x,
            palette: StylePalette::default(),
            categories,
            redraw,
            events,
        };
        info!(view = %view.state.id, categories = view.categories.len(), "scatter view ready");
        Ok(view)
    }

    /// Deterministic category ordering so a category keeps its color
    /// across reloads that preserve the category set.
    fn category_order(dataset: &Dataset) -> Vec<String> {
        let set: BTreeSet<&str> = dataset.iter().map(|(_, r)| r.category.as_str()).collect();
        set.into_iter().map(String::from).collect()
    }

    fn category_index(&self, category: &str) -> usize {
        self.categories
            .iter()
            .position(|c| c == category)
            .unwrap_or(0)
    }

    fn projector(&self) -> Projector<'_> {
        Projector {
            x_scale: &self.x_scale,
            y_scale: &self.y_scale,
            x_kind: self.x_kind,
            transform: &self.state.transform,
        }
    }

    /// The scale the brush coordinator inverts pixel intervals through
    pub fn context_scale(&self) -> Scale {
        self.context_x
    }

    pub fn x_kind(&self) -> ScaleKind {
        self.x_kind
    }

    /// Left click at a screen position.
    pub fn on_click(&mut self, pointer: Point2<f64>) {
        let dataset = self.data.read();
        let hit = hit_test::hit_test(pointer, &dataset, &self.projector(), DEFAULT_HIT_RADIUS_PX);
        drop(dataset);
        if self.state.click(hit) {
            self.events.publish(EngineEvent::SelectionChanged {
                view: self.state.id,
            });
            self.redraw.request(self.state.id);
        }
    }

    /// Alternate click at a screen position, toggling the probe.
    pub fn on_alt_click(&mut self, pointer: Point2<f64>) {
        let dataset = self.data.read();
        let hit = hit_test::hit_test(pointer, &dataset, &self.projector(), DEFAULT_HIT_RADIUS_PX);
        drop(dataset);
        if self.state.alt_click(hit) {
            self.events.publish(EngineEvent::SelectionChanged {
                view: self.state.id,
            });
            self.redraw.request(self.state.id);
        }
    }

    /// Wheel zoom anchored at the pointer.
    pub fn on_wheel(&mut self, factor: f64, anchor: Point2<f64>) {
        self.state.transform.zoom_by(factor, anchor);
        self.redraw.request(self.state.id);
    }

    pub fn on_pan(&mut self, delta: Vector2<f64>) {
        self.state.transform.pan_by(delta);
        self.redraw.request(self.state.id);
    }

    /// Brush-driven focus window from the coordinator.
    pub fn apply_focus_domain(&mut self, domain: (f64, f64)) {
        self.x_scale.set_domain(domain);
        debug!(view = %self.state.id, ?domain, "focus domain applied");
    }

    /// Pull the brush coordinator's current focus window into this
    /// view. Call before painting a frame whose redraw the brush
    /// requested, so the drained repaint and the domain it was
    /// requested for cannot diverge.
    pub fn follow_brush(&mut self, link: &FocusContextLink) {
        self.apply_focus_domain(link.focus_domain());
    }

    /// Dataset reload: rebuild scales, drop every held record id.
    pub fn reload(&mut self) -> Result<(), EngineError> {
        let dataset = self.data.read();
        self.x_scale = Scale::build(&dataset, Axis::X, self.x_kind, self.geometry.focus_x)?;
        self.y_scale = Scale::build(&dataset, Axis::Y, ScaleKind::Linear, self.geometry.focus_y)?;
        self.context_x = Scale::build(&dataset, Axis::X, self.x_kind, self.geometry.context_x)?;
        self.categories = Self::category_order(&dataset);
        let generation = dataset.generation();
        let records = dataset.len();
        drop(dataset);
        self.state.clear_selection();
        self.events.publish(EngineEvent::DatasetReloaded {
            generation,
            records,
        });
        self.redraw.request(self.state.id);
        Ok(())
    }

    /// Nearest neighbors of the current probe, nearest first.
    pub fn probe_neighbors(&self) -> Vec<(RecordId, f64)> {
        let dataset = self.data.read();
        analytics::nearest_neighbors(&dataset, self.state.selection.probe, DEFAULT_NEIGHBOR_K)
    }

    /// Build the focus pane scene from current state. Quadrant and
    /// neighbor sets are derived here, per pass.
    pub fn scene(&self) -> Scene {
        let dataset = self.data.read();

        let quadrants: AHashMap<RecordId, Quadrant> = if self.state.quadrant_mode {
            let partition =
                analytics::quadrant_partition(&dataset, self.state.selection.origin);
            let mut map = AHashMap::new();
            for (q, ids) in [
                Quadrant::PosPos,
                Quadrant::NegPos,
                Quadrant::NegNeg,
                Quadrant::PosNeg,
            ]
            .into_iter()
            .zip(partition)
            {
                for id in ids {
                    map.insert(id, q);
                }
            }
            map
        } else {
            AHashMap::new()
        };

        let neighbors: AHashSet<RecordId> =
            analytics::nearest_neighbors(&dataset, self.state.selection.probe, DEFAULT_NEIGHBOR_K)
                .into_iter()
                .map(|(id, _)| id)
                .collect();

        let (d0, d1) = self.x_scale.domain();
        let projector = self.projector();
        let mut scene = Scene::default();
        for (id, record) in dataset.iter() {
            let Some(v) = scale::axis_value(record, Axis::X, self.x_kind) else {
                continue;
            };
            if v < d0 || v > d1 {
                continue;
            }
            let Some(pos) = projector.project(record) else {
                continue;
            };
            let selected = self.state.selection.origin == Some(id)
                || self.state.selection.probe == Some(id);
            let style = style::resolve_point_style(
                &self.palette,
                self.category_index(&record.category),
                quadrants.get(&id).copied(),
                neighbors.contains(&id),
                selected,
                record.weight,
                self.state.encoding,
            );
            scene.points.push(ScenePoint {
                slot: id.0,
                pos,
                radius: style.radius,
                color: style.color,
                emphasized: style.emphasized,
            });
        }
        scene
    }

    /// Build the context pane scene: full extent, no transform, no
    /// selection styling.
    pub fn context_scene(&self) -> Scene {
        let dataset = self.data.read();
        let (y0, y1) = self.geometry.context_y;
        let mid_y = (y0 + y1) / 2.0;

        let mut scene = Scene::default();
        for (id, record) in dataset.iter() {
            let Some(v) = scale::axis_value(record, Axis::X, self.x_kind) else {
                continue;
            };
            scene.points.push(ScenePoint {
                slot: id.0,
                pos: Point2::new(self.context_x.to_screen(v), mid_y),
                radius: 2.0,
                color: self.palette.categorical
                    [self.category_index(&record.category) % self.palette.categorical.len()],
                emphasized: false,
            });
        }
        scene
    }
}

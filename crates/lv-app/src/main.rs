//! Headless demo driver
//!
//! Loads the bundled sample datasets and runs a scripted interaction
//! session against the scatter and network views, logging what a
//! renderer would be handed after each frame. Useful as an end-to-end
//! smoke test and as a wiring reference for embedders.

use std::io::Cursor;
use std::sync::Arc;

use anyhow::{Context, Result};
use nalgebra::Vector2;
use parking_lot::{Mutex, RwLock};
use tracing::info;

use lv_core::{
    EngineEvent, EventBus, EventSink, LinkManager, RedrawScheduler, ScaleKind, ViewLinkSettings,
};
use lv_data::{read_graph_json, read_points_csv};
use lv_views::{
    FocusContextLink, ForceParams, NetworkView, PlotGeometry, ScatterView, SharedControls,
    SpringSimulation, VisibleSetListener,
};

mod sample_data;

/// Event sink that mirrors engine events into the log
struct LogSink;

impl EventSink for LogSink {
    fn on_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::DatasetReloaded {
                generation,
                records,
            } => info!(generation, records, "dataset reloaded"),
            EngineEvent::SelectionChanged { view } => info!(%view, "selection changed"),
            EngineEvent::DomainChanged { view, domain } => {
                info!(%view, ?domain, "focus domain changed")
            }
            EngineEvent::VisibleSetChanged { ids } => info!(visible = ids.len(), "visible set"),
        }
    }
}

/// Stand-in for a linked map that consumes visible-set updates
#[derive(Default)]
struct MapStub {
    last_visible: Mutex<usize>,
}

impl VisibleSetListener for MapStub {
    fn visible_set_changed(&self, ids: &[lv_core::RecordId]) {
        *self.last_visible.lock() = ids.len();
        info!(points = ids.len(), "map updated");
    }
}

fn drain_frames(redraw: &RedrawScheduler, label: &str) {
    let pending = redraw.take_pending();
    info!(label, repaints = pending.len(), "frame drained");
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    info!("starting linkview demo");

    let points = read_points_csv(Cursor::new(sample_data::POINTS_CSV))
        .context("loading bundled point dataset")?;
    let dataset = Arc::new(RwLock::new(points));
    let graph = Arc::new(
        read_graph_json(Cursor::new(sample_data::GRAPH_JSON))
            .context("loading bundled graph dataset")?,
    );

    let redraw = Arc::new(RedrawScheduler::new());
    let events = Arc::new(EventBus::new());
    let links = Arc::new(LinkManager::new());

    let log_sink: Arc<LogSink> = Arc::new(LogSink);
    events.subscribe(log_sink.clone());

    let mut scatter = ScatterView::new(
        dataset.clone(),
        ScaleKind::temporal(),
        PlotGeometry::default(),
        redraw.clone(),
        events.clone(),
    )
    .context("building scatter view")?;
    let sim = SpringSimulation::with_seed(&graph, ForceParams::default(), 42);
    let mut network = NetworkView::new(graph, Box::new(sim), redraw.clone(), events.clone());

    // The network overview follows filter changes; the scatter does not.
    links.register_view(scatter.state.id, ViewLinkSettings::default());
    links.register_view(
        network.state.id,
        ViewLinkSettings {
            link_filter: true,
            link_selection: false,
        },
    );
    let controls = SharedControls::new(links, redraw.clone());

    let brush = FocusContextLink::new(
        scatter.context_scale(),
        scatter.state.id,
        redraw.clone(),
        events.clone(),
    );
    let map = Arc::new(MapStub::default());
    brush.add_listener(map.clone());

    // Click the first drawn point, probe the last one.
    let scene = scatter.scene();
    info!(points = scene.points.len(), "initial scatter scene");
    if let Some(point) = scene.points.first() {
        scatter.on_click(point.pos);
    }
    if let Some(point) = scene.points.last() {
        scatter.on_alt_click(point.pos);
    }
    for (id, dist) in scatter.probe_neighbors() {
        info!(?id, dist, "probe neighbor");
    }
    drain_frames(&redraw, "selection");

    // Brush the middle half of the context pane.
    let (r0, r1) = scatter.context_scale().range();
    brush.brush_moved(r0 + (r1 - r0) * 0.25, r0 + (r1 - r0) * 0.75);
    scatter.follow_brush(&brush);
    brush.brush_ended(&dataset.read(), scatter.x_kind());
    info!(
        focused = scatter.scene().points.len(),
        mapped = *map.last_visible.lock(),
        "after brush"
    );
    drain_frames(&redraw, "brush");

    // Raise the edge-weight threshold through the shared controls.
    for view in controls.set_edge_threshold(network.state.id, 5.0) {
        if view == network.state.id {
            network.set_edge_threshold(controls.edge_threshold(view));
        }
    }
    info!(edges = network.visible_edge_count(), "after threshold");

    // Let the layout run, then drag a node and release it.
    for _ in 0..120 {
        network.tick();
    }
    if let Some(start) = network.scene().point(0).map(|p| p.pos) {
        network.pointer_down(start);
        network.pointer_move(start + Vector2::new(60.0, -30.0));
        for _ in 0..30 {
            network.tick();
        }
        network.pointer_up();
    }
    for _ in 0..600 {
        network.tick();
    }
    let graph_scene = network.scene();
    info!(
        nodes = graph_scene.points.len(),
        edges = graph_scene.edges.len(),
        "settled network scene"
    );
    drain_frames(&redraw, "network");

    info!("demo complete");
    Ok(())
}

//! Force-directed node-link view
//!
//! Holds a shared immutable graph, a layout collaborator, and this
//! view's derived filter state. The weight threshold narrows the edge
//! set per view; the node set is never filtered, so an isolated node
//! stays visible and draggable.

use std::sync::Arc;

use lv_core::{EngineEvent, EventBus, RedrawScheduler};
use lv_data::{GraphData, NodeId};
use nalgebra::{Point2, Vector2};
use tracing::{debug, info};

use crate::drag::DragController;
use crate::hit_test;
use crate::layout::ForceLayout;
use crate::scene::{Scene, SceneEdge, ScenePoint};
use crate::style::{self, StylePalette};
use crate::transform::GRAPH_SCALE_EXTENT;
use crate::view_state::ViewState;

/// Extra pixels around a node accepted as a hit
const HIT_SLOP_PX: f64 = 5.0;

/// Interactive graph view over a shared node-link dataset
pub struct NetworkView {
    pub state: ViewState<NodeId>,
    data: Arc<GraphData>,
    layout: Box<dyn ForceLayout>,
    drag: DragController,
    palette: StylePalette,
    edge_threshold: f64,
    visible_edges: Vec<usize>,
    redraw: Arc<RedrawScheduler>,
    events: Arc<EventBus>,
}

impl NetworkView {
    pub fn new(
        data: Arc<GraphData>,
        layout: Box<dyn ForceLayout>,
        redraw: Arc<RedrawScheduler>,
        events: Arc<EventBus>,
    ) -> Self {
        let visible_edges = data.edges_at_least(0.0);
        let view = Self {
            state: ViewState::new(GRAPH_SCALE_EXTENT),
            data,
            layout,
            drag: DragController::new(),
            palette: StylePalette::default(),
            edge_threshold: 0.0,
            visible_edges,
            redraw,
            events,
        };
        info!(
            view = %view.state.id,
            nodes = view.data.nodes.len(),
            edges = view.data.edges.len(),
            "network view ready"
        );
        view
    }

    pub fn edge_threshold(&self) -> f64 {
        self.edge_threshold
    }

    /// Visible edge count after the threshold filter
    pub fn visible_edge_count(&self) -> usize {
        self.visible_edges.len()
    }

    /// Apply a weight threshold to this view's edge set. Nodes are
    /// untouched.
    pub fn set_edge_threshold(&mut self, threshold: f64) {
        self.edge_threshold = threshold;
        self.visible_edges = self.data.edges_at_least(threshold);
        debug!(
            view = %self.state.id,
            threshold,
            visible = self.visible_edges.len(),
            "edge threshold applied"
        );
        self.redraw.request(self.state.id);
    }

    fn node_radius(&self, id: NodeId) -> f64 {
        let weight = self.data.node(id).map(|n| n.weight);
        style::point_radius(weight, self.state.encoding)
    }

    fn node_screen_pos(&self, id: NodeId) -> Option<Point2<f64>> {
        self.layout
            .position(id)
            .map(|p| self.state.transform.apply(p))
    }

    /// Node under the pointer, nearest first, with a slop margin added
    /// to each node's drawn radius.
    pub fn hit(&self, pointer: Point2<f64>) -> Option<NodeId> {
        hit_test::nearest_within(
            pointer,
            self.data.iter_nodes().filter_map(|(id, _)| {
                let pos = self.node_screen_pos(id)?;
                Some((id, pos, self.node_radius(id) + HIT_SLOP_PX))
            }),
        )
    }

    /// Pointer press: a hit starts a drag and pins the node.
    pub fn pointer_down(&mut self, pointer: Point2<f64>) {
        let hit = self.hit(pointer);
        if self.drag.pointer_down(hit, self.layout.as_mut()) {
            self.redraw.request(self.state.id);
        }
    }

    /// Pointer movement: an active drag re-pins the node under the
    /// pointer's data-space position.
    pub fn pointer_move(&mut self, pointer: Point2<f64>) {
        if self.drag.dragged_node().is_some() {
            let data_pos = self.state.transform.invert(pointer);
            self.drag.pointer_move(data_pos, self.layout.as_mut());
            self.redraw.request(self.state.id);
        }
    }

    /// Pointer release, wherever it lands.
    pub fn pointer_up(&mut self) {
        if self.drag.pointer_up(self.layout.as_mut()) {
            self.redraw.request(self.state.id);
        }
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        self.drag.dragged_node()
    }

    /// Click selection, toggling the origin node.
    pub fn on_click(&mut self, pointer: Point2<f64>) {
        let hit = self.hit(pointer);
        if self.state.click(hit) {
            self.events.publish(EngineEvent::SelectionChanged {
                view: self.state.id,
            });
            self.redraw.request(self.state.id);
        }
    }

    pub fn on_alt_click(&mut self, pointer: Point2<f64>) {
        let hit = self.hit(pointer);
        if self.state.alt_click(hit) {
            self.events.publish(EngineEvent::SelectionChanged {
                view: self.state.id,
            });
            self.redraw.request(self.state.id);
        }
    }

    pub fn on_wheel(&mut self, factor: f64, anchor: Point2<f64>) {
        self.state.transform.zoom_by(factor, anchor);
        self.redraw.request(self.state.id);
    }

    pub fn on_pan(&mut self, delta: Vector2<f64>) {
        self.state.transform.pan_by(delta);
        self.redraw.request(self.state.id);
    }

    /// Advance the layout one tick. Requests a redraw while the
    /// simulation is in motion, so a settled layout stops repainting.
    pub fn tick(&mut self) {
        self.layout.step();
        if !self.layout.is_cooled() || self.drag.dragged_node().is_some() {
            self.redraw.request(self.state.id);
        }
    }

    fn is_highlight_node(&self, id: NodeId) -> bool {
        self.state.selection.origin == Some(id) || self.state.selection.probe == Some(id)
    }

    /// Build this view's scene: filtered edges under all nodes.
    pub fn scene(&self) -> Scene {
        let mut scene = Scene::default();

        for &idx in &self.visible_edges {
            let edge = self.data.edges[idx];
            let (Some(from), Some(to)) = (
                self.node_screen_pos(edge.source),
                self.node_screen_pos(edge.target),
            ) else {
                continue;
            };
            let highlighted =
                self.is_highlight_node(edge.source) || self.is_highlight_node(edge.target);
            scene.edges.push(SceneEdge {
                from,
                to,
                width: style::edge_width(edge.weight, self.state.encoding),
                color: if highlighted {
                    self.palette.edge_highlight
                } else {
                    self.palette.edge_base
                },
            });
        }

        for (id, node) in self.data.iter_nodes() {
            let Some(pos) = self.node_screen_pos(id) else {
                continue;
            };
            scene.points.push(ScenePoint {
                slot: id.0,
                pos,
                radius: self.node_radius(id),
                color: node
                    .colour
                    .unwrap_or_else(|| self.palette.categorical_color(id.index())),
                emphasized: self.is_highlight_node(id),
            });
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ForceParams, SpringSimulation};
    use crate::style::{BASE_EDGE_WIDTH, BASE_POINT_RADIUS};
    use lv_data::{GraphEdge, GraphNode};

    fn sample_graph() -> Arc<GraphData> {
        Arc::new(GraphData {
            nodes: vec![
                GraphNode {
                    name: "a".into(),
                    weight: 4.0,
                    colour: None,
                },
                GraphNode {
                    name: "b".into(),
                    weight: 9.0,
                    colour: None,
                },
                GraphNode {
                    name: "c".into(),
                    weight: 1.0,
                    colour: None,
                },
            ],
            edges: vec![
                GraphEdge {
                    source: NodeId(0),
                    target: NodeId(1),
                    weight: 3.0,
                },
                GraphEdge {
                    source: NodeId(1),
                    target: NodeId(2),
                    weight: 7.0,
                },
            ],
        })
    }

    fn view() -> NetworkView {
        let data = sample_graph();
        let layout = Box::new(SpringSimulation::with_seed(
            &data,
            ForceParams::default(),
            11,
        ));
        NetworkView::new(
            data,
            layout,
            Arc::new(RedrawScheduler::new()),
            Arc::new(EventBus::new()),
        )
    }

    #[test]
    fn threshold_narrows_edges_but_never_nodes() {
        let mut v = view();
        assert_eq!(v.scene().edges.len(), 2);

        v.set_edge_threshold(5.0);
        let scene = v.scene();
        assert_eq!(scene.edges.len(), 1);
        assert_eq!(scene.points.len(), 3);

        v.set_edge_threshold(0.0);
        assert_eq!(v.scene().edges.len(), 2);
    }

    #[test]
    fn drag_pins_and_follows_through_the_transform() {
        let mut v = view();
        v.on_wheel(2.0, Point2::origin());

        let start = v.scene().point(0).unwrap().pos;
        v.pointer_down(start);
        assert_eq!(v.dragged_node(), Some(NodeId(0)));

        let target = Point2::new(start.x + 40.0, start.y - 25.0);
        v.pointer_move(target);
        v.tick();
        let moved = v.scene().point(0).unwrap().pos;
        assert!((moved - target).norm() < 1e-9);

        v.pointer_up();
        assert_eq!(v.dragged_node(), None);
    }

    #[test]
    fn pointer_down_on_empty_space_starts_no_drag() {
        let mut v = view();
        // Layout positions sit within a few hundred px of the center.
        v.pointer_down(Point2::new(1e6, 1e6));
        assert_eq!(v.dragged_node(), None);
        v.pointer_up();
    }

    #[test]
    fn selected_node_highlights_its_incident_edges() {
        let mut v = view();
        let pos = v.scene().point(1).unwrap().pos;
        v.on_click(pos);
        assert_eq!(v.state.selection.origin, Some(NodeId(1)));

        let scene = v.scene();
        // Node 1 touches both edges.
        assert!(scene.edges.iter().all(|e| e.color == v.palette.edge_highlight));

        // Deselect: back to the base edge color.
        v.on_click(v.scene().point(1).unwrap().pos);
        let scene = v.scene();
        assert!(scene.edges.iter().all(|e| e.color == v.palette.edge_base));
    }

    #[test]
    fn encoding_toggles_swap_between_weighted_and_uniform() {
        let mut v = view();
        let scene = v.scene();
        // weight 9 -> radius sqrt(9)*2 = 6; edge weight 3 -> width sqrt(3).
        assert_eq!(scene.point(1).unwrap().radius, 6.0);
        assert!((scene.edges[0].width - 3f64.sqrt()).abs() < 1e-12);

        v.state.encoding.size_by_weight = false;
        v.state.encoding.width_by_weight = false;
        let scene = v.scene();
        assert_eq!(scene.point(1).unwrap().radius, BASE_POINT_RADIUS);
        assert_eq!(scene.edges[0].width, BASE_EDGE_WIDTH);
    }
}

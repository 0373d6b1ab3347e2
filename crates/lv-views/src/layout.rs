//! Force-directed layout collaborator
//!
//! The engine never owns the physics: it pins and unpins nodes, nudges
//! a resting simulation awake, and reads positions each tick through
//! the [`ForceLayout`] trait. [`SpringSimulation`] is the bundled
//! reference integrator used by the demo binary and the tests.

use lv_data::{GraphData, NodeId};
use nalgebra::{Point2, Vector2};
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Alpha below which a simulation counts as at rest
const ALPHA_MIN: f64 = 0.001;

/// Alpha target applied while a drag keeps the simulation responsive
const DRAG_ALPHA_TARGET: f64 = 0.3;

/// Relaxation rate of alpha toward its target, per tick
const ALPHA_RELAX: f64 = 0.05;

/// Interface the interaction engine requires of a layout integrator
pub trait ForceLayout: Send + Sync {
    /// Current position of a node, if the node exists
    fn position(&self, node: NodeId) -> Option<Point2<f64>>;

    /// Fix a node's position against the free-motion forces
    fn pin(&mut self, node: NodeId, pos: Point2<f64>);

    /// Return control of a node's position to the simulation
    fn unpin(&mut self, node: NodeId);

    fn pinned_count(&self) -> usize;

    /// Nudge a resting simulation back to an active state
    fn reheat(&mut self);

    /// Allow the simulation to settle back to rest
    fn cool(&mut self);

    fn is_cooled(&self) -> bool;

    /// Advance the simulation by one tick
    fn step(&mut self);
}

/// Force parameters fed to the integrator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceParams {
    /// Target edge length
    pub link_distance: f64,
    /// Spring stiffness along edges
    pub link_strength: f64,
    /// Pairwise repulsion strength
    pub repulsion: f64,
    /// Pull toward the centering point
    pub center_strength: f64,
    /// Centering point, usually the view center
    pub center: Point2<f64>,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            link_distance: 80.0,
            link_strength: 0.1,
            repulsion: 300.0,
            center_strength: 0.01,
            center: Point2::new(350.0, 350.0),
        }
    }
}

/// Spring-force integrator over a node-link graph.
///
/// Velocity damping plus an alpha factor that relaxes toward a target:
/// forces scale with alpha, so the layout settles once alpha decays
/// under [`ALPHA_MIN`] and wakes when a drag raises the target.
pub struct SpringSimulation {
    graph: UnGraph<NodeId, f64>,
    positions: Vec<Point2<f64>>,
    velocities: Vec<Vector2<f64>>,
    pinned: Vec<Option<Point2<f64>>>,
    alpha: f64,
    alpha_target: f64,
    params: ForceParams,
}

impl SpringSimulation {
    /// Build a simulation with randomized initial positions.
    pub fn new(data: &GraphData, params: ForceParams) -> Self {
        Self::with_seed(data, params, rand::thread_rng().gen())
    }

    /// Deterministic variant for tests and reproducible demos.
    pub fn with_seed(data: &GraphData, params: ForceParams, seed: u64) -> Self {
        let mut graph = UnGraph::with_capacity(data.nodes.len(), data.edges.len());
        for (id, _) in data.iter_nodes() {
            graph.add_node(id);
        }
        for edge in &data.edges {
            graph.add_edge(
                NodeIndex::new(edge.source.index()),
                NodeIndex::new(edge.target.index()),
                edge.weight,
            );
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..data.nodes.len())
            .map(|_| {
                params.center
                    + Vector2::new(rng.gen_range(-200.0..200.0), rng.gen_range(-200.0..200.0))
            })
            .collect();

        Self {
            graph,
            positions,
            velocities: vec![Vector2::zeros(); data.nodes.len()],
            pinned: vec![None; data.nodes.len()],
            alpha: 1.0,
            alpha_target: 0.0,
            params,
        }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn accumulate_forces(&self) -> Vec<Vector2<f64>> {
        let n = self.positions.len();
        let mut forces = vec![Vector2::zeros(); n];

        // Pairwise repulsion, capped so coincident nodes do not explode.
        for i in 0..n {
            for j in (i + 1)..n {
                let diff = self.positions[i] - self.positions[j];
                let dist = diff.norm();
                if dist > 0.0 {
                    let f = (self.params.repulsion / (dist * dist)).min(100.0);
                    let push = diff.normalize() * f;
                    forces[i] += push;
                    forces[j] -= push;
                }
            }
        }

        // Spring force along edges toward the target length.
        for edge in self.graph.edge_references() {
            let (a, b) = (edge.source().index(), edge.target().index());
            let diff = self.positions[b] - self.positions[a];
            let dist = diff.norm();
            if dist > 0.0 {
                let stretch = (dist - self.params.link_distance) * self.params.link_strength;
                let pull = diff.normalize() * stretch;
                forces[a] += pull;
                forces[b] -= pull;
            }
        }

        // Centering.
        for i in 0..n {
            forces[i] += (self.params.center - self.positions[i]) * self.params.center_strength;
        }

        forces
    }
}

impl ForceLayout for SpringSimulation {
    fn position(&self, node: NodeId) -> Option<Point2<f64>> {
        self.positions.get(node.index()).copied()
    }

    fn pin(&mut self, node: NodeId, pos: Point2<f64>) {
        if let Some(slot) = self.pinned.get_mut(node.index()) {
            *slot = Some(pos);
            self.positions[node.index()] = pos;
            self.velocities[node.index()] = Vector2::zeros();
        }
    }

    fn unpin(&mut self, node: NodeId) {
        if let Some(slot) = self.pinned.get_mut(node.index()) {
            *slot = None;
        }
    }

    fn pinned_count(&self) -> usize {
        self.pinned.iter().filter(|p| p.is_some()).count()
    }

    fn reheat(&mut self) {
        self.alpha_target = DRAG_ALPHA_TARGET;
    }

    fn cool(&mut self) {
        self.alpha_target = 0.0;
    }

    fn is_cooled(&self) -> bool {
        self.alpha < ALPHA_MIN
    }

    fn step(&mut self) {
        // At rest with no drive: nothing moves until a reheat.
        if self.is_cooled() && self.alpha_target == 0.0 {
            return;
        }
        self.alpha += (self.alpha_target - self.alpha) * ALPHA_RELAX;

        let dt = 0.1;
        let forces = self.accumulate_forces();
        for i in 0..self.positions.len() {
            if let Some(pos) = self.pinned[i] {
                self.positions[i] = pos;
                self.velocities[i] = Vector2::zeros();
                continue;
            }
            self.velocities[i] = self.velocities[i] * 0.85 + forces[i] * dt * self.alpha;
            self.positions[i] += self.velocities[i] * dt;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lv_data::{GraphEdge, GraphNode};

    fn triangle() -> GraphData {
        GraphData {
            nodes: (0..3)
                .map(|i| GraphNode {
                    name: format!("n{i}"),
                    weight: 1.0,
                    colour: None,
                })
                .collect(),
            edges: vec![
                GraphEdge {
                    source: NodeId(0),
                    target: NodeId(1),
                    weight: 1.0,
                },
                GraphEdge {
                    source: NodeId(1),
                    target: NodeId(2),
                    weight: 1.0,
                },
            ],
        }
    }

    #[test]
    fn pinned_nodes_do_not_move_under_forces() {
        let mut sim = SpringSimulation::with_seed(&triangle(), ForceParams::default(), 7);
        let hold = Point2::new(10.0, 20.0);
        sim.pin(NodeId(0), hold);
        for _ in 0..50 {
            sim.step();
        }
        assert_eq!(sim.position(NodeId(0)), Some(hold));
        assert_eq!(sim.pinned_count(), 1);
    }

    #[test]
    fn unpinned_nodes_resume_free_motion() {
        let mut sim = SpringSimulation::with_seed(&triangle(), ForceParams::default(), 7);
        let hold = Point2::new(10.0, 20.0);
        sim.pin(NodeId(0), hold);
        sim.unpin(NodeId(0));
        assert_eq!(sim.pinned_count(), 0);
        for _ in 0..50 {
            sim.step();
        }
        assert_ne!(sim.position(NodeId(0)), Some(hold));
    }

    #[test]
    fn simulation_cools_to_rest_and_reheats() {
        let mut sim = SpringSimulation::with_seed(&triangle(), ForceParams::default(), 7);
        for _ in 0..400 {
            sim.step();
        }
        assert!(sim.is_cooled());

        let frozen = sim.position(NodeId(1)).unwrap();
        sim.step();
        assert_eq!(sim.position(NodeId(1)), Some(frozen));

        sim.reheat();
        for _ in 0..20 {
            sim.step();
        }
        assert!(sim.alpha() > ALPHA_MIN);
    }

    #[test]
    fn missing_nodes_are_handled_gracefully() {
        let mut sim = SpringSimulation::with_seed(&triangle(), ForceParams::default(), 7);
        assert_eq!(sim.position(NodeId(99)), None);
        sim.pin(NodeId(99), Point2::origin());
        assert_eq!(sim.pinned_count(), 0);
    }
}

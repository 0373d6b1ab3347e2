//! Drag interaction for force-laid-out nodes
//!
//! Per-view state machine with states Idle and Dragging. While a drag
//! is active the node is pinned to the pointer's data-space position;
//! pointer-up anywhere ends the drag, so a pointer leaving the view
//! surface can never leave a node permanently pinned.

use lv_data::NodeId;
use nalgebra::Point2;
use tracing::debug;

use crate::layout::ForceLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragPhase {
    Idle,
    Dragging { node: NodeId },
}

/// Drag controller for one view
#[derive(Debug, Clone, Copy)]
pub struct DragController {
    phase: DragPhase,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}

impl DragController {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
        }
    }

    pub fn dragged_node(&self) -> Option<NodeId> {
        match self.phase {
            DragPhase::Dragging { node } => Some(node),
            DragPhase::Idle => None,
        }
    }

    /// Pointer-down over a node: pin it where it stands and make sure a
    /// resting simulation wakes up so feedback stays responsive.
    /// Returns whether a drag started.
    pub fn pointer_down(&mut self, hit: Option<NodeId>, layout: &mut dyn ForceLayout) -> bool {
        let Some(node) = hit else {
            return false;
        };
        let Some(pos) = layout.position(node) else {
            return false;
        };
        layout.pin(node, pos);
        if layout.is_cooled() {
            layout.reheat();
        }
        self.phase = DragPhase::Dragging { node };
        debug!(?node, "drag started");
        true
    }

    /// Pointer-move while dragging: the pinned position follows the
    /// pointer's data-space coordinate.
    pub fn pointer_move(&mut self, data_pos: Point2<f64>, layout: &mut dyn ForceLayout) {
        if let DragPhase::Dragging { node } = self.phase {
            layout.pin(node, data_pos);
        }
    }

    /// Pointer-up, wherever it happens: un-pin and, when no other node
    /// is held, let the simulation settle. A pointer-up without an
    /// active drag is a no-op. Returns whether a drag ended.
    pub fn pointer_up(&mut self, layout: &mut dyn ForceLayout) -> bool {
        let DragPhase::Dragging { node } = self.phase else {
            return false;
        };
        layout.unpin(node);
        if layout.pinned_count() == 0 {
            layout.cool();
        }
        self.phase = DragPhase::Idle;
        debug!(?node, "drag ended");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{ForceParams, SpringSimulation};
    use lv_data::{GraphData, GraphEdge, GraphNode};

    fn pair() -> GraphData {
        GraphData {
            nodes: vec![
                GraphNode {
                    name: "a".into(),
                    weight: 1.0,
                    colour: None,
                },
                GraphNode {
                    name: "b".into(),
                    weight: 1.0,
                    colour: None,
                },
            ],
            edges: vec![GraphEdge {
                source: NodeId(0),
                target: NodeId(1),
                weight: 1.0,
            }],
        }
    }

    #[test]
    fn pin_then_unpin_without_moving_leaves_position_unchanged() {
        let mut sim = SpringSimulation::with_seed(&pair(), ForceParams::default(), 3);
        let mut drag = DragController::new();
        let before = sim.position(NodeId(0)).unwrap();

        assert!(drag.pointer_down(Some(NodeId(0)), &mut sim));
        assert!(drag.pointer_up(&mut sim));

        assert_eq!(sim.position(NodeId(0)), Some(before));
        assert_eq!(sim.pinned_count(), 0);
        assert_eq!(drag.dragged_node(), None);
    }

    #[test]
    fn dragging_follows_the_pointer() {
        let mut sim = SpringSimulation::with_seed(&pair(), ForceParams::default(), 3);
        let mut drag = DragController::new();
        drag.pointer_down(Some(NodeId(1)), &mut sim);

        let target = Point2::new(55.0, -12.0);
        drag.pointer_move(target, &mut sim);
        sim.step();
        assert_eq!(sim.position(NodeId(1)), Some(target));
    }

    #[test]
    fn a_cooled_simulation_is_reheated_on_drag_start() {
        let mut sim = SpringSimulation::with_seed(&pair(), ForceParams::default(), 3);
        for _ in 0..400 {
            sim.step();
        }
        assert!(sim.is_cooled());

        let mut drag = DragController::new();
        drag.pointer_down(Some(NodeId(0)), &mut sim);
        for _ in 0..20 {
            sim.step();
        }
        assert!(!sim.is_cooled());

        // Releasing the only pinned node lets the simulation settle.
        drag.pointer_up(&mut sim);
        for _ in 0..400 {
            sim.step();
        }
        assert!(sim.is_cooled());
    }

    #[test]
    fn stray_pointer_up_is_harmless() {
        let mut sim = SpringSimulation::with_seed(&pair(), ForceParams::default(), 3);
        let mut drag = DragController::new();
        assert!(!drag.pointer_up(&mut sim));
        assert!(!drag.pointer_down(None, &mut sim));
        assert_eq!(drag.dragged_node(), None);
    }
}

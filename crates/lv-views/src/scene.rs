//! Renderer hand-off types
//!
//! The drawing backend is an external collaborator: per frame it
//! receives a [`Scene`] of already-computed screen positions and style
//! attributes, and paints shapes. Nothing here knows how painting works.

use nalgebra::Point2;

/// RGB color triple
pub type Color = [u8; 3];

/// One point/node ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct ScenePoint {
    /// Slot id of the backing record or node
    pub slot: u32,
    /// Screen position after scales and the view transform
    pub pos: Point2<f64>,
    pub radius: f64,
    pub color: Color,
    /// Selected elements get a thicker outline
    pub emphasized: bool,
}

/// One edge/line segment ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub from: Point2<f64>,
    pub to: Point2<f64>,
    pub width: f64,
    pub color: Color,
}

/// Everything the renderer needs for one view, one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub edges: Vec<SceneEdge>,
    pub points: Vec<ScenePoint>,
}

impl Scene {
    pub fn point(&self, slot: u32) -> Option<&ScenePoint> {
        self.points.iter().find(|p| p.slot == slot)
    }
}

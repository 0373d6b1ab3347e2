//! Per-view zoom/pan transform
//!
//! A [`ViewTransform`] is a translate-plus-uniform-scale applied on top
//! of the base scales before rendering. It is owned exclusively by one
//! view and never mutates a scale domain: zoom and brush operate at
//! different layers and stay orthogonal.

use nalgebra::{Point2, Vector2};

/// Scale-factor clamp for graph views
pub const GRAPH_SCALE_EXTENT: (f64, f64) = (0.2, 4.0);

/// Scale-factor clamp for plot views
pub const PLOT_SCALE_EXTENT: (f64, f64) = (0.5, 3.0);

/// 2D affine view transform: uniform scale followed by translation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    translate: Vector2<f64>,
    scale: f64,
    scale_extent: (f64, f64),
}

impl ViewTransform {
    pub fn new(scale_extent: (f64, f64)) -> Self {
        Self {
            translate: Vector2::zeros(),
            scale: 1.0,
            scale_extent,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn translate(&self) -> Vector2<f64> {
        self.translate
    }

    /// Map a base screen position into transformed screen space
    pub fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from(p.coords * self.scale + self.translate)
    }

    /// Map a transformed screen position back to base screen space
    pub fn invert(&self, p: Point2<f64>) -> Point2<f64> {
        Point2::from((p.coords - self.translate) / self.scale)
    }

    /// Zoom by a factor, keeping the screen point `anchor` fixed. The
    /// resulting scale is clamped to this view's extent.
    pub fn zoom_by(&mut self, factor: f64, anchor: Point2<f64>) {
        let clamped = (self.scale * factor).clamp(self.scale_extent.0, self.scale_extent.1);
        let applied = clamped / self.scale;
        self.translate = anchor.coords + (self.translate - anchor.coords) * applied;
        self.scale = clamped;
    }

    /// Set the scale factor directly, clamped to this view's extent.
    /// Used when restoring a saved view configuration.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.clamp(self.scale_extent.0, self.scale_extent.1);
    }

    pub fn pan_by(&mut self, delta: Vector2<f64>) {
        self.translate += delta;
    }

    pub fn reset(&mut self) {
        self.translate = Vector2::zeros();
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_invert_round_trip() {
        let mut t = ViewTransform::new(GRAPH_SCALE_EXTENT);
        t.zoom_by(2.0, Point2::new(100.0, 50.0));
        t.pan_by(Vector2::new(-30.0, 12.0));

        let p = Point2::new(41.5, 77.25);
        let back = t.invert(t.apply(p));
        assert!((back - p).norm() < 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_extent() {
        let mut t = ViewTransform::new(GRAPH_SCALE_EXTENT);
        for _ in 0..64 {
            t.zoom_by(1.5, Point2::origin());
        }
        assert_eq!(t.scale(), 4.0);
        for _ in 0..64 {
            t.zoom_by(0.5, Point2::origin());
        }
        assert_eq!(t.scale(), 0.2);
    }

    #[test]
    fn zoom_keeps_the_anchor_fixed() {
        let mut t = ViewTransform::new(PLOT_SCALE_EXTENT);
        let anchor = Point2::new(200.0, 300.0);
        let data_side = t.invert(anchor);
        t.zoom_by(1.8, anchor);
        assert!((t.apply(data_side) - anchor).norm() < 1e-9);
    }
}

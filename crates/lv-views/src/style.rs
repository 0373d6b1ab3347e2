//! Style resolution
//!
//! Computes the color/size attributes the renderer consumes. Color
//! override priority: neighbor-highlight > quadrant-recolor > category
//! color. Weight-driven encodings only change style values, never the
//! data or any derived analytics.

use crate::analytics::Quadrant;
use crate::scene::Color;

/// Base radius when size-by-weight is off or no weight is present
pub const BASE_POINT_RADIUS: f64 = 5.0;

/// Base width when width-by-weight is off
pub const BASE_EDGE_WIDTH: f64 = 2.0;

/// Boolean flags selecting the weight-driven visual encodings. Process
/// wide for a given view; style-only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingToggles {
    pub size_by_weight: bool,
    pub width_by_weight: bool,
}

impl Default for EncodingToggles {
    fn default() -> Self {
        Self {
            size_by_weight: true,
            width_by_weight: true,
        }
    }
}

/// Color tables for one view. Explicit configuration rather than a code
/// fork, so every view variant states its palette.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePalette {
    pub categorical: Vec<Color>,
    pub quadrant: [Color; 4],
    pub neighbor_highlight: Color,
    pub edge_base: Color,
    pub edge_highlight: Color,
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            categorical: vec![
                [100, 150, 250], // Blue
                [250, 150, 100], // Orange
                [150, 250, 100], // Green
                [250, 100, 150], // Pink
                [150, 100, 250], // Purple
                [250, 250, 100], // Yellow
                [100, 250, 250], // Cyan
                [250, 100, 100], // Red
            ],
            quadrant: [
                [31, 119, 180],
                [255, 127, 14],
                [44, 160, 44],
                [214, 39, 40],
            ],
            neighbor_highlight: [255, 165, 0],
            edge_base: [150, 150, 150],
            edge_highlight: [255, 165, 0],
        }
    }
}

impl StylePalette {
    pub fn categorical_color(&self, index: usize) -> Color {
        self.categorical[index % self.categorical.len()]
    }
}

/// Resolved style for one point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub color: Color,
    pub radius: f64,
    pub emphasized: bool,
}

/// Resolve the active color and radius for a point.
pub fn resolve_point_style(
    palette: &StylePalette,
    category_index: usize,
    quadrant: Option<Quadrant>,
    is_neighbor: bool,
    is_selected: bool,
    weight: Option<f64>,
    toggles: EncodingToggles,
) -> PointStyle {
    let color = if is_neighbor {
        palette.neighbor_highlight
    } else if let Some(q) = quadrant {
        palette.quadrant[q.index()]
    } else {
        palette.categorical_color(category_index)
    };

    PointStyle {
        color,
        radius: point_radius(weight, toggles),
        emphasized: is_selected,
    }
}

/// Point radius under the size-by-weight encoding
pub fn point_radius(weight: Option<f64>, toggles: EncodingToggles) -> f64 {
    match weight {
        Some(w) if toggles.size_by_weight && w >= 0.0 => w.sqrt() * 2.0,
        _ => BASE_POINT_RADIUS,
    }
}

/// Edge stroke width under the width-by-weight encoding
pub fn edge_width(weight: f64, toggles: EncodingToggles) -> f64 {
    if toggles.width_by_weight && weight >= 0.0 {
        weight.sqrt()
    } else {
        BASE_EDGE_WIDTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbor_highlight_wins_over_quadrant_and_category() {
        let palette = StylePalette::default();
        let style = resolve_point_style(
            &palette,
            3,
            Some(Quadrant::NegNeg),
            true,
            false,
            None,
            EncodingToggles::default(),
        );
        assert_eq!(style.color, palette.neighbor_highlight);

        let style = resolve_point_style(
            &palette,
            3,
            Some(Quadrant::NegNeg),
            false,
            false,
            None,
            EncodingToggles::default(),
        );
        assert_eq!(style.color, palette.quadrant[2]);

        let style = resolve_point_style(
            &palette,
            3,
            None,
            false,
            false,
            None,
            EncodingToggles::default(),
        );
        assert_eq!(style.color, palette.categorical_color(3));
    }

    #[test]
    fn weight_encodings_follow_the_toggles() {
        let on = EncodingToggles::default();
        let off = EncodingToggles {
            size_by_weight: false,
            width_by_weight: false,
        };

        assert_eq!(point_radius(Some(16.0), on), 8.0);
        assert_eq!(point_radius(Some(16.0), off), BASE_POINT_RADIUS);
        assert_eq!(point_radius(None, on), BASE_POINT_RADIUS);

        assert_eq!(edge_width(9.0, on), 3.0);
        assert_eq!(edge_width(9.0, off), BASE_EDGE_WIDTH);
    }

    #[test]
    fn selection_sets_the_emphasis_flag_only() {
        let palette = StylePalette::default();
        let selected = resolve_point_style(
            &palette,
            0,
            None,
            false,
            true,
            None,
            EncodingToggles::default(),
        );
        let plain = resolve_point_style(
            &palette,
            0,
            None,
            false,
            false,
            None,
            EncodingToggles::default(),
        );
        assert!(selected.emphasized);
        assert_eq!(selected.color, plain.color);
        assert_eq!(selected.radius, plain.radius);
    }
}

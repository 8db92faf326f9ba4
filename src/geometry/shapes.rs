//! Paths for the shape tools
//!
//! Shapes are rebuilt from scratch on every pointer sample, spanning from the
//! gesture anchor to the current pointer position. Dragging up or left of the
//! anchor yields the same shape as dragging down or right over the same two
//! corners: the corners are used as given and never normalized, only the
//! winding flips.

use bevy::math::Vec2;
use kurbo::{Ellipse, Rect, Shape};

use super::path::Path;

/// Tolerance used when approximating ellipse arcs with cubics
const ELLIPSE_TOLERANCE: f64 = 0.1;

/// Closed rectangle with corners `anchor` and `corner`, starting at `anchor`
pub fn rectangle(anchor: Vec2, corner: Vec2) -> Path {
    let mut path = Path::new(anchor);
    path.line_to(Vec2::new(corner.x, anchor.y));
    path.line_to(corner);
    path.line_to(Vec2::new(anchor.x, corner.y));
    path.line_to(anchor);
    path
}

/// Closed ellipse inscribed in the rectangle with corners `anchor` and `corner`
pub fn ellipse(anchor: Vec2, corner: Vec2) -> Path {
    let rect = Rect::from_points(
        (anchor.x as f64, anchor.y as f64),
        (corner.x as f64, corner.y as f64),
    );
    let bez = Ellipse::from_rect(rect).to_path(ELLIPSE_TOLERANCE);

    // kurbo always starts an ellipse with a move, so this cannot fail
    Path::from_bezpath(&bez).unwrap_or_else(|| Path::new(anchor))
}

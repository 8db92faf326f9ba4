//! A single recorded stroke or shape

use bevy::color::Srgba;
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::path::Path;
use crate::geometry::shapes;

/// The closed set of drawing tools
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Freehand,
    Rectangle,
    Ellipse,
}

impl ToolKind {
    /// Shape tools redraw their whole path from the anchor on every sample
    pub fn is_shape(self) -> bool {
        matches!(self, ToolKind::Rectangle | ToolKind::Ellipse)
    }

    /// Path for a shape tool spanning `anchor` to `corner`
    ///
    /// Freehand has no shape, it gets a bare move at `anchor`.
    pub fn shape_path(self, anchor: Vec2, corner: Vec2) -> Path {
        match self {
            ToolKind::Freehand => Path::new(anchor),
            ToolKind::Rectangle => shapes::rectangle(anchor, corner),
            ToolKind::Ellipse => shapes::ellipse(anchor, corner),
        }
    }
}

/// Identity of an event within its list, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub(crate) u64);

/// One stroke or shape with its pen
#[derive(Debug, Clone, PartialEq)]
pub struct DrawEvent {
    pub(crate) id: EventId,
    pub path: Path,
    pub pen_width: f32,
    pub pen_color: Srgba,
    pub is_filled_shape: bool,
    pub tool: ToolKind,
}

impl DrawEvent {
    pub fn id(&self) -> EventId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_kinds() {
        assert!(!ToolKind::Freehand.is_shape());
        assert!(ToolKind::Rectangle.is_shape());
        assert!(ToolKind::Ellipse.is_shape());
    }

    #[test]
    fn test_freehand_shape_path_is_a_move() {
        let path = ToolKind::Freehand.shape_path(Vec2::ONE, Vec2::splat(9.0));
        assert_eq!(path, Path::new(Vec2::ONE));
    }
}

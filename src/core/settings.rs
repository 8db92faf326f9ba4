// Settings ///////////////////////////////////////////////////////////////////
// This module contains all the settings for the app.

use std::path::Path;
use std::time::Duration;

use bevy::color::Srgba;
use serde::{Deserialize, Serialize};

use crate::core::errors::{validate_pen_width, SketchContext, SketchResult};
use crate::editing::draw_event::ToolKind;

// Window /////////////////////////////////////////////////////////////////////

pub const WINDOW_TITLE: &str = "Sketchpad";
pub const WINDOW_WIDTH: f32 = 1024.0;
pub const WINDOW_HEIGHT: f32 = 768.0;

/// Color of the static background quad
pub const BACKGROUND_COLOR: Srgba = Srgba::WHITE;

// Pen ////////////////////////////////////////////////////////////////////////

pub const DEFAULT_PEN_WIDTH: f32 = 4.0;
pub const DEFAULT_PEN_COLOR: Srgba = Srgba::BLACK;

// Gestures ///////////////////////////////////////////////////////////////////

/// A freehand gesture idle for longer than this between two samples
/// continues in a new draw event
pub const IDLE_SPLIT_THRESHOLD: Duration = Duration::from_millis(1000);

// Rendering //////////////////////////////////////////////////////////////////

/// Maximum distance between a curve and its tessellated approximation
pub const TESSELLATION_TOLERANCE: f32 = 0.01;

/// Z distance between consecutive draw event nodes (later events on top)
pub const NODE_Z_STEP: f32 = 0.001;

// Runtime settings ///////////////////////////////////////////////////////////

/// Pen defaults, loadable from a JSON file and overridable from the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingSettings {
    /// `#RRGGBB` or `#RRGGBBAA`
    pub pen_color: String,
    pub pen_width: f32,
    pub tool: ToolKind,
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self {
            pen_color: DEFAULT_PEN_COLOR.to_hex(),
            pen_width: DEFAULT_PEN_WIDTH,
            tool: ToolKind::Freehand,
        }
    }
}

impl DrawingSettings {
    /// Read settings from a JSON file, missing fields fall back to defaults
    pub fn load<P: AsRef<Path>>(path: P) -> SketchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_file_context("read", path)?;
        let settings: Self =
            serde_json::from_str(&text).with_file_context("parse", path)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> SketchResult<()> {
        validate_pen_width(self.pen_width)?;
        self.pen_color()?;
        Ok(())
    }

    pub fn pen_color(&self) -> SketchResult<Srgba> {
        parse_color(&self.pen_color)
    }
}

pub fn parse_color(hex: &str) -> SketchResult<Srgba> {
    Srgba::hex(hex)
        .map_err(|e| anyhow::anyhow!("Invalid color '{}': {:?}", hex, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = DrawingSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.pen_color().unwrap(), Srgba::BLACK);
    }

    #[test]
    fn test_load_partial_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r##"{{ "pen_width": 2.5, "tool": "ellipse" }}"##).unwrap();

        let settings = DrawingSettings::load(file.path()).unwrap();
        assert_eq!(settings.pen_width, 2.5);
        assert_eq!(settings.tool, ToolKind::Ellipse);
        assert_eq!(settings.pen_color, DrawingSettings::default().pen_color);
    }

    #[test]
    fn test_load_rejects_bad_width() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "pen_width": 0.0 }}"#).unwrap();
        assert!(DrawingSettings::load(file.path()).is_err());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(
            parse_color("#ff0000").unwrap(),
            Srgba::rgb(1.0, 0.0, 0.0)
        );
        assert!(parse_color("not a color").is_err());
    }
}

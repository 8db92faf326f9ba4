//! Command line arguments for the application

use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use crate::core::errors::SketchResult;
use crate::core::settings::DrawingSettings;
use crate::editing::draw_event::ToolKind;

/// command line arguments for pen setup and export
#[derive(Parser, Debug, Clone, Default, Resource)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// path to a JSON file with pen settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// pen width, overrides the config file
    #[arg(long = "pen-width")]
    pub pen_width: Option<f32>,

    /// pen color as #RRGGBB or #RRGGBBAA, overrides the config file
    #[arg(long = "pen-color")]
    pub pen_color: Option<String>,

    /// drawing tool to start with
    #[arg(long, value_enum)]
    pub tool: Option<ToolKind>,

    /// where Ctrl/Cmd+S writes the SVG export, export is off without it
    #[arg(long = "export-path")]
    pub export_path: Option<PathBuf>,

    /// display debug information
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl CliArgs {
    /// Settings from the config file (or defaults) with CLI overrides applied
    pub fn drawing_settings(&self) -> SketchResult<DrawingSettings> {
        let mut settings = match &self.config {
            Some(path) => DrawingSettings::load(path)?,
            None => DrawingSettings::default(),
        };
        if let Some(width) = self.pen_width {
            settings.pen_width = width;
        }
        if let Some(color) = &self.pen_color {
            settings.pen_color = color.clone();
        }
        if let Some(tool) = self.tool {
            settings.tool = tool;
        }
        settings.validate()?;
        Ok(settings)
    }
}

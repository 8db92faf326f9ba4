//! Bevy Systems and Plugins
//!
//! This module contains Bevy-specific systems and plugin configurations:
//! - Plugin management and configuration
//! - Routing window input into the drawing area
//! - Publishing drawing area notifications

pub mod input_consumer;
pub mod notifications;
pub mod plugins;

// Re-export commonly used items
pub use plugins::{configure_default_plugins, SketchpadSystems};

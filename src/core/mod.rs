//! Core application functionality
//!
//! This module contains the core application logic, including:
//! - Application initialization and configuration
//! - The drawing area state
//! - Settings and CLI handling
//! - The pointer input state machine
//! - Cursor feedback

pub mod app;
pub mod cli;
pub mod cursor;
pub mod errors;
pub mod input;
pub mod settings;
pub mod state;

// Re-export commonly used items
pub use app::create_app;
pub use cli::CliArgs;
pub use settings::DrawingSettings;
pub use state::{DrawingArea, Notification};

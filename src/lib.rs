//! Sketchpad: a freehand and shape drawing surface made with the Bevy game
//! engine.

pub mod core;
pub mod editing;
pub mod geometry;
pub mod io;
pub mod rendering;
pub mod systems;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::core::{create_app, CliArgs, DrawingArea};

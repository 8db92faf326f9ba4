//! Rendering
//!
//! This module turns the draw event list into triangles on screen:
//! - Bridging raw path elements into the tessellator's path builder
//! - Stroke and fill tessellation
//! - Incremental sync of the render tree with the event list
//! - The Bevy entity backend for that tree

pub mod cameras;
pub mod mesh_nodes;
pub mod mesh_utils;
pub mod path_bridge;
pub mod scene_sync;
pub mod tessellation;

pub use mesh_nodes::{sync_drawing_nodes, DrawingNodes};
pub use scene_sync::{RenderNodeTree, SceneSync, SceneTree, SyncReport};

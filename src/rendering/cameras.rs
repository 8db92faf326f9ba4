//! Camera system
//!
//! A single 2D camera looking at the drawing. The drawing root is centered
//! on it, see [`crate::rendering::mesh_nodes::root_transform`].

use bevy::prelude::*;

/// Component that marks the camera showing the drawing surface
#[derive(Component)]
pub struct DrawingCamera;

pub fn spawn_drawing_camera(commands: &mut Commands) {
    commands.spawn((Camera2d, DrawingCamera));
}

pub fn setup_camera(mut commands: Commands) {
    spawn_drawing_camera(&mut commands);
}

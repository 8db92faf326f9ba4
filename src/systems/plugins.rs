use bevy::prelude::*;

use crate::core::settings::{WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::core::state::{DrawingArea, Notification};
use crate::editing::system_sets::{DrawingSets, DrawingSystemSetsPlugin};
use crate::rendering::cameras::setup_camera;
use crate::rendering::mesh_nodes::{sync_drawing_nodes, DrawingNodes};
use crate::systems::input_consumer::{handle_pointer_input, track_window_size};
use crate::systems::notifications::{log_notifications, publish_notifications};

/// Configure the default Bevy plugins with custom settings
pub fn configure_default_plugins() -> bevy::app::PluginGroupBuilder {
    DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: WINDOW_TITLE.into(),
                resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                // Tell wasm to resize the window according to the available canvas
                fit_canvas_to_parent: true,
                // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
                prevent_default_event_handling: false,
                ..default()
            }),
            ..default()
        })
        // Disable Bevy's default LogPlugin since we're using our own custom logger
        .build()
        .disable::<bevy::log::LogPlugin>()
}

/// Plugin to organize camera-related systems
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

/// Plugin to route pointer and window input into the drawing area
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (track_window_size, handle_pointer_input)
                .chain()
                .in_set(DrawingSets::Input),
        );
    }
}

/// Plugin to organize drawing-related systems
pub struct DrawingPlugin;

impl Plugin for DrawingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawingNodes>()
            .add_event::<Notification>()
            .add_systems(
                Update,
                sync_drawing_nodes.in_set(DrawingSets::Rendering),
            )
            .add_systems(
                Update,
                (publish_notifications, log_notifications)
                    .chain()
                    .in_set(DrawingSets::Feedback),
            );
    }
}

/// Main application plugin that bundles all internal plugins
///
/// Expects a [`DrawingArea`] resource, and falls back to a default one.
pub struct SketchpadSystems;

impl Plugin for SketchpadSystems {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<DrawingArea>() {
            app.init_resource::<DrawingArea>();
        }
        app.add_plugins((
            DrawingSystemSetsPlugin,
            CameraPlugin,
            InputPlugin,
            DrawingPlugin,
        ));
    }
}

//! Application initialization and configuration

use crate::core::cli::CliArgs;
use crate::core::cursor::CursorPlugin;
use crate::core::settings::BACKGROUND_COLOR;
use crate::core::state::DrawingArea;
use crate::editing::UndoPlugin;
use crate::systems::{configure_default_plugins, SketchpadSystems};
use bevy::prelude::*;
use bevy::winit::WinitSettings;

/// Creates a fully configured Bevy GUI application ready to run
pub fn create_app(cli_args: CliArgs) -> Result<App, String> {
    let settings = cli_args
        .drawing_settings()
        .map_err(|e| format!("{:#}", e))?;

    let mut app = App::new();
    app.insert_resource(DrawingArea::new(&settings))
        .insert_resource(cli_args)
        .insert_resource(ClearColor(BACKGROUND_COLOR.into()))
        .insert_resource(WinitSettings::desktop_app());
    add_all_plugins(&mut app);
    Ok(app)
}

/// Adds all plugins to the application in logical groups
fn add_all_plugins(app: &mut App) {
    app.add_plugins(configure_default_plugins());
    app.add_plugins((SketchpadSystems, UndoPlugin, CursorPlugin))
        .add_systems(Update, exit_on_esc);
}

/// System to exit the application when the Escape key is pressed
fn exit_on_esc(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut app_exit_events: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        app_exit_events.write(AppExit::Success);
    }
}

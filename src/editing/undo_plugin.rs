use bevy::prelude::*;

use crate::core::cli::CliArgs;
use crate::core::state::DrawingArea;
use crate::editing::draw_event::ToolKind;
use crate::editing::system_sets::DrawingSets;

fn command_modifier(keyboard: &ButtonInput<KeyCode>) -> bool {
    keyboard.any_pressed([
        KeyCode::SuperLeft,
        KeyCode::SuperRight,
        KeyCode::ControlLeft,
        KeyCode::ControlRight,
    ])
}

/// Tool selected by a digit key
pub fn tool_for_key(key: KeyCode) -> Option<ToolKind> {
    match key {
        KeyCode::Digit1 => Some(ToolKind::Freehand),
        KeyCode::Digit2 => Some(ToolKind::Rectangle),
        KeyCode::Digit3 => Some(ToolKind::Ellipse),
        _ => None,
    }
}

/// System to handle the undo keyboard shortcut (Cmd/Ctrl+Z)
pub fn handle_undo_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut area: ResMut<DrawingArea>,
) {
    if command_modifier(&keyboard) && keyboard.just_pressed(KeyCode::KeyZ) {
        debug!("Undo shortcut detected (Cmd+Z)");
        area.undo();
    }
}

/// System to export the drawing (Cmd/Ctrl+S)
pub fn handle_export_shortcut(
    keyboard: Res<ButtonInput<KeyCode>>,
    cli_args: Res<CliArgs>,
    area: Res<DrawingArea>,
) {
    if !(command_modifier(&keyboard) && keyboard.just_pressed(KeyCode::KeyS)) {
        return;
    }
    let destination = cli_args.export_path.clone().unwrap_or_default();
    if let Err(e) = area.export_to_vector_file(&destination) {
        error!("Failed to export drawing: {:#}", e);
    }
}

/// System to switch tools with the number keys
pub fn handle_tool_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut area: ResMut<DrawingArea>,
) {
    if command_modifier(&keyboard) {
        return;
    }
    if let Some(tool) = keyboard.get_just_pressed().find_map(|&key| tool_for_key(key)) {
        area.set_tool(tool);
    }
}

/// Plugin to set up the undo, export and tool shortcuts
pub struct UndoPlugin;

impl Plugin for UndoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                handle_undo_shortcut,
                handle_export_shortcut,
                handle_tool_shortcuts,
            )
                .chain()
                .in_set(DrawingSets::Commands),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_keys_select_tools() {
        assert_eq!(tool_for_key(KeyCode::Digit1), Some(ToolKind::Freehand));
        assert_eq!(tool_for_key(KeyCode::Digit2), Some(ToolKind::Rectangle));
        assert_eq!(tool_for_key(KeyCode::Digit3), Some(ToolKind::Ellipse));
        assert_eq!(tool_for_key(KeyCode::Digit4), None);
    }

    #[test]
    fn test_undo_shortcut_runs_in_app() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<DrawingArea>()
            .add_systems(Update, handle_undo_shortcut);

        {
            let mut area = app.world_mut().resource_mut::<DrawingArea>();
            area.pointer_press(
                crate::core::input::PointerButton::Primary,
                Vec2::ZERO,
                std::time::Duration::ZERO,
            );
        }
        {
            let mut keyboard = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keyboard.press(KeyCode::ControlLeft);
            keyboard.press(KeyCode::KeyZ);
        }
        app.update();

        assert!(app.world().resource::<DrawingArea>().events().is_empty());
    }
}

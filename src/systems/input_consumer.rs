//! Input Consumer Systems
//!
//! Routes Bevy's mouse, cursor and window input into the drawing area.
//! Positions are window logical coordinates (origin top-left, y down), which
//! is the drawing coordinate space. Timestamps come from the real clock so
//! gesture timing follows the wall clock, not the virtual game time.
//!
//! Button and cursor events are read from the combined window event stream
//! so a press lands between the moves that came before and after it.

use bevy::input::mouse::MouseButtonInput;
use bevy::input::ButtonState;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowEvent};

use crate::core::input::{Modifiers, PointerButton, PointerButtons};
use crate::core::state::DrawingArea;

pub fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        MouseButton::Middle => PointerButton::Middle,
        _ => PointerButton::Other,
    }
}

pub fn held_buttons(mouse: &ButtonInput<MouseButton>) -> PointerButtons {
    PointerButtons {
        primary: mouse.pressed(MouseButton::Left),
        secondary: mouse.pressed(MouseButton::Right),
        middle: mouse.pressed(MouseButton::Middle),
    }
}

pub fn held_modifiers(keyboard: &ButtonInput<KeyCode>) -> Modifiers {
    Modifiers {
        ctrl: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
        shift: keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]),
        alt: keyboard.any_pressed([KeyCode::AltLeft, KeyCode::AltRight]),
    }
}

/// Pointer state carried between frames
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Last known cursor position, releases outside the window end here
    pub position: Option<Vec2>,
    pub buttons: PointerButtons,
}

impl PointerTracker {
    fn set_button(&mut self, button: PointerButton, down: bool) {
        match button {
            PointerButton::Primary => self.buttons.primary = down,
            PointerButton::Secondary => self.buttons.secondary = down,
            PointerButton::Middle => self.buttons.middle = down,
            PointerButton::Other => {}
        }
    }
}

/// Apply window events to the drawing area in the order they arrived
pub fn route_window_events<'a>(
    area: &mut DrawingArea,
    tracker: &mut PointerTracker,
    events: impl IntoIterator<Item = &'a WindowEvent>,
    modifiers: Modifiers,
    now: std::time::Duration,
) {
    for event in events {
        match event {
            WindowEvent::CursorMoved(moved) => {
                tracker.position = Some(moved.position);
                area.pointer_move(tracker.buttons, moved.position, modifiers, now);
            }
            WindowEvent::MouseButtonInput(input) => {
                let button = pointer_button(input.button);
                let position = tracker.position.unwrap_or_default();
                match input.state {
                    ButtonState::Pressed => {
                        tracker.set_button(button, true);
                        area.pointer_press(button, position, now);
                    }
                    ButtonState::Released => {
                        tracker.set_button(button, false);
                        area.pointer_release(button, position, now);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Feed press, move and release events to the drawing area
pub fn handle_pointer_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut window_events: EventReader<WindowEvent>,
    windows: Query<&Window, With<PrimaryWindow>>,
    time: Res<Time<Real>>,
    mut area: ResMut<DrawingArea>,
    mut tracker: Local<PointerTracker>,
) {
    // Until the first cursor event, start from wherever the cursor is
    if tracker.position.is_none() {
        tracker.position = windows.single().ok().and_then(|w| w.cursor_position());
    }
    route_window_events(
        &mut area,
        &mut tracker,
        window_events.read(),
        held_modifiers(&keyboard),
        time.elapsed(),
    );
}

/// Keep the drawing area the size of the primary window
pub fn track_window_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut area: ResMut<DrawingArea>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if area.size() != size {
        debug!("Drawing area resized to {:?}", size);
        area.resize(size);
    }
}

//! Pointer input state machine
//!
//! Turns press, move and release into draw event mutations. Only the
//! primary button draws, everything else is ignored.

use std::time::Duration;

use bevy::color::Srgba;
use bevy::log::debug;
use bevy::math::Vec2;

use crate::editing::draw_event::ToolKind;
use crate::editing::draw_events::DrawEventList;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other,
}

/// Buttons held during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl PointerButtons {
    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
        middle: false,
    };

    pub fn contains(&self, button: PointerButton) -> bool {
        match button {
            PointerButton::Primary => self.primary,
            PointerButton::Secondary => self.secondary,
            PointerButton::Middle => self.middle,
            PointerButton::Other => false,
        }
    }
}

/// Keyboard modifiers held during a move
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// Cursor the host should show over the surface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorKind {
    #[default]
    Default,
    Drawing,
}

/// Pen used for new events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub tool: ToolKind,
    pub width: f32,
    pub color: Srgba,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum InputState {
    #[default]
    Idle,
    Drawing {
        anchor: Vec2,
    },
}

/// What a pointer event did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputResponse {
    /// The drawing changed and the surface should be repainted
    pub redraw: bool,
    /// A gesture ended, undo availability should be re-announced
    pub finalized: bool,
    /// Cursor to show, `None` leaves it as it is
    pub cursor: Option<CursorKind>,
}

#[derive(Debug, Default)]
pub struct InputStateMachine {
    state: InputState,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, InputState::Drawing { .. })
    }

    /// Idle to Drawing on a primary press
    pub fn press(
        &mut self,
        events: &mut DrawEventList,
        button: PointerButton,
        position: Vec2,
        pen: &Pen,
        now: Duration,
    ) -> InputResponse {
        if button != PointerButton::Primary {
            return InputResponse::default();
        }

        events.begin_event(pen.tool, pen.width, pen.color, position, now);
        self.state = InputState::Drawing { anchor: position };
        InputResponse {
            redraw: true,
            finalized: false,
            cursor: Some(CursorKind::Drawing),
        }
    }

    /// Extend the gesture while the primary button is held
    ///
    /// The drawing cursor shows while drawing or whenever Ctrl is not held.
    pub fn pointer_move(
        &mut self,
        events: &mut DrawEventList,
        buttons: PointerButtons,
        position: Vec2,
        modifiers: Modifiers,
        now: Duration,
    ) -> InputResponse {
        let cursor = if self.is_drawing() || !modifiers.ctrl {
            Some(CursorKind::Drawing)
        } else {
            None
        };

        let redraw = self.is_drawing()
            && buttons.contains(PointerButton::Primary)
            && events.extend_event(position, now);

        InputResponse {
            redraw,
            finalized: false,
            cursor,
        }
    }

    /// Drawing to Idle on a primary release
    pub fn release(
        &mut self,
        events: &mut DrawEventList,
        button: PointerButton,
        position: Vec2,
        now: Duration,
    ) -> InputResponse {
        if button != PointerButton::Primary || !self.is_drawing() {
            return InputResponse::default();
        }

        events.finish_event(position, now);
        self.state = InputState::Idle;
        debug!("Gesture finished at {:?}", position);
        InputResponse {
            redraw: true,
            finalized: true,
            cursor: None,
        }
    }

    /// Drop back to Idle, used when undo interrupts a gesture
    pub fn cancel(&mut self) {
        self.state = InputState::Idle;
    }
}

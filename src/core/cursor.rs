//! The cursor plugin.
//!
//! Shows the cursor the drawing area asks for on the primary window. The
//! drawing area picks a crosshair while drawing (and while hovering without
//! Ctrl held), the default arrow otherwise.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, SystemCursorIcon};
use bevy::winit::cursor::CursorIcon;

use crate::core::input::CursorKind;
use crate::core::state::DrawingArea;
use crate::editing::system_sets::DrawingSets;

pub struct CursorPlugin;

impl Plugin for CursorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_cursor_icon.in_set(DrawingSets::Feedback));
    }
}

pub fn system_cursor(kind: CursorKind) -> SystemCursorIcon {
    match kind {
        CursorKind::Default => SystemCursorIcon::Default,
        CursorKind::Drawing => SystemCursorIcon::Crosshair,
    }
}

fn apply_cursor_icon(
    mut commands: Commands,
    windows: Query<Entity, With<PrimaryWindow>>,
    area: Res<DrawingArea>,
    mut shown: Local<Option<CursorKind>>,
) {
    let kind = area.cursor();
    if *shown == Some(kind) {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    commands
        .entity(window)
        .insert(CursorIcon::from(system_cursor(kind)));
    *shown = Some(kind);
}

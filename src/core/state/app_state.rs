//! The drawing surface
//!
//! `DrawingArea` owns everything a surface needs: the draw event list, the
//! pointer state machine, pen properties, surface size and the scene sync
//! state. All mutation of the drawing goes through it. Property changes are
//! queued as [`Notification`]s for the host to pick up.

use std::path::Path;
use std::time::Duration;

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::core::errors::{validate_pen_width, SketchResult, SyncError};
use crate::core::input::{
    CursorKind, InputResponse, InputStateMachine, Modifiers, Pen,
    PointerButton, PointerButtons,
};
use crate::core::settings::DrawingSettings;
use crate::editing::draw_event::{DrawEvent, ToolKind};
use crate::editing::draw_events::DrawEventList;
use crate::io::svg_export;
use crate::rendering::scene_sync::{RenderNodeTree, SceneSync, SyncReport};
use crate::rendering::tessellation::LyonTessellator;

/// Change notifications for the host UI
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    PenColorChanged,
    PenWidthChanged,
    ToolChanged,
    CanUndoChanged,
}

#[derive(Resource)]
pub struct DrawingArea {
    events: DrawEventList,
    input: InputStateMachine,
    pen: Pen,
    size: Vec2,
    scene: SceneSync<LyonTessellator>,
    notifications: Vec<Notification>,
    needs_redraw: bool,
    cursor: CursorKind,
}

impl Default for DrawingArea {
    fn default() -> Self {
        Self::new(&DrawingSettings::default())
    }
}

impl DrawingArea {
    /// A surface using the pen from `settings`
    ///
    /// Invalid settings fall back to the defaults for the offending field.
    pub fn new(settings: &DrawingSettings) -> Self {
        let defaults = DrawingSettings::default();
        let color = settings.pen_color().unwrap_or_else(|err| {
            warn!("{}, using the default pen color", err);
            defaults.pen_color().unwrap_or(Srgba::BLACK)
        });
        let width = if validate_pen_width(settings.pen_width).is_ok() {
            settings.pen_width
        } else {
            warn!("Invalid pen width {}, using the default", settings.pen_width);
            defaults.pen_width
        };

        Self {
            events: DrawEventList::new(),
            input: InputStateMachine::new(),
            pen: Pen {
                tool: settings.tool,
                width,
                color,
            },
            size: Vec2::ZERO,
            scene: SceneSync::new(LyonTessellator::new()),
            notifications: Vec::new(),
            needs_redraw: true,
            cursor: CursorKind::Default,
        }
    }

    // Properties /////////////////////////////////////////////////////////////

    pub fn pen_color(&self) -> Srgba {
        self.pen.color
    }

    pub fn set_pen_color(&mut self, color: Srgba) {
        if self.pen.color == color {
            return;
        }
        self.pen.color = color;
        self.notify(Notification::PenColorChanged);
    }

    pub fn pen_width(&self) -> f32 {
        self.pen.width
    }

    /// Change the pen width, rejecting non-positive widths
    pub fn set_pen_width(&mut self, width: f32) -> SketchResult<()> {
        if let Err(err) = validate_pen_width(width) {
            warn!("Rejected pen width: {}", err);
            return Err(err);
        }
        if self.pen.width == width {
            return Ok(());
        }
        self.pen.width = width;
        self.notify(Notification::PenWidthChanged);
        Ok(())
    }

    pub fn tool(&self) -> ToolKind {
        self.pen.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.pen.tool == tool {
            return;
        }
        self.pen.tool = tool;
        self.notify(Notification::ToolChanged);
    }

    pub fn can_undo(&self) -> bool {
        self.events.can_undo()
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn resize(&mut self, size: Vec2) {
        if self.size != size {
            self.size = size;
            self.needs_redraw = true;
        }
    }

    pub fn cursor(&self) -> CursorKind {
        self.cursor
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    pub fn is_drawing(&self) -> bool {
        self.input.is_drawing()
    }

    pub fn events(&self) -> &[DrawEvent] {
        self.events.events()
    }

    pub fn draw_events(&self) -> &DrawEventList {
        &self.events
    }

    /// Hand over queued notifications, oldest first
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // Commands ///////////////////////////////////////////////////////////////

    /// Remove the last event, safe to call with nothing to undo
    pub fn undo(&mut self) {
        self.input.cancel();
        if self.events.undo() && self.events.is_empty() {
            self.notify(Notification::CanUndoChanged);
        }
        self.needs_redraw = true;
    }

    /// Write the drawing as SVG, skipped when `destination` is empty
    pub fn export_to_vector_file(&self, destination: &Path) -> SketchResult<()> {
        if destination.as_os_str().is_empty() {
            debug!("No export destination, skipping");
            return Ok(());
        }
        svg_export::export_svg(self.events(), self.size, destination)
    }

    // Pointer input //////////////////////////////////////////////////////////

    pub fn pointer_press(
        &mut self,
        button: PointerButton,
        position: Vec2,
        now: Duration,
    ) {
        let response =
            self.input
                .press(&mut self.events, button, position, &self.pen, now);
        self.apply(response);
    }

    pub fn pointer_move(
        &mut self,
        buttons: PointerButtons,
        position: Vec2,
        modifiers: Modifiers,
        now: Duration,
    ) {
        let response = self.input.pointer_move(
            &mut self.events,
            buttons,
            position,
            modifiers,
            now,
        );
        self.apply(response);
    }

    pub fn pointer_release(
        &mut self,
        button: PointerButton,
        position: Vec2,
        now: Duration,
    ) {
        let response =
            self.input.release(&mut self.events, button, position, now);
        self.apply(response);
    }

    // Rendering //////////////////////////////////////////////////////////////

    /// The render pass: bring `tree` in line with the event list
    ///
    /// A pass with failed nodes leaves the redraw request standing, so the
    /// next pass rebuilds the last one.
    pub fn update_paint_node<R: RenderNodeTree + ?Sized>(
        &mut self,
        tree: &mut R,
    ) -> Result<SyncReport, SyncError> {
        let result = self.scene.sync(tree, self.events.events(), self.size);
        self.needs_redraw = result.is_err();
        result
    }

    fn apply(&mut self, response: InputResponse) {
        if response.redraw {
            self.needs_redraw = true;
        }
        if let Some(cursor) = response.cursor {
            self.cursor = cursor;
        }
        if response.finalized {
            self.notify(Notification::CanUndoChanged);
        }
    }

    fn notify(&mut self, notification: Notification) {
        debug!("Drawing area: {:?}", notification);
        self.notifications.push(notification);
    }
}

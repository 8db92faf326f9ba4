//! The draw event list
//!
//! Source of truth for the drawing. Events are appended at gesture start,
//! only the last one is edited while a gesture is active, and undo drops the
//! last one. List order is render order.

use std::time::Duration;

use bevy::color::Srgba;
use bevy::log::debug;
use bevy::math::Vec2;

use crate::core::settings::IDLE_SPLIT_THRESHOLD;
use crate::editing::draw_event::{DrawEvent, EventId, ToolKind};
use crate::geometry::path::Path;

/// The gesture currently editing the last event
#[derive(Debug, Clone, Copy)]
struct Gesture {
    tool: ToolKind,
    anchor: Vec2,
    /// Time of the last sample that touched the event
    last_sample: Duration,
}

#[derive(Debug, Default)]
pub struct DrawEventList {
    events: Vec<DrawEvent>,
    gesture: Option<Gesture>,
    next_id: u64,
}

impl DrawEventList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[DrawEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn last(&self) -> Option<&DrawEvent> {
        self.events.last()
    }

    pub fn can_undo(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn is_gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Append a new event and make it the one under edit
    ///
    /// Freehand starts with a move to `start`. Shape tools start as a
    /// zero-size filled shape anchored at `start`.
    pub fn begin_event(
        &mut self,
        tool: ToolKind,
        pen_width: f32,
        pen_color: Srgba,
        start: Vec2,
        now: Duration,
    ) -> EventId {
        let id = self.push(DrawEvent {
            id: EventId(0),
            path: tool.shape_path(start, start),
            pen_width,
            pen_color,
            is_filled_shape: tool.is_shape(),
            tool,
        });
        self.gesture = Some(Gesture {
            tool,
            anchor: start,
            last_sample: now,
        });
        debug!("Began {:?} event {:?} at {:?}", tool, id, start);
        id
    }

    /// Apply `edit` to the event under edit
    ///
    /// If a freehand gesture has been idle for longer than
    /// [`IDLE_SPLIT_THRESHOLD`], a new event is started first, continuing
    /// from where the previous one ended, and `edit` applies to that one.
    /// `edit` receives the gesture anchor. Returns false when no gesture is
    /// active.
    pub fn update_last_event<F>(&mut self, now: Duration, edit: F) -> bool
    where
        F: FnOnce(&mut DrawEvent, Vec2),
    {
        let Some(gesture) = self.gesture else {
            return false;
        };

        let idle = now.saturating_sub(gesture.last_sample);
        if gesture.tool == ToolKind::Freehand && idle > IDLE_SPLIT_THRESHOLD {
            self.split_idle_event();
        }

        let Some(event) = self.events.last_mut() else {
            self.gesture = None;
            return false;
        };
        edit(event, gesture.anchor);

        if let Some(gesture) = self.gesture.as_mut() {
            gesture.last_sample = now;
        }
        true
    }

    /// Move the gesture to `point`
    ///
    /// Freehand appends a line. Shape tools replace the path with a fresh
    /// shape spanning from the anchor to `point`.
    pub fn extend_event(&mut self, point: Vec2, now: Duration) -> bool {
        self.update_last_event(now, |event, anchor| match event.tool {
            ToolKind::Freehand => event.path.line_to(point),
            ToolKind::Rectangle | ToolKind::Ellipse => {
                event.path = event.tool.shape_path(anchor, point);
            }
        })
    }

    /// Extend to the final `point` and end the gesture
    pub fn finish_event(&mut self, point: Vec2, now: Duration) -> bool {
        let extended = self.extend_event(point, now);
        self.gesture = None;
        extended
    }

    /// Forget the active gesture, leaving the events untouched
    pub fn cancel_gesture(&mut self) {
        self.gesture = None;
    }

    /// Drop the last event, a no-op on an empty list
    ///
    /// Always cancels the active gesture. Returns whether an event was
    /// removed.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        match self.events.pop() {
            Some(event) => {
                debug!("Undid event {:?}, {} left", event.id, self.events.len());
                true
            }
            None => false,
        }
    }

    fn split_idle_event(&mut self) {
        let Some(previous) = self.events.last() else {
            return;
        };
        let continued = DrawEvent {
            id: EventId(0),
            path: Path::new(previous.path.current_position()),
            pen_width: previous.pen_width,
            pen_color: previous.pen_color,
            is_filled_shape: false,
            tool: ToolKind::Freehand,
        };
        let previous_id = previous.id;
        let id = self.push(continued);
        debug!("Idle gesture split event {:?} into {:?}", previous_id, id);
    }

    fn push(&mut self, mut event: DrawEvent) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        event.id = id;
        self.events.push(event);
        id
    }
}

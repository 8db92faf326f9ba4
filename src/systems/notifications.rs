//! Drawing area notifications as Bevy events
//!
//! The drawing area queues a [`Notification`] whenever the pen color, pen
//! width, tool or undo availability changes. These systems move the queue
//! into the event bus once per frame so UI code can react with an
//! `EventReader<Notification>`.

use bevy::prelude::*;

use crate::core::state::{DrawingArea, Notification};

pub fn publish_notifications(
    mut area: ResMut<DrawingArea>,
    mut notifications: EventWriter<Notification>,
) {
    for notification in area.take_notifications() {
        notifications.write(notification);
    }
}

pub fn log_notifications(
    mut notifications: EventReader<Notification>,
    area: Res<DrawingArea>,
) {
    for notification in notifications.read() {
        match notification {
            Notification::PenColorChanged => {
                info!("Pen color: {}", area.pen_color().to_hex())
            }
            Notification::PenWidthChanged => {
                info!("Pen width: {}", area.pen_width())
            }
            Notification::ToolChanged => info!("Tool: {:?}", area.tool()),
            Notification::CanUndoChanged => {
                info!("Can undo: {}", area.can_undo())
            }
        }
    }
}

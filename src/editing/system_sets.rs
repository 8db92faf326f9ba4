//! System Sets for the drawing surface
//!
//! Per frame, pointer input and shortcuts mutate the drawing first, then the
//! render pass syncs entities, then notifications go out.

use bevy::prelude::*;

/// System sets that define the execution order within a frame
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum DrawingSets {
    /// Pointer events and window size
    Input,

    /// Keyboard shortcuts (undo, export, tool switching)
    Commands,

    /// Sync draw event nodes with the event list
    Rendering,

    /// Publish notifications and update the cursor
    Feedback,
}

/// Plugin to configure system set ordering
pub struct DrawingSystemSetsPlugin;

impl Plugin for DrawingSystemSetsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                DrawingSets::Input,
                DrawingSets::Commands,
                DrawingSets::Rendering,
                DrawingSets::Feedback,
            )
                .chain(),
        );
    }
}

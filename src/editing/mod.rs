pub mod draw_event;
pub mod draw_events;
pub mod system_sets;
pub mod undo_plugin;

// Re-export important types and plugins
pub use draw_event::{DrawEvent, EventId, ToolKind};
pub use draw_events::DrawEventList;
pub use undo_plugin::UndoPlugin;

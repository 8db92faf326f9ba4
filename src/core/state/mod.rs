//! Application state management.
//!
//! The drawing surface lives in a single resource that owns the event list
//! and everything derived from it.

pub mod app_state;

pub use app_state::*;

//! Geometric Primitives and Operations

pub mod path;
pub mod shapes;

// Re-export commonly used items
pub use path::{ElementKind, Path, PathSegment, RawElement};

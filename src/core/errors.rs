//!    Error handling
//!
//! Failures at the tessellation boundary are typed so the scene sync can
//! propagate them per node. Everything at the application level (config,
//! export, CLI) goes through anyhow.

#[allow(unused_imports)]
pub use anyhow::{anyhow, bail, ensure, Error};
use anyhow::{Context, Result};

use crate::editing::draw_event::EventId;
use crate::geometry::path::ElementKind;
use crate::rendering::scene_sync::SyncReport;

/// Result type alias for application-level operations
pub type SketchResult<T> = Result<T>;

/// A raw element stream that violates the path encoding.
///
/// These are producer bugs, never user data: the operation that hit one
/// must fail rather than skip the offending records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PathEncodingError {
    #[error("path has no elements")]
    Empty,
    #[error("path must start with a move, found {found:?}")]
    MissingMoveTo { found: ElementKind },
    #[error("cubic curve at element {index} is missing its two data records")]
    TruncatedCubic { index: usize },
    #[error("curve data record at element {index} has no curve to belong to")]
    OrphanCurveData { index: usize },
}

/// The tessellation engine rejected the geometry
#[derive(Debug, thiserror::Error)]
#[error("tessellation failed: {0:?}")]
pub struct TessellationError(pub lyon::tessellation::TessellationError);

/// Anything that can stop a single render node from being built
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Encoding(#[from] PathEncodingError),
    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// A render pass that kept the tree in step with the event list but could
/// not build every node. The failed nodes are blank.
#[derive(Debug, thiserror::Error)]
#[error("{} draw event node(s) failed to render", .failures.len())]
pub struct SyncError {
    pub report: SyncReport,
    pub failures: Vec<(EventId, RenderError)>,
}

/// Helper functions for creating common error contexts
pub trait SketchContext<T> {
    /// Add file operation context to an error
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> SketchResult<T>;
}

impl<T, E> SketchContext<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_file_context<P: AsRef<std::path::Path>>(
        self,
        operation: &str,
        path: P,
    ) -> SketchResult<T> {
        self.with_context(|| {
            format!("Failed to {} file: {}", operation, path.as_ref().display())
        })
    }
}

/// Pen widths must be positive and finite
pub fn validate_pen_width(width: f32) -> SketchResult<()> {
    ensure!(
        width.is_finite() && width > 0.0,
        "Pen width must be a positive number, got: {}",
        width
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pen_width_validation() {
        assert!(validate_pen_width(4.0).is_ok());
        assert!(validate_pen_width(0.0).is_err());
        assert!(validate_pen_width(-1.0).is_err());
        assert!(validate_pen_width(f32::NAN).is_err());
    }

    #[test]
    fn test_file_context_names_the_path() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result.with_file_context("read", "settings.json").unwrap_err();
        assert_eq!(err.to_string(), "Failed to read file: settings.json");
    }
}

//! Input/Output Operations
//!
//! File output for drawings. The only format is SVG.

pub mod svg_export;

pub use svg_export::export_svg;

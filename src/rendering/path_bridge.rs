//! Bridge from draw-event paths to lyon
//!
//! The bridge consumes the flat element stream of a [`Path`] in order and
//! replays it into a [`PathSink`]. Cubics arrive as three records and are
//! reassembled before reaching the sink, so every sink only ever sees whole
//! curves. The same replay drives lyon for tessellation and the SVG writer
//! for export.

use bevy::math::Vec2;
use lyon::math::point;

use crate::core::errors::PathEncodingError;
use crate::geometry::path::{ElementKind, Path, RawElement, POINT_EPSILON};

/// Receiver of a replayed path
///
/// Calls always come as `begin`, any number of edges, then `end`.
pub trait PathSink {
    fn begin(&mut self, at: Vec2);
    fn line_to(&mut self, to: Vec2);
    fn cubic_bezier_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2);
    /// Finish the current subpath, `close` when it returns to its start
    fn end(&mut self, close: bool);
}

/// Per-subpath bookkeeping used to decide whether a subpath closes
struct Subpath {
    start: Vec2,
    current: Vec2,
    edges: usize,
}

impl Subpath {
    fn is_closed(&self) -> bool {
        self.edges >= 2 && self.current.distance(self.start) <= POINT_EPSILON
    }
}

/// Replay a raw element stream into `sink`
///
/// Fails on a `CurveTo` that is not followed by exactly two `CurveToData`
/// records and on a `CurveToData` with no curve in front of it. A stream may
/// omit its leading move, in which case the first edge starts at the origin.
pub fn replay_elements<S: PathSink>(
    elements: &[RawElement],
    sink: &mut S,
) -> Result<(), PathEncodingError> {
    let mut subpath: Option<Subpath> = None;
    let mut i = 0;

    while i < elements.len() {
        let element = elements[i];
        match element.kind {
            ElementKind::MoveTo => {
                if let Some(open) = subpath.take() {
                    sink.end(open.is_closed());
                }
                sink.begin(element.point);
                subpath = Some(Subpath {
                    start: element.point,
                    current: element.point,
                    edges: 0,
                });
            }
            ElementKind::LineTo => {
                let open = ensure_subpath(&mut subpath, sink);
                sink.line_to(element.point);
                open.current = element.point;
                open.edges += 1;
            }
            ElementKind::CurveTo => {
                let (ctrl2, to) = match (elements.get(i + 1), elements.get(i + 2))
                {
                    (Some(c2), Some(to))
                        if c2.kind == ElementKind::CurveToData
                            && to.kind == ElementKind::CurveToData =>
                    {
                        (c2.point, to.point)
                    }
                    _ => return Err(PathEncodingError::TruncatedCubic { index: i }),
                };
                let open = ensure_subpath(&mut subpath, sink);
                sink.cubic_bezier_to(element.point, ctrl2, to);
                open.current = to;
                open.edges += 1;
                // The two data records belong to this curve
                i += 2;
            }
            ElementKind::CurveToData => {
                return Err(PathEncodingError::OrphanCurveData { index: i });
            }
        }
        i += 1;
    }

    if let Some(open) = subpath {
        sink.end(open.is_closed());
    }
    Ok(())
}

fn ensure_subpath<'a, S: PathSink>(
    subpath: &'a mut Option<Subpath>,
    sink: &mut S,
) -> &'a mut Subpath {
    subpath.get_or_insert_with(|| {
        sink.begin(Vec2::ZERO);
        Subpath {
            start: Vec2::ZERO,
            current: Vec2::ZERO,
            edges: 0,
        }
    })
}

/// Path builder handed to the tessellation service
pub struct LyonPathBuilder {
    builder: lyon::path::path::Builder,
}

impl Default for LyonPathBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LyonPathBuilder {
    pub fn new() -> Self {
        Self {
            builder: lyon::path::Path::builder(),
        }
    }

    /// Bridge a whole path through its raw element stream
    pub fn from_path(path: &Path) -> Result<Self, PathEncodingError> {
        Self::from_elements(&path.elements())
    }

    pub fn from_elements(
        elements: &[RawElement],
    ) -> Result<Self, PathEncodingError> {
        let mut builder = Self::new();
        replay_elements(elements, &mut builder)?;
        Ok(builder)
    }

    pub fn build(self) -> lyon::path::Path {
        self.builder.build()
    }
}

impl PathSink for LyonPathBuilder {
    fn begin(&mut self, at: Vec2) {
        self.builder.begin(point(at.x, at.y));
    }

    fn line_to(&mut self, to: Vec2) {
        self.builder.line_to(point(to.x, to.y));
    }

    fn cubic_bezier_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) {
        self.builder.cubic_bezier_to(
            point(ctrl1.x, ctrl1.y),
            point(ctrl2.x, ctrl2.y),
            point(to.x, to.y),
        );
    }

    fn end(&mut self, close: bool) {
        self.builder.end(close);
    }
}

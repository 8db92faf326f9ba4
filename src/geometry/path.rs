//! Path data for draw events
//!
//! A [`Path`] is an ordered list of tagged segments. A cubic curve is always a
//! single [`PathSegment::CubicBezierTo`] carrying all three of its points.
//!
//! At the tessellation boundary a path is lowered to a flat stream of
//! [`RawElement`]s, where a cubic takes three consecutive records:
//! `CurveTo(ctrl1)`, `CurveToData(ctrl2)`, `CurveToData(end)`. The stream is
//! decoded back by [`crate::rendering::path_bridge::replay_elements`], which
//! reassembles cubics atomically and rejects truncated ones.

use bevy::math::{Rect, Vec2};
use kurbo::{BezPath, PathEl};

use crate::core::errors::PathEncodingError;
use crate::rendering::path_bridge::{replay_elements, PathSink};

/// Distance under which two points are treated as the same position
pub const POINT_EPSILON: f32 = 1e-4;

/// One logical segment of a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Vec2),
    LineTo(Vec2),
    CubicBezierTo { ctrl1: Vec2, ctrl2: Vec2, to: Vec2 },
}

impl PathSegment {
    /// The point the pen ends up at after this segment
    pub fn end_point(&self) -> Vec2 {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
            PathSegment::CubicBezierTo { to, .. } => to,
        }
    }
}

/// Kind tag of a raw element record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    MoveTo,
    LineTo,
    /// First control point of a cubic
    CurveTo,
    /// Second control point or end point of a cubic
    CurveToData,
}

/// A single record of the flat element stream
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawElement {
    pub kind: ElementKind,
    pub point: Vec2,
}

impl RawElement {
    pub fn new(kind: ElementKind, point: Vec2) -> Self {
        Self { kind, point }
    }
}

/// An ordered sequence of segments whose first segment is always a move
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    /// Start a new path at `start`
    pub fn new(start: Vec2) -> Self {
        Self {
            segments: vec![PathSegment::MoveTo(start)],
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a constructed path, kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Start a new subpath
    pub fn move_to(&mut self, to: Vec2) {
        self.segments.push(PathSegment::MoveTo(to));
    }

    pub fn line_to(&mut self, to: Vec2) {
        self.segments.push(PathSegment::LineTo(to));
    }

    pub fn cubic_bezier_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) {
        self.segments
            .push(PathSegment::CubicBezierTo { ctrl1, ctrl2, to });
    }

    /// Where the pen currently is, i.e. the end point of the last segment
    pub fn current_position(&self) -> Vec2 {
        self.segments
            .last()
            .map(PathSegment::end_point)
            .unwrap_or(Vec2::ZERO)
    }

    /// Lower the path to the flat element stream, three records per cubic
    pub fn elements(&self) -> Vec<RawElement> {
        let mut elements = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => {
                    elements.push(RawElement::new(ElementKind::MoveTo, p))
                }
                PathSegment::LineTo(p) => {
                    elements.push(RawElement::new(ElementKind::LineTo, p))
                }
                PathSegment::CubicBezierTo { ctrl1, ctrl2, to } => {
                    elements.push(RawElement::new(ElementKind::CurveTo, ctrl1));
                    elements
                        .push(RawElement::new(ElementKind::CurveToData, ctrl2));
                    elements.push(RawElement::new(ElementKind::CurveToData, to));
                }
            }
        }
        elements
    }

    /// Rebuild a path from a flat element stream
    pub fn from_elements(
        elements: &[RawElement],
    ) -> Result<Self, PathEncodingError> {
        let Some(first) = elements.first() else {
            return Err(PathEncodingError::Empty);
        };
        if first.kind != ElementKind::MoveTo {
            return Err(PathEncodingError::MissingMoveTo { found: first.kind });
        }

        let mut collector = SegmentCollector::default();
        replay_elements(elements, &mut collector)?;
        Ok(Self {
            segments: collector.segments,
        })
    }

    /// Convert a kurbo path, lowering `ClosePath` to an explicit line back
    /// to the subpath start when the pen is not already there
    pub fn from_bezpath(bez: &BezPath) -> Option<Self> {
        let mut segments = Vec::new();
        let mut subpath_start = None;
        let mut current = Vec2::ZERO;

        for element in bez.elements() {
            match *element {
                PathEl::MoveTo(p) => {
                    current = to_vec2(p);
                    subpath_start = Some(current);
                    segments.push(PathSegment::MoveTo(current));
                }
                PathEl::LineTo(p) => {
                    current = to_vec2(p);
                    segments.push(PathSegment::LineTo(current));
                }
                PathEl::QuadTo(c, p) => {
                    // Degree elevation, the quad is exactly representable
                    let c = to_vec2(c);
                    let to = to_vec2(p);
                    let ctrl1 = current + (c - current) * (2.0 / 3.0);
                    let ctrl2 = to + (c - to) * (2.0 / 3.0);
                    current = to;
                    segments.push(PathSegment::CubicBezierTo { ctrl1, ctrl2, to });
                }
                PathEl::CurveTo(c1, c2, p) => {
                    current = to_vec2(p);
                    segments.push(PathSegment::CubicBezierTo {
                        ctrl1: to_vec2(c1),
                        ctrl2: to_vec2(c2),
                        to: current,
                    });
                }
                PathEl::ClosePath => {
                    if let Some(start) = subpath_start {
                        if current.distance(start) > POINT_EPSILON {
                            segments.push(PathSegment::LineTo(start));
                        }
                        current = start;
                    }
                }
            }
        }

        match segments.first() {
            Some(PathSegment::MoveTo(_)) => Some(Self { segments }),
            _ => None,
        }
    }

    pub fn to_bezpath(&self) -> BezPath {
        let mut bez = BezPath::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => bez.move_to(to_point(p)),
                PathSegment::LineTo(p) => bez.line_to(to_point(p)),
                PathSegment::CubicBezierTo { ctrl1, ctrl2, to } => {
                    bez.curve_to(to_point(ctrl1), to_point(ctrl2), to_point(to))
                }
            }
        }
        bez
    }

    /// Bounding box of all points, control points included
    pub fn control_bounds(&self) -> Rect {
        let mut points = self.segments.iter().flat_map(|segment| {
            let pts: [Option<Vec2>; 3] = match *segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => {
                    [Some(p), None, None]
                }
                PathSegment::CubicBezierTo { ctrl1, ctrl2, to } => {
                    [Some(ctrl1), Some(ctrl2), Some(to)]
                }
            };
            pts.into_iter().flatten()
        });

        let Some(first) = points.next() else {
            return Rect::default();
        };
        points.fold(Rect::from_corners(first, first), |rect, p| {
            rect.union_point(p)
        })
    }
}

#[derive(Default)]
struct SegmentCollector {
    segments: Vec<PathSegment>,
}

impl PathSink for SegmentCollector {
    fn begin(&mut self, at: Vec2) {
        self.segments.push(PathSegment::MoveTo(at));
    }

    fn line_to(&mut self, to: Vec2) {
        self.segments.push(PathSegment::LineTo(to));
    }

    fn cubic_bezier_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) {
        self.segments
            .push(PathSegment::CubicBezierTo { ctrl1, ctrl2, to });
    }

    // The closing point is already an explicit segment
    fn end(&mut self, _close: bool) {}
}

fn to_vec2(p: kurbo::Point) -> Vec2 {
    Vec2::new(p.x as f32, p.y as f32)
}

fn to_point(v: Vec2) -> kurbo::Point {
    kurbo::Point::new(v.x as f64, v.y as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_is_three_raw_records() {
        let mut path = Path::new(Vec2::ZERO);
        path.cubic_bezier_to(
            Vec2::new(10.0, 0.0),
            Vec2::new(10.0, 10.0),
            Vec2::new(0.0, 10.0),
        );

        let elements = path.elements();
        assert_eq!(elements.len(), 4);
        assert_eq!(elements[1].kind, ElementKind::CurveTo);
        assert_eq!(elements[2].kind, ElementKind::CurveToData);
        assert_eq!(elements[3].kind, ElementKind::CurveToData);
        assert_eq!(elements[3].point, Vec2::new(0.0, 10.0));
    }

    #[test]
    fn test_elements_decode_back_to_same_path() {
        let mut path = Path::new(Vec2::new(1.0, 2.0));
        path.line_to(Vec2::new(5.0, 2.0));
        path.cubic_bezier_to(
            Vec2::new(6.0, 3.0),
            Vec2::new(7.0, 4.0),
            Vec2::new(8.0, 8.0),
        );
        path.move_to(Vec2::new(20.0, 20.0));
        path.line_to(Vec2::new(25.0, 20.0));

        let decoded = Path::from_elements(&path.elements()).unwrap();
        assert_eq!(decoded, path);
    }

    #[test]
    fn test_truncated_cubic_is_rejected() {
        let elements = [
            RawElement::new(ElementKind::MoveTo, Vec2::ZERO),
            RawElement::new(ElementKind::CurveTo, Vec2::new(1.0, 0.0)),
            RawElement::new(ElementKind::CurveToData, Vec2::new(1.0, 1.0)),
        ];
        assert_eq!(
            Path::from_elements(&elements),
            Err(PathEncodingError::TruncatedCubic { index: 1 })
        );
    }

    #[test]
    fn test_from_elements_requires_leading_move() {
        let elements = [RawElement::new(ElementKind::LineTo, Vec2::ONE)];
        assert_eq!(
            Path::from_elements(&elements),
            Err(PathEncodingError::MissingMoveTo {
                found: ElementKind::LineTo
            })
        );
        assert_eq!(Path::from_elements(&[]), Err(PathEncodingError::Empty));
    }

    #[test]
    fn test_bezpath_close_becomes_line_to_start() {
        let mut bez = BezPath::new();
        bez.move_to((0.0, 0.0));
        bez.line_to((10.0, 0.0));
        bez.line_to((10.0, 10.0));
        bez.close_path();

        let path = Path::from_bezpath(&bez).unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.segments()[3], PathSegment::LineTo(Vec2::ZERO));
        assert_eq!(path.current_position(), Vec2::ZERO);
    }

    #[test]
    fn test_control_bounds_include_control_points() {
        let mut path = Path::new(Vec2::ZERO);
        path.cubic_bezier_to(
            Vec2::new(-5.0, 20.0),
            Vec2::new(15.0, 20.0),
            Vec2::new(10.0, 0.0),
        );
        let bounds = path.control_bounds();
        assert_eq!(bounds.min, Vec2::new(-5.0, 0.0));
        assert_eq!(bounds.max, Vec2::new(15.0, 20.0));
    }
}

//! Stroke and fill tessellation
//!
//! Turns bridged paths into triangle lists with 16-bit indices. Output is
//! deterministic: the same path and mode always give the same buffers.

use bevy::math::Vec2;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};

use crate::core::errors::{RenderError, TessellationError};
use crate::core::settings::TESSELLATION_TOLERANCE;
use crate::editing::draw_event::DrawEvent;
use crate::rendering::path_bridge::LyonPathBuilder;

/// How a path is turned into triangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TessellationMode {
    /// Ink along the path, `width` in surface units
    Stroke { width: f32 },
    /// Interior of the path
    Fill,
}

/// Triangle list ready to upload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TessellatedMesh {
    pub vertices: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl TessellatedMesh {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Every index in range and a whole number of triangles
    pub fn is_well_formed(&self) -> bool {
        self.indices.len() % 3 == 0
            && self
                .indices
                .iter()
                .all(|&i| (i as usize) < self.vertices.len())
    }
}

/// Two triangles spanning (0,0) to `size`
pub fn background_quad(size: Vec2) -> TessellatedMesh {
    TessellatedMesh {
        vertices: vec![
            [0.0, 0.0],
            [size.x, 0.0],
            [size.x, size.y],
            [0.0, size.y],
        ],
        indices: vec![0, 1, 2, 0, 3, 2],
    }
}

/// The tessellation engine boundary
pub trait Tessellate {
    fn tessellate(
        &mut self,
        builder: LyonPathBuilder,
        mode: TessellationMode,
    ) -> Result<TessellatedMesh, TessellationError>;
}

/// Tessellator backed by lyon
///
/// Holds on to the lyon tessellators so their internal buffers are reused
/// between calls.
pub struct LyonTessellator {
    fill: FillTessellator,
    stroke: StrokeTessellator,
}

impl Default for LyonTessellator {
    fn default() -> Self {
        Self::new()
    }
}

impl LyonTessellator {
    pub fn new() -> Self {
        Self {
            fill: FillTessellator::new(),
            stroke: StrokeTessellator::new(),
        }
    }
}

impl Tessellate for LyonTessellator {
    fn tessellate(
        &mut self,
        builder: LyonPathBuilder,
        mode: TessellationMode,
    ) -> Result<TessellatedMesh, TessellationError> {
        let path = builder.build();
        let mut buffers: VertexBuffers<[f32; 2], u16> = VertexBuffers::new();

        let result = match mode {
            TessellationMode::Fill => self.fill.tessellate_path(
                &path,
                &FillOptions::tolerance(TESSELLATION_TOLERANCE),
                &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| {
                    vertex.position().to_array()
                }),
            ),
            TessellationMode::Stroke { width } => self.stroke.tessellate_path(
                &path,
                &StrokeOptions::tolerance(TESSELLATION_TOLERANCE)
                    .with_line_width(width),
                &mut BuffersBuilder::new(
                    &mut buffers,
                    |vertex: StrokeVertex| vertex.position().to_array(),
                ),
            ),
        };
        result.map_err(TessellationError)?;

        Ok(TessellatedMesh {
            vertices: buffers.vertices,
            indices: buffers.indices,
        })
    }
}

/// Mode a draw event is rendered with
pub fn mode_for(event: &DrawEvent) -> TessellationMode {
    if event.is_filled_shape {
        TessellationMode::Fill
    } else {
        TessellationMode::Stroke {
            width: event.pen_width,
        }
    }
}

/// Bridge then tessellate one event
pub fn tessellate_event<T: Tessellate + ?Sized>(
    tessellator: &mut T,
    event: &DrawEvent,
) -> Result<TessellatedMesh, RenderError> {
    let builder = LyonPathBuilder::from_path(&event.path)?;
    Ok(tessellator.tessellate(builder, mode_for(event))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::Path;
    use crate::geometry::shapes;

    fn stroke(path: &Path, width: f32) -> TessellatedMesh {
        LyonTessellator::new()
            .tessellate(
                LyonPathBuilder::from_path(path).unwrap(),
                TessellationMode::Stroke { width },
            )
            .unwrap()
    }

    fn l_shape() -> Path {
        let mut path = Path::new(Vec2::new(0.0, 0.0));
        path.line_to(Vec2::new(10.0, 0.0));
        path.line_to(Vec2::new(10.0, 10.0));
        path
    }

    #[test]
    fn test_stroke_produces_triangles() {
        let mesh = stroke(&l_shape(), 4.0);
        assert!(!mesh.vertices.is_empty());
        assert!(mesh.indices.len() % 3 == 0);
        assert!(mesh.is_well_formed());
    }

    #[test]
    fn test_tessellation_is_deterministic() {
        let a = stroke(&l_shape(), 4.0);
        let b = stroke(&l_shape(), 4.0);

        let bits = |m: &TessellatedMesh| {
            m.vertices
                .iter()
                .flat_map(|v| [v[0].to_bits(), v[1].to_bits()])
                .collect::<Vec<_>>()
        };
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(a.indices, b.indices);
    }

    #[test]
    fn test_reused_tessellator_is_deterministic() {
        let mut tessellator = LyonTessellator::new();
        let path = shapes::ellipse(Vec2::ZERO, Vec2::new(30.0, 20.0));
        let mut run = |mode| {
            tessellator
                .tessellate(LyonPathBuilder::from_path(&path).unwrap(), mode)
                .unwrap()
        };
        let first = run(TessellationMode::Fill);
        let _ = run(TessellationMode::Stroke { width: 3.0 });
        let second = run(TessellationMode::Fill);
        assert_eq!(first, second);
    }

    #[test]
    fn test_fill_rectangle() {
        let path = shapes::rectangle(Vec2::new(5.0, 5.0), Vec2::new(20.0, 15.0));
        let mesh = LyonTessellator::new()
            .tessellate(
                LyonPathBuilder::from_path(&path).unwrap(),
                TessellationMode::Fill,
            )
            .unwrap();
        assert!(mesh.triangle_count() >= 2);
        assert!(mesh.is_well_formed());
        for v in &mesh.vertices {
            assert!((5.0..=20.0).contains(&v[0]));
            assert!((5.0..=15.0).contains(&v[1]));
        }
    }

    #[test]
    fn test_degenerate_paths_give_valid_meshes() {
        let p = Vec2::new(7.0, 7.0);

        let lone_move = stroke(&Path::new(p), 4.0);
        assert!(lone_move.is_well_formed());

        let zero_rect = LyonTessellator::new()
            .tessellate(
                LyonPathBuilder::from_path(&shapes::rectangle(p, p)).unwrap(),
                TessellationMode::Fill,
            )
            .unwrap();
        assert!(zero_rect.is_well_formed());
    }

    #[test]
    fn test_background_quad() {
        let quad = background_quad(Vec2::new(640.0, 480.0));
        assert_eq!(quad.vertices[2], [640.0, 480.0]);
        assert_eq!(quad.triangle_count(), 2);
        assert!(quad.is_well_formed());
    }
}

//! Mesh utility functions for rendering
//!
//! Converts tessellator output into Bevy meshes.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

use crate::rendering::tessellation::TessellatedMesh;

/// Build a 2D triangle list mesh from tessellated geometry
///
/// Vertices stay in drawing coordinates, the parent node maps them to world
/// space. The mesh stays in the main world after upload so later passes can
/// rewrite it.
pub fn mesh_from_tessellated(geometry: &TessellatedMesh) -> Mesh {
    let vertex_count = geometry.vertices.len();
    let positions = geometry
        .vertices
        .iter()
        .map(|[x, y]| [*x, *y, 0.0])
        .collect::<Vec<_>>();
    let uvs = geometry.vertices.clone();
    let normals = vec![[0.0, 0.0, 1.0]; vertex_count];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U16(geometry.indices.clone()));
    mesh
}

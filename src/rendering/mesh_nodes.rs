//! Mesh-based drawing nodes
//!
//! The Bevy side of the render tree. The root is an entity holding the
//! background quad; each draw event gets one child entity with its own mesh
//! and material. Children are kept in event order and stacked along z so
//! later events draw on top.
//!
//! Geometry is built in drawing coordinates (origin top-left, y down). The
//! root transform maps that onto the 2D camera, which looks at the window
//! center with y up.

use bevy::prelude::*;
use bevy::render::mesh::Mesh2d;
use bevy::sprite::{ColorMaterial, MeshMaterial2d};

use crate::core::settings::{BACKGROUND_COLOR, NODE_Z_STEP};
use crate::core::state::DrawingArea;
use crate::rendering::mesh_utils::mesh_from_tessellated;
use crate::rendering::scene_sync::RenderNodeTree;
use crate::rendering::tessellation::{background_quad, TessellatedMesh};

/// Marks the background entity that parents all draw event nodes
#[derive(Component)]
pub struct DrawingRoot;

/// Marks the entity rendering one draw event
#[derive(Component)]
pub struct DrawEventNode;

/// One child node and the assets it owns
#[derive(Debug, Clone)]
pub struct ChildNode {
    pub entity: Entity,
    pub mesh: Handle<Mesh>,
    pub material: Handle<ColorMaterial>,
}

/// Entities and assets making up the drawing, in event order
#[derive(Resource, Default)]
pub struct DrawingNodes {
    pub root: Option<Entity>,
    pub root_mesh: Option<Handle<Mesh>>,
    pub children: Vec<ChildNode>,
}

/// Render tree backed by Bevy entities and assets
pub struct BevyNodeTree<'a, 'w, 's> {
    pub commands: &'a mut Commands<'w, 's>,
    pub meshes: &'a mut Assets<Mesh>,
    pub materials: &'a mut Assets<ColorMaterial>,
    pub nodes: &'a mut DrawingNodes,
}

/// Map drawing coordinates onto a camera centered on the surface
pub fn root_transform(size: Vec2) -> Transform {
    Transform::from_xyz(-size.x / 2.0, size.y / 2.0, 0.0)
        .with_scale(Vec3::new(1.0, -1.0, 1.0))
}

fn child_transform(index: usize) -> Transform {
    Transform::from_xyz(0.0, 0.0, NODE_Z_STEP * (index + 1) as f32)
}

fn child_visibility(geometry: &TessellatedMesh) -> Visibility {
    if geometry.is_empty() {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    }
}

impl RenderNodeTree for BevyNodeTree<'_, '_, '_> {
    fn has_root(&self) -> bool {
        self.nodes.root.is_some()
    }

    fn create_root(&mut self, size: Vec2) {
        if let Some(old_root) = self.nodes.root.take() {
            self.commands.entity(old_root).despawn();
        }
        self.nodes.children.clear();

        let mesh = self.meshes.add(mesh_from_tessellated(&background_quad(size)));
        let material = self
            .materials
            .add(ColorMaterial::from_color(BACKGROUND_COLOR));
        let root = self
            .commands
            .spawn((
                DrawingRoot,
                Mesh2d(mesh.clone()),
                MeshMaterial2d(material),
                root_transform(size),
                Visibility::Visible,
            ))
            .id();

        debug!("Created drawing root {:?} at {:?}", root, size);
        self.nodes.root = Some(root);
        self.nodes.root_mesh = Some(mesh);
    }

    fn resize_root(&mut self, size: Vec2) {
        let Some(root) = self.nodes.root else {
            return;
        };
        let quad = mesh_from_tessellated(&background_quad(size));
        let existing = self
            .nodes
            .root_mesh
            .as_ref()
            .and_then(|handle| self.meshes.get_mut(handle));
        match existing {
            Some(mesh) => *mesh = quad,
            None => {
                warn!("Background mesh missing, replacing it");
                let handle = self.meshes.add(quad);
                self.commands.entity(root).insert(Mesh2d(handle.clone()));
                self.nodes.root_mesh = Some(handle);
            }
        }
        self.commands.entity(root).insert(root_transform(size));
    }

    fn child_count(&self) -> usize {
        self.nodes.children.len()
    }

    fn append_child(&mut self, geometry: TessellatedMesh, color: Srgba) {
        let Some(root) = self.nodes.root else {
            warn!("Appending a draw event node without a drawing root");
            return;
        };
        let index = self.nodes.children.len();
        let mesh = self.meshes.add(mesh_from_tessellated(&geometry));
        let material = self.materials.add(ColorMaterial::from_color(color));
        let entity = self
            .commands
            .spawn((
                DrawEventNode,
                Mesh2d(mesh.clone()),
                MeshMaterial2d(material.clone()),
                child_transform(index),
                child_visibility(&geometry),
            ))
            .id();
        self.commands.entity(root).add_child(entity);
        self.nodes.children.push(ChildNode {
            entity,
            mesh,
            material,
        });
    }

    fn remove_child_at(&mut self, index: usize) {
        if index >= self.nodes.children.len() {
            return;
        }
        let child = self.nodes.children.remove(index);
        self.commands.entity(child.entity).despawn();
        self.meshes.remove(&child.mesh);
        self.materials.remove(&child.material);

        // Keep the stacking order contiguous
        for (i, later) in self.nodes.children.iter().enumerate().skip(index) {
            self.commands.entity(later.entity).insert(child_transform(i));
        }
    }

    fn update_child(&mut self, index: usize, geometry: TessellatedMesh, color: Srgba) {
        let Some(child) = self.nodes.children.get_mut(index) else {
            warn!("No draw event node at index {}", index);
            return;
        };
        let mut entity = self.commands.entity(child.entity);

        let mesh = mesh_from_tessellated(&geometry);
        match self.meshes.get_mut(&child.mesh) {
            Some(existing) => *existing = mesh,
            None => {
                warn!("Mesh for draw event node {} missing, replacing it", index);
                child.mesh = self.meshes.add(mesh);
                entity.insert(Mesh2d(child.mesh.clone()));
            }
        }
        match self.materials.get_mut(&child.material) {
            Some(material) => material.color = color.into(),
            None => {
                child.material = self.materials.add(ColorMaterial::from_color(color));
                entity.insert(MeshMaterial2d(child.material.clone()));
            }
        }
        entity.insert(child_visibility(&geometry));
    }
}

/// The render pass: runs when the drawing area asks for a redraw
pub fn sync_drawing_nodes(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut nodes: ResMut<DrawingNodes>,
    mut area: ResMut<DrawingArea>,
) {
    if !area.needs_redraw() {
        return;
    }

    let mut tree = BevyNodeTree {
        commands: &mut commands,
        meshes: &mut meshes,
        materials: &mut materials,
        nodes: &mut nodes,
    };
    match area.update_paint_node(&mut tree) {
        Ok(report) => debug!("Drawing synced: {:?}", report),
        Err(err) => {
            for (id, failure) in &err.failures {
                error!("Failed to render draw event {:?}: {}", id, failure);
            }
            debug!("Drawing synced with blank nodes: {:?}", err.report);
        }
    }
}

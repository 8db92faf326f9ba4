//! Scene sync
//!
//! Reconciles a retained tree of geometry nodes with the draw event list,
//! once per render pass. The tree has a background root and one child per
//! event, in event order. Each pass:
//!
//! 1. builds everything if the tree has no root yet,
//! 2. otherwise resizes the background in place when the surface changed,
//!    drops trailing children whose events are gone (undo), re-tessellates
//!    the last surviving child (the one a gesture may be editing) and appends
//!    a child for every new event.
//!
//! Which children survive is decided by event identity rather than count
//! alone, so an undo followed by a new gesture within one frame still
//! replaces the stale node.

use bevy::color::Srgba;
use bevy::log::debug;
use bevy::math::Vec2;

use crate::core::errors::{RenderError, SyncError};
use crate::editing::draw_event::{DrawEvent, EventId};
use crate::rendering::tessellation::{
    background_quad, tessellate_event, LyonTessellator, Tessellate,
    TessellatedMesh,
};

/// A retained render tree the sync can drive
pub trait RenderNodeTree {
    /// Whether the background root exists
    fn has_root(&self) -> bool;
    /// Create the background root spanning (0,0) to `size`
    fn create_root(&mut self, size: Vec2);
    /// Rewrite the four background vertices in place
    fn resize_root(&mut self, size: Vec2);
    fn child_count(&self) -> usize;
    fn append_child(&mut self, mesh: TessellatedMesh, color: Srgba);
    fn remove_child_at(&mut self, index: usize);
    fn update_child(&mut self, index: usize, mesh: TessellatedMesh, color: Srgba);
}

/// What a sync pass did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub created_root: bool,
    pub resized: bool,
    pub removed: usize,
    pub updated: usize,
    pub appended: usize,
    /// Nodes left blank because their event failed to tessellate
    pub failed: usize,
}

/// Sync state carried between render passes
pub struct SceneSync<T: Tessellate = LyonTessellator> {
    tessellator: T,
    /// Event behind each child node, in child order
    synced: Vec<EventId>,
    size: Option<Vec2>,
}

impl<T: Tessellate> SceneSync<T> {
    pub fn new(tessellator: T) -> Self {
        Self {
            tessellator,
            synced: Vec::new(),
            size: None,
        }
    }

    pub fn tessellator(&self) -> &T {
        &self.tessellator
    }

    /// Number of events the tree reflected after the last pass
    pub fn synced_count(&self) -> usize {
        self.synced.len()
    }

    /// Run one pass against `tree`
    ///
    /// The tree always ends the pass with one child per event. An event that
    /// fails to tessellate gets a blank node and the pass carries on; the
    /// failures come back together once the pass is done. A blank last node
    /// is rebuilt on the next pass like any other last node.
    pub fn sync<R: RenderNodeTree + ?Sized>(
        &mut self,
        tree: &mut R,
        events: &[DrawEvent],
        size: Vec2,
    ) -> Result<SyncReport, SyncError> {
        let mut report = SyncReport::default();
        let mut failures = Vec::new();

        if !tree.has_root() {
            tree.create_root(size);
            self.synced.clear();
            self.size = Some(size);
            report.created_root = true;
        } else if self.size != Some(size) {
            tree.resize_root(size);
            self.size = Some(size);
            report.resized = true;
        }

        // Children whose event is still at the same position survive
        let surviving = self
            .synced
            .iter()
            .zip(events)
            .take_while(|(id, event)| **id == event.id())
            .count();

        while self.synced.len() > surviving {
            let index = self.synced.len() - 1;
            tree.remove_child_at(index);
            self.synced.pop();
            report.removed += 1;
        }

        // The last surviving child may be under edit, always rewrite it
        if let Some(index) = surviving.checked_sub(1) {
            let event = &events[index];
            let mesh = self.build(event, &mut failures);
            tree.update_child(index, mesh, event.pen_color);
            report.updated += 1;
        }

        for event in &events[surviving..] {
            let mesh = self.build(event, &mut failures);
            tree.append_child(mesh, event.pen_color);
            self.synced.push(event.id());
            report.appended += 1;
        }

        report.failed = failures.len();
        debug_assert_eq!(tree.child_count(), events.len());
        debug!(
            "Scene sync: {} events, removed {}, updated {}, appended {}, failed {}",
            events.len(),
            report.removed,
            report.updated,
            report.appended,
            report.failed
        );

        if failures.is_empty() {
            Ok(report)
        } else {
            Err(SyncError { report, failures })
        }
    }

    /// Tessellate one event, a failure yields an empty mesh
    fn build(
        &mut self,
        event: &DrawEvent,
        failures: &mut Vec<(EventId, RenderError)>,
    ) -> TessellatedMesh {
        match tessellate_event(&mut self.tessellator, event) {
            Ok(mesh) => mesh,
            Err(err) => {
                failures.push((event.id(), err));
                TessellatedMesh::default()
            }
        }
    }
}

/// A geometry node with a flat color
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryNode {
    pub mesh: TessellatedMesh,
    pub color: Srgba,
}

/// In-memory render tree, for headless use and tests
#[derive(Debug, Clone, Default)]
pub struct SceneTree {
    pub background: Option<GeometryNode>,
    pub children: Vec<GeometryNode>,
}

impl RenderNodeTree for SceneTree {
    fn has_root(&self) -> bool {
        self.background.is_some()
    }

    fn create_root(&mut self, size: Vec2) {
        self.background = Some(GeometryNode {
            mesh: background_quad(size),
            color: crate::core::settings::BACKGROUND_COLOR,
        });
        self.children.clear();
    }

    fn resize_root(&mut self, size: Vec2) {
        if let Some(background) = self.background.as_mut() {
            let quad = background_quad(size);
            background.mesh.vertices.copy_from_slice(&quad.vertices);
        }
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn append_child(&mut self, mesh: TessellatedMesh, color: Srgba) {
        self.children.push(GeometryNode { mesh, color });
    }

    fn remove_child_at(&mut self, index: usize) {
        self.children.remove(index);
    }

    fn update_child(&mut self, index: usize, mesh: TessellatedMesh, color: Srgba) {
        if let Some(child) = self.children.get_mut(index) {
            child.mesh = mesh;
            child.color = color;
        }
    }
}

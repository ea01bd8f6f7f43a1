//! Minimal scene scaffolding for sync targets.
//!
//! Transforms here are *local* space: synced poses are written to the local
//! transform and compose with any parent chain, so a synced child of a moving
//! rig (or a VR anchor) stays attached.

use glam::{Mat4, Quat, Vec3};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Entity(u32);

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Flat entity store with optional parent links.
#[derive(Default)]
pub struct World {
    next_id: u32,
    ids: Vec<Entity>,
    transforms: Vec<Transform>,
    parents: Vec<Option<Entity>>,
}

impl World {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, t: Transform, parent: Option<Entity>) -> Entity {
        self.next_id += 1;
        let e = Entity(self.next_id);
        self.ids.push(e);
        self.transforms.push(t);
        self.parents.push(parent);
        e
    }

    fn index_of(&self, e: Entity) -> Option<usize> {
        self.ids.iter().position(|&id| id == e)
    }

    #[must_use]
    pub fn transform(&self, e: Entity) -> Option<&Transform> {
        self.index_of(e).map(|i| &self.transforms[i])
    }

    pub fn transform_mut(&mut self, e: Entity) -> Option<&mut Transform> {
        self.index_of(e).map(move |i| &mut self.transforms[i])
    }

    /// Compose the local transform with the parent chain.
    #[must_use]
    pub fn world_matrix(&self, e: Entity) -> Mat4 {
        let Some(i) = self.index_of(e) else {
            return Mat4::IDENTITY;
        };
        let local = self.transforms[i].matrix();
        match self.parents[i] {
            Some(p) => self.world_matrix(p) * local,
            None => local,
        }
    }
}

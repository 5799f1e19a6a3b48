//! Scene-side data model: instances and their per-frame state.
//!
//! These are the CPU-side inputs to culling and the frame executor. They
//! hold no GPU handles — the resource manager a real backend owns maps
//! `Instance`/`MeshKind` to actual vertex/index buffers.

use glam::{Mat4, Vec3, Vec4};

use crate::math::{Aabb, Sphere};

/// The small closed set of primitive meshes the reference scene draws.
/// Kept as a plain enum — a real asset pipeline would use a handle into a
/// mesh registry instead, but the spec deliberately limits this to a fixed
/// small set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Sphere,
    Box,
    Cone,
    Capsule,
    Cylinder,
}

/// Material parameters for one instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialParams {
    pub base_color: Vec4,
    pub metallic: f32,
    pub roughness: f32,
    pub ao: f32,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            base_color: Vec4::ONE,
            metallic: 0.08,
            roughness: 0.36,
            ao: 1.0,
        }
    }
}

/// A scene object: base transform, per-frame model matrix, mesh kind,
/// material parameters, and local-space bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub base_transform: Mat4,
    pub model_matrix: Mat4,
    pub mesh_kind: MeshKind,
    pub material: MaterialParams,
    pub local_aabb: Aabb,
}

impl Instance {
    #[must_use]
    pub fn new(mesh_kind: MeshKind, local_aabb: Aabb) -> Self {
        Self {
            base_transform: Mat4::IDENTITY,
            model_matrix: Mat4::IDENTITY,
            mesh_kind,
            material: MaterialParams::default(),
            local_aabb,
        }
    }

    /// World-space AABB for the current `model_matrix`.
    #[must_use]
    pub fn world_aabb(&self) -> Aabb {
        self.local_aabb.transformed(self.model_matrix)
    }

    /// World-space bounding sphere for the current `model_matrix`.
    #[must_use]
    pub fn world_bounding_sphere(&self) -> Sphere {
        self.world_aabb().bounding_sphere()
    }

    /// View-space depth of this instance's center, used to sort
    /// front-to-back for software occlusion (§4.4).
    #[must_use]
    pub fn view_space_depth(&self, view: Mat4) -> f32 {
        let world_center = self.world_aabb().center();
        view.transform_point3(world_center).z
    }

    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        self.model_matrix.transform_point3(Vec3::ZERO)
    }
}

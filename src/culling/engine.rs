//! Culling engine: frustum + software-occlusion instance culling, and
//! light prefiltering against a cull cell (§4.3/§4.4).

use glam::Mat4;

use crate::lighting::Light;
use crate::scene::Instance;

use super::cell::CullCell;
use super::classify::{classify_aabb_vs_cell, classify_sphere_vs_cell, cull_class_is_visible};
use super::occlusion::{OccluderProxy, ScreenRect, SoftwareOcclusionBuffer};

/// Per-instance verdict from [`cull_instances`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullVerdict {
    Visible,
    FrustumRejected,
    OcclusionRejected,
}

/// Result of culling one instance list against one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceCullResult {
    pub verdicts: Vec<CullVerdict>,
}

impl InstanceCullResult {
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.verdicts
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == CullVerdict::Visible)
            .map(|(i, _)| i)
            .collect()
    }
}

/// Frustum-culls `instances` against `cell`. `Intersecting` counts as
/// visible (§4.3 conservative policy).
#[must_use]
pub fn cull_instances_frustum_only(instances: &[Instance], cell: &CullCell) -> InstanceCullResult {
    let verdicts = instances
        .iter()
        .map(|instance| {
            let class = classify_aabb_vs_cell(&instance.world_aabb(), cell);
            if cull_class_is_visible(class, true) {
                CullVerdict::Visible
            } else {
                CullVerdict::FrustumRejected
            }
        })
        .collect();
    InstanceCullResult { verdicts }
}

/// Frustum + software occlusion culling (§4.4). Instances surviving the
/// frustum test are sorted front-to-back by `view` space depth, then each
/// is tested against a CPU depth buffer; survivors rasterize their own
/// `project_to_screen_rect` proxy into the buffer before the next instance
/// is tested, so later (farther) instances are tested against everything
/// nearer that has already been accepted this frame.
#[must_use]
pub fn cull_instances_with_occlusion(
    instances: &[Instance],
    cell: &CullCell,
    view: Mat4,
    buffer: &mut SoftwareOcclusionBuffer,
    project_to_screen_rect: impl Fn(&Instance, u32, u32) -> ScreenRect,
) -> InstanceCullResult {
    let mut verdicts = vec![CullVerdict::FrustumRejected; instances.len()];

    let mut order: Vec<usize> = instances
        .iter()
        .enumerate()
        .filter(|(_, instance)| {
            cull_class_is_visible(classify_aabb_vs_cell(&instance.world_aabb(), cell), true)
        })
        .map(|(i, _)| i)
        .collect();

    order.sort_by(|&a, &b| {
        instances[a]
            .view_space_depth(view)
            .total_cmp(&instances[b].view_space_depth(view))
    });

    for index in order {
        let instance = &instances[index];
        let rect = project_to_screen_rect(instance, buffer.width(), buffer.height());
        if buffer.test_rect_occlusion(rect) {
            verdicts[index] = CullVerdict::OcclusionRejected;
            continue;
        }
        verdicts[index] = CullVerdict::Visible;
        buffer.rasterize_software_occluders(&[OccluderProxy { rect }]);
    }

    InstanceCullResult { verdicts }
}

/// Prefilters `lights` against `cell` before binning — lights whose
/// bounding sphere doesn't overlap the cell at all never reach the binner.
#[must_use]
pub fn cull_lights(lights: &[Light], cell: &CullCell) -> Vec<bool> {
    lights
        .iter()
        .map(|light| cull_class_is_visible(classify_sphere_vs_cell(&light.bounding_sphere(), cell), true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culling::cell::CullCellKind;
    use crate::math::{Aabb, Plane};
    use crate::scene::MeshKind;
    use glam::Vec3;

    fn unit_cube_cell() -> CullCell {
        CullCell::new(
            [
                Plane { normal: Vec3::X, d: 1.0 },
                Plane { normal: -Vec3::X, d: 1.0 },
                Plane { normal: Vec3::Y, d: 1.0 },
                Plane { normal: -Vec3::Y, d: 1.0 },
                Plane { normal: Vec3::Z, d: 1.0 },
                Plane { normal: -Vec3::Z, d: 1.0 },
            ],
            CullCellKind::CameraFrustum,
        )
    }

    #[test]
    fn instance_outside_frustum_is_rejected() {
        let mut far = Instance::new(MeshKind::Box, Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
        far.model_matrix = Mat4::from_translation(Vec3::new(1000.0, 0.0, 0.0));
        let near = Instance::new(MeshKind::Box, Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));

        let result = cull_instances_frustum_only(&[near, far], &unit_cube_cell());
        assert_eq!(result.verdicts[0], CullVerdict::Visible);
        assert_eq!(result.verdicts[1], CullVerdict::FrustumRejected);
    }

    #[test]
    fn occlusion_rejects_an_instance_fully_behind_a_nearer_one() {
        let near = Instance::new(MeshKind::Box, Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
        let mut far = Instance::new(MeshKind::Box, Aabb::new(Vec3::splat(-0.5), Vec3::splat(0.5)));
        far.model_matrix = Mat4::from_translation(Vec3::new(0.0, 0.0, 5.0));

        let mut buffer = SoftwareOcclusionBuffer::new(16, 16);
        let view = Mat4::IDENTITY;
        let project = |instance: &Instance, w: u32, h: u32| {
            let depth = instance.view_space_depth(view);
            ScreenRect { min_x: 0, min_y: 0, max_x: w - 1, max_y: h - 1, min_depth: depth }
        };

        let result = cull_instances_with_occlusion(&[near, far], &unit_cube_cell(), view, &mut buffer, project);
        assert_eq!(result.verdicts[0], CullVerdict::Visible);
        assert_eq!(result.verdicts[1], CullVerdict::OcclusionRejected);
    }
}

//! Bounds-vs-cell classification.

use crate::math::{classify_aabb_vs_planes, classify_sphere_vs_planes, Aabb, Classification, Sphere};

use super::cell::CullCell;

/// Alias kept local to the culling engine so call sites read naturally
/// ("classify" rather than the more generic geometric term).
pub type CullClass = Classification;

#[must_use]
pub fn classify_aabb_vs_cell(aabb: &Aabb, cell: &CullCell) -> CullClass {
    classify_aabb_vs_planes(aabb, &cell.planes)
}

#[must_use]
pub fn classify_sphere_vs_cell(sphere: &Sphere, cell: &CullCell) -> CullClass {
    classify_sphere_vs_planes(sphere, &cell.planes)
}

/// Whether a classification result counts as visible. `conservative=true`
/// treats a straddling ("Intersecting") result as visible, matching the
/// engine-wide failure policy that ambiguity never hides something that
/// might actually be on screen. `conservative=false` is only used by
/// diagnostics that want to know what's *fully* inside a cell.
#[must_use]
pub fn cull_class_is_visible(class: CullClass, conservative: bool) -> bool {
    match class {
        CullClass::Inside => true,
        CullClass::Intersecting => conservative,
        CullClass::Outside => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::culling::cell::CullCellKind;
    use crate::math::Plane;
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
    fn zero_radius_sphere_at_cell_center_is_visible_scenario_6() {
        let cell = unit_cube_cell();
        let sphere = Sphere::new(Vec3::ZERO, 0.0);
        let class = classify_sphere_vs_cell(&sphere, &cell);
        assert_eq!(class, CullClass::Inside);
        assert!(cull_class_is_visible(class, true));
        assert!(cull_class_is_visible(class, false));
    }

    #[test]
    fn far_outside_sphere_is_never_visible() {
        let cell = unit_cube_cell();
        let sphere = Sphere::new(Vec3::new(100.0, 0.0, 0.0), 0.1);
        let class = classify_sphere_vs_cell(&sphere, &cell);
        assert_eq!(class, CullClass::Outside);
        assert!(!cull_class_is_visible(class, true));
    }
}

//! Light data model (§3).

use glam::Vec3;

use crate::math::Sphere;

/// The closed set of light shapes the binner understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Point { position: Vec3, radius: f32, intensity: f32 },
    Spot { position: Vec3, direction: Vec3, radius: f32, inner_cone: f32, outer_cone: f32, intensity: f32 },
    RectArea { position: Vec3, normal: Vec3, half_extents: Vec3, intensity: f32 },
    TubeArea { start: Vec3, end: Vec3, radius: f32, intensity: f32 },
}

impl Light {
    /// A conservative bounding sphere covering the light's full range of
    /// influence, used both for frustum prefiltering and for per-tile/
    /// per-cluster overlap tests. Area lights (rect/tube) don't have a
    /// physical "radius" the way point/spot do, so their sphere is derived
    /// from their extent plus the same falloff radius point lights use —
    /// conservative, not exact.
    #[must_use]
    pub fn bounding_sphere(&self) -> Sphere {
        match *self {
            Light::Point { position, radius, .. } => Sphere::new(position, radius),
            Light::Spot { position, radius, .. } => Sphere::new(position, radius),
            Light::RectArea { position, half_extents, .. } => {
                Sphere::new(position, half_extents.length())
            }
            Light::TubeArea { start, end, radius, .. } => {
                let center = (start + end) * 0.5;
                let half_len = (end - start).length() * 0.5;
                Sphere::new(center, half_len + radius)
            }
        }
    }

    #[must_use]
    pub fn intensity(&self) -> f32 {
        match *self {
            Light::Point { intensity, .. }
            | Light::Spot { intensity, .. }
            | Light::RectArea { intensity, .. }
            | Light::TubeArea { intensity, .. } => intensity,
        }
    }
}

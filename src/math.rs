//! Shared geometry primitives
//!
//! Bounding volumes and plane equations used by the culling engine and the
//! resource/barrier planners' tile-grid math.

use glam::{Mat4, Vec3, Vec4};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Transforms the AABB by `m`, producing a new conservative (world-space) AABB.
    #[must_use]
    pub fn transformed(&self, m: Mat4) -> Self {
        let center = self.center();
        let extents = self.half_extents();
        let world_center = m.transform_point3(center);
        // Conservative extent transform: sum |row_i| * extents.
        let abs_x = m.x_axis.truncate().abs() * extents.x;
        let abs_y = m.y_axis.truncate().abs() * extents.y;
        let abs_z = m.z_axis.truncate().abs() * extents.z;
        let world_extents = abs_x + abs_y + abs_z;
        Self {
            min: world_center - world_extents,
            max: world_center + world_extents,
        }
    }

    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    #[must_use]
    pub fn bounding_sphere(&self) -> Sphere {
        let center = self.center();
        let radius = self.half_extents().length();
        Sphere { center, radius }
    }
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    #[must_use]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        let closest = self.center.clamp(aabb.min, aabb.max);
        let d = closest - self.center;
        d.length_squared() <= self.radius * self.radius
    }

    #[must_use]
    pub fn intersects_sphere(&self, other: &Sphere) -> bool {
        let r = self.radius + other.radius;
        (self.center - other.center).length_squared() <= r * r
    }
}

/// A plane in Hesse normal form: `dot(normal, p) + d == 0` for points `p` on
/// the plane. The sign convention is "positive distance is inside".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Plane {
    #[must_use]
    pub fn from_vec4(v: Vec4) -> Self {
        let normal = Vec3::new(v.x, v.y, v.z);
        let len = normal.length();
        if len > f32::EPSILON {
            Self {
                normal: normal / len,
                d: v.w / len,
            }
        } else {
            Self {
                normal: Vec3::Z,
                d: v.w,
            }
        }
    }

    /// Signed distance from `point` to the plane. Positive is on the inside
    /// half-space.
    #[must_use]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// The most-positive extent of an AABB along this plane's normal, used
    /// for the standard "positive vertex" frustum test.
    #[must_use]
    fn positive_vertex(&self, aabb: &Aabb) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if self.normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if self.normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }

    #[must_use]
    fn negative_vertex(&self, aabb: &Aabb) -> Vec3 {
        Vec3::new(
            if self.normal.x >= 0.0 { aabb.min.x } else { aabb.max.x },
            if self.normal.y >= 0.0 { aabb.min.y } else { aabb.max.y },
            if self.normal.z >= 0.0 { aabb.min.z } else { aabb.max.z },
        )
    }
}

/// Classification result of bounds against a convex region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Inside,
    Outside,
    Intersecting,
}

/// Classifies an AABB against a set of inward-facing planes (the standard
/// plane-array frustum test: outside if the box is fully behind any plane,
/// intersecting if it straddles one, otherwise inside).
#[must_use]
pub fn classify_aabb_vs_planes(aabb: &Aabb, planes: &[Plane]) -> Classification {
    let mut intersecting = false;
    for plane in planes {
        let pos = plane.positive_vertex(aabb);
        if plane.distance(pos) < 0.0 {
            return Classification::Outside;
        }
        let neg = plane.negative_vertex(aabb);
        if plane.distance(neg) < 0.0 {
            intersecting = true;
        }
    }
    if intersecting {
        Classification::Intersecting
    } else {
        Classification::Inside
    }
}

/// Classifies a sphere against a set of inward-facing planes.
#[must_use]
pub fn classify_sphere_vs_planes(sphere: &Sphere, planes: &[Plane]) -> Classification {
    let mut intersecting = false;
    for plane in planes {
        let d = plane.distance(sphere.center);
        if d < -sphere.radius {
            return Classification::Outside;
        }
        if d < sphere.radius {
            intersecting = true;
        }
    }
    if intersecting {
        Classification::Intersecting
    } else {
        Classification::Inside
    }
}

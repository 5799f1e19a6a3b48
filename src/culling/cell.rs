//! Cull cells: the convex regions instances and lights are tested against.

use crate::math::Plane;

/// What a [`CullCell`]'s six planes represent. The planes themselves are
/// always inward-facing half-spaces regardless of kind; this tag only
/// changes how a caller interprets a rejection (e.g. a rejected shadow
/// caster is dropped from that cascade's draw list, not from the scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullCellKind {
    CameraFrustum,
    CascadeFrustum { cascade_index: u32 },
    SpotShadowFrustum,
    PointShadowFaceFrustum { face_index: u32 },
    ClusterCell,
}

/// A convex cull region: six inward-facing planes plus a kind tag. Built
/// once per frame (camera frustum, per-cascade frustum, per-face shadow
/// frustum) or once per cluster (light binning), then reused across every
/// instance/light test against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullCell {
    pub planes: [Plane; 6],
    pub kind: CullCellKind,
}

impl CullCell {
    #[must_use]
    pub fn new(planes: [Plane; 6], kind: CullCellKind) -> Self {
        Self { planes, kind }
    }
}

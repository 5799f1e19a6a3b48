//! Standard pass identifiers.

use std::fmt;

/// Closed enumeration of standard render/compute passes, plus an `Unknown`
/// sentinel for forward-compatibility with externally registered passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PassId {
    ShadowMap,
    DepthPrepass,
    LightCulling,
    ClusterLightAssign,
    GBuffer,
    Ssao,
    DeferredLighting,
    DeferredLightingTiled,
    PbrForward,
    PbrForwardPlus,
    PbrForwardClustered,
    Tonemap,
    Taa,
    MotionBlur,
    DepthOfField,
    Unknown,
}

impl PassId {
    /// Stable string id, used for telemetry, JSONL output, and external
    /// registry lookups.
    #[must_use]
    pub const fn stable_id(self) -> &'static str {
        match self {
            PassId::ShadowMap => "shadow_map",
            PassId::DepthPrepass => "depth_prepass",
            PassId::LightCulling => "light_culling",
            PassId::ClusterLightAssign => "cluster_light_assign",
            PassId::GBuffer => "gbuffer",
            PassId::Ssao => "ssao",
            PassId::DeferredLighting => "deferred_lighting",
            PassId::DeferredLightingTiled => "deferred_lighting_tiled",
            PassId::PbrForward => "pbr_forward",
            PassId::PbrForwardPlus => "pbr_forward_plus",
            PassId::PbrForwardClustered => "pbr_forward_clustered",
            PassId::Tonemap => "tonemap",
            PassId::Taa => "taa",
            PassId::MotionBlur => "motion_blur",
            PassId::DepthOfField => "depth_of_field",
            PassId::Unknown => "unknown",
        }
    }

    /// All standard (non-`Unknown`) pass ids, in declaration order.
    #[must_use]
    pub const fn all() -> [PassId; 15] {
        [
            PassId::ShadowMap,
            PassId::DepthPrepass,
            PassId::LightCulling,
            PassId::ClusterLightAssign,
            PassId::GBuffer,
            PassId::Ssao,
            PassId::DeferredLighting,
            PassId::DeferredLightingTiled,
            PassId::PbrForward,
            PassId::PbrForwardPlus,
            PassId::PbrForwardClustered,
            PassId::Tonemap,
            PassId::Taa,
            PassId::MotionBlur,
            PassId::DepthOfField,
        ]
    }

    /// True for compute-dispatch passes (as opposed to rasterization passes).
    #[must_use]
    pub const fn is_compute(self) -> bool {
        matches!(self, PassId::LightCulling | PassId::ClusterLightAssign)
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.stable_id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_ids_are_unique() {
        let ids = PassId::all();
        for (i, a) in ids.iter().enumerate() {
            for b in &ids[i + 1..] {
                assert_ne!(a.stable_id(), b.stable_id());
            }
        }
    }
}

//! Pass Contract Registry (L1)
//!
//! A [`PassContract`] describes, for a given [`PassId`] on a given backend,
//! the set of input/output semantics it touches, whether it is a
//! rasterization pass or a compute dispatch, and any tile/cluster
//! dependency it declares. The registry (below) is the static table the
//! compiler consults; it is built once and is immutable thereafter (§5
//! "The pass contract registry is immutable after initialization").

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::backend::BackendKind;

use super::pass_id::PassId;
use super::semantic::PassSemantic;

/// Whether a pass records into a render pass (rasterization) or issues a
/// compute dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Raster,
    Compute,
}

/// Declares whether a pass's work is organized by screen tile, 3D cluster,
/// or neither. Consumed by the light binner and the frame executor to size
/// dispatch groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileDependency {
    None,
    Tiled,
    Clustered,
}

/// The inputs/outputs/stage/eligibility contract for one pass on one
/// backend.
#[derive(Debug, Clone)]
pub struct PassContract {
    pub pass_id: PassId,
    pub inputs: SmallVec<[PassSemantic; 6]>,
    pub outputs: SmallVec<[PassSemantic; 4]>,
    pub kind: PassKind,
    pub tile_dependency: TileDependency,
    eligible_backends: SmallVec<[BackendKind; 2]>,
}

impl PassContract {
    #[must_use]
    pub fn new(
        pass_id: PassId,
        inputs: &[PassSemantic],
        outputs: &[PassSemantic],
        kind: PassKind,
        tile_dependency: TileDependency,
        eligible_backends: &[BackendKind],
    ) -> Self {
        Self {
            pass_id,
            inputs: SmallVec::from_slice(inputs),
            outputs: SmallVec::from_slice(outputs),
            kind,
            tile_dependency,
            eligible_backends: SmallVec::from_slice(eligible_backends),
        }
    }

    #[must_use]
    pub fn eligible_on(&self, backend: BackendKind) -> bool {
        self.eligible_backends.contains(&backend)
    }
}

/// Static table of `PassId -> PassContract`, built per backend at startup.
#[derive(Debug, Clone, Default)]
pub struct PassContractRegistry {
    contracts: FxHashMap<PassId, PassContract>,
}

impl PassContractRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            contracts: FxHashMap::default(),
        }
    }

    /// Registers a contract, overwriting any previous entry for the same
    /// `PassId`. Used both by the built-in registry builder and by external
    /// users registering additional passes (§6).
    pub fn register(&mut self, contract: PassContract) {
        self.contracts.insert(contract.pass_id, contract);
    }

    #[must_use]
    pub fn get(&self, pass_id: PassId) -> Option<&PassContract> {
        self.contracts.get(&pass_id)
    }

    #[must_use]
    pub fn contains(&self, pass_id: PassId) -> bool {
        self.contracts.contains_key(&pass_id)
    }
}

/// Builds the built-in registry. Populates contracts for every standard
/// [`PassId`] following the data-flow table in §3/§4: shadow maps feed
/// shadow-sampling passes, the depth prepass feeds SSAO and
/// tiled/clustered light assignment, GBuffer feeds deferred lighting, and
/// the post stack chains `ColorHdr -> Tonemap -> ColorLdr -> (TAA |
/// MotionBlur | DepthOfField)`. Per-backend eligibility is carried on each
/// [`PassContract`] rather than by building a distinct table per backend,
/// since the set of passes is shared and only eligibility differs.
#[must_use]
pub fn build_registry() -> PassContractRegistry {
    use PassSemantic::{
        Albedo, AmbientOcclusion, ColorHdr, ColorLdr, Depth, HistoryColor, HistoryDepth,
        HistoryMotion, LightClusters, LightGrid, LightIndexList, Material, MotionVectors, Normal,
        ShadowMap,
    };

    let all_backends = [BackendKind::Vulkan, BackendKind::Software];
    let gpu_only = [BackendKind::Vulkan];

    let mut reg = PassContractRegistry::new();

    reg.register(PassContract::new(
        PassId::ShadowMap,
        &[],
        &[ShadowMap],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::DepthPrepass,
        &[],
        &[Depth],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::LightCulling,
        &[Depth],
        &[LightGrid, LightIndexList],
        PassKind::Compute,
        TileDependency::Tiled,
        &gpu_only,
    ));

    reg.register(PassContract::new(
        PassId::ClusterLightAssign,
        &[Depth],
        &[LightClusters, LightIndexList],
        PassKind::Compute,
        TileDependency::Clustered,
        &gpu_only,
    ));

    reg.register(PassContract::new(
        PassId::GBuffer,
        &[],
        &[Depth, Albedo, Normal, Material],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::Ssao,
        &[Depth, Normal],
        &[AmbientOcclusion],
        PassKind::Compute,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::DeferredLighting,
        &[Depth, Albedo, Normal, Material, ShadowMap],
        &[ColorHdr],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::DeferredLightingTiled,
        &[Depth, Albedo, Normal, Material, ShadowMap, LightGrid, LightIndexList],
        &[ColorHdr],
        PassKind::Raster,
        TileDependency::Tiled,
        &gpu_only,
    ));

    reg.register(PassContract::new(
        PassId::PbrForward,
        &[ShadowMap],
        &[Depth, ColorHdr],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::PbrForwardPlus,
        &[ShadowMap, LightGrid, LightIndexList],
        &[Depth, ColorHdr],
        PassKind::Raster,
        TileDependency::Tiled,
        &gpu_only,
    ));

    reg.register(PassContract::new(
        PassId::PbrForwardClustered,
        &[ShadowMap, LightClusters, LightIndexList],
        &[Depth, ColorHdr],
        PassKind::Raster,
        TileDependency::Clustered,
        &gpu_only,
    ));

    reg.register(PassContract::new(
        PassId::Tonemap,
        &[ColorHdr],
        &[ColorLdr],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::Taa,
        &[ColorLdr, MotionVectors, HistoryColor],
        &[ColorLdr],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::MotionBlur,
        &[ColorLdr, MotionVectors],
        &[ColorLdr],
        PassKind::Raster,
        TileDependency::None,
        &all_backends,
    ));

    reg.register(PassContract::new(
        PassId::DepthOfField,
        &[ColorLdr, Depth],
        &[ColorLdr],
        PassKind::Raster,
        TileDependency::None,
        &gpu_only,
    ));

    let _ = HistoryDepth;
    let _ = HistoryMotion;
    reg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_of_field_is_gpu_only() {
        let reg = build_registry();
        let c = reg.get(PassId::DepthOfField).unwrap();
        assert!(c.eligible_on(BackendKind::Vulkan));
        assert!(!c.eligible_on(BackendKind::Software));
    }

    #[test]
    fn shadow_map_is_eligible_everywhere() {
        let reg = build_registry();
        let c = reg.get(PassId::ShadowMap).unwrap();
        assert!(c.eligible_on(BackendKind::Software));
        assert!(c.eligible_on(BackendKind::Vulkan));
    }
}

//! Render path recipes and the composition presets that resolve to them.

use super::pass_id::PassId;
use crate::backend::BackendKind;

/// PBR vs. Blinn-Phong, following `LightingTechnique` in the reference
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TechniqueMode {
    Pbr,
    BlinnPhong,
}

/// How the light binner assigns lights to tiles/clusters for a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightCullingMode {
    None,
    Tiled,
    TiledDepthRange,
    Clustered,
}

/// View and shadow culling mode for a recipe. Both are frustum-based; the
/// distinction only affects which [`crate::culling::cell::CullCell`] kinds
/// are exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CullingModes {
    pub view: ViewCullingMode,
    pub shadow: ShadowCullingMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCullingMode {
    FrustumOnly,
    FrustumAndSoftwareOcclusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowCullingMode {
    FrustumOnly,
    FrustumAndSoftwareOcclusion,
}

/// Runtime defaults carried by a recipe; the executor reads these once at
/// plan-build time but they may be toggled at runtime per §4.1 ("Optional
/// post passes ... remain in the plan and are runtime-gated by the
/// executor").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeDefaults {
    pub shadows_enabled: bool,
    pub occlusion_enabled: bool,
    pub debug_flags: u32,
}

impl Default for RuntimeDefaults {
    fn default() -> Self {
        Self {
            shadows_enabled: true,
            occlusion_enabled: true,
            debug_flags: 0,
        }
    }
}

/// One entry in a recipe's pass chain: a pass id plus whether it is
/// mandatory for the plan to be considered valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassChainEntry {
    pub pass_id: PassId,
    pub required: bool,
}

impl PassChainEntry {
    #[must_use]
    pub const fn required(pass_id: PassId) -> Self {
        Self { pass_id, required: true }
    }

    #[must_use]
    pub const fn optional(pass_id: PassId) -> Self {
        Self { pass_id, required: false }
    }
}

/// Named, immutable specification consumed by the compiler. Recipes are
/// created once (by user choice, or a composition preset) and live until
/// replaced wholesale — the compiler never mutates one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPathRecipe {
    pub name: String,
    pub backend: BackendKind,
    pub technique_mode: TechniqueMode,
    pub path_preset: PathPreset,
    pub pass_chain: Vec<PassChainEntry>,
    pub light_culling_mode: LightCullingMode,
    pub culling_modes: CullingModesEq,
    pub runtime_defaults: RuntimeDefaultsEq,
}

// `CullingModes`/`RuntimeDefaults` hold only Copy/Eq-friendly scalars, but we
// need `Eq` (not just `PartialEq`) on the recipe for the round-trip test in
// §8 ("applying the same recipe twice yields identical plans"); f32 fields
// would block that, so the defaults struct here is deliberately integer/bool
// only. Aliased for clarity at the call site.
pub type CullingModesEq = CullingModes;
pub type RuntimeDefaultsEq = RuntimeDefaults;

impl Eq for CullingModes {}
impl Eq for RuntimeDefaults {}

impl RenderPathRecipe {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        backend: BackendKind,
        technique_mode: TechniqueMode,
        path_preset: PathPreset,
    ) -> Self {
        Self {
            name: name.into(),
            backend,
            technique_mode,
            path_preset,
            pass_chain: Vec::new(),
            light_culling_mode: LightCullingMode::None,
            culling_modes: CullingModes {
                view: ViewCullingMode::FrustumOnly,
                shadow: ShadowCullingMode::FrustumOnly,
            },
            runtime_defaults: RuntimeDefaults::default(),
        }
    }

    #[must_use]
    pub fn with_chain(mut self, chain: Vec<PassChainEntry>) -> Self {
        self.pass_chain = chain;
        self
    }

    #[must_use]
    pub fn with_light_culling_mode(mut self, mode: LightCullingMode) -> Self {
        self.light_culling_mode = mode;
        self
    }

    #[must_use]
    pub fn with_culling_modes(mut self, modes: CullingModes) -> Self {
        self.culling_modes = modes;
        self
    }

    #[must_use]
    pub fn with_runtime_defaults(mut self, defaults: RuntimeDefaults) -> Self {
        self.runtime_defaults = defaults;
        self
    }
}

/// Post-process stack preset named in a composition recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStackPreset {
    Default,
    Minimal,
    Temporal,
    Full,
}

/// Path preset: the base forward/deferred pipeline shape, independent of
/// technique and post stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPreset {
    ForwardSimple,
    ForwardPlusTiled,
    ForwardClustered,
    DeferredTiled,
}

impl PathPreset {
    /// Whether this path preset's technique profile supports a given pass,
    /// independent of backend eligibility. Mirrors the reference
    /// implementation's `profile_has_pass` check: the plain forward path has
    /// no dedicated depth-of-field circle-of-confusion source, so requesting
    /// DoF on it is accepted by the composition layer but rejected here —
    /// the compiler then marks the pass non-present rather than erroring,
    /// since it is optional (scenario: "DepthOfField requested but path is
    /// Forward").
    #[must_use]
    pub const fn supports_pass(self, pass_id: PassId) -> bool {
        !matches!((self, pass_id), (PathPreset::ForwardSimple, PassId::DepthOfField))
    }
}

/// Three-tuple: path preset + technique preset + post-process stack
/// preset. Resolves to a concrete [`RenderPathRecipe`] plus technique
/// parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCompositionRecipe {
    pub path: PathPreset,
    pub technique: TechniqueMode,
    pub post_stack: PostStackPreset,
}

/// Technique parameters resolved alongside a composition's path recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechniqueParams {
    pub exposure: f32,
    pub gamma: f32,
    pub shader_variant: ShaderVariant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderVariant {
    Pbr,
    BlinnPhong,
}

impl RenderCompositionRecipe {
    /// Resolves this composition to a `RenderPathRecipe` + technique
    /// parameters, for the given backend.
    #[must_use]
    pub fn resolve(&self, backend: BackendKind) -> (RenderPathRecipe, TechniqueParams) {
        let mut chain = match self.path {
            PathPreset::ForwardSimple => vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::PbrForward),
            ],
            PathPreset::ForwardPlusTiled => vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::DepthPrepass),
                PassChainEntry::required(PassId::LightCulling),
                PassChainEntry::required(PassId::PbrForwardPlus),
            ],
            PathPreset::ForwardClustered => vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::DepthPrepass),
                PassChainEntry::required(PassId::ClusterLightAssign),
                PassChainEntry::required(PassId::PbrForwardClustered),
            ],
            PathPreset::DeferredTiled => vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::GBuffer),
                PassChainEntry::required(PassId::Ssao),
                PassChainEntry::required(PassId::DepthPrepass),
                PassChainEntry::required(PassId::LightCulling),
                PassChainEntry::required(PassId::DeferredLightingTiled),
            ],
        };

        chain.push(PassChainEntry::required(PassId::Tonemap));

        let (taa, motion_blur, dof) = match self.post_stack {
            PostStackPreset::Minimal => (false, false, false),
            PostStackPreset::Default => (false, false, false),
            PostStackPreset::Temporal => (true, false, false),
            PostStackPreset::Full => (true, true, true),
        };
        if taa {
            chain.push(PassChainEntry::optional(PassId::Taa));
        }
        if motion_blur {
            chain.push(PassChainEntry::optional(PassId::MotionBlur));
        }
        if dof {
            chain.push(PassChainEntry::optional(PassId::DepthOfField));
        }

        let light_culling_mode = match self.path {
            PathPreset::ForwardSimple => LightCullingMode::None,
            PathPreset::ForwardPlusTiled | PathPreset::DeferredTiled => LightCullingMode::Tiled,
            PathPreset::ForwardClustered => LightCullingMode::Clustered,
        };

        let name = format!(
            "composition_{:?}_{:?}_{:?}",
            self.path, self.technique, self.post_stack
        )
        .to_lowercase();

        let recipe = RenderPathRecipe::new(name, backend, self.technique, self.path)
            .with_chain(chain)
            .with_light_culling_mode(light_culling_mode)
            .with_culling_modes(CullingModes {
                view: ViewCullingMode::FrustumAndSoftwareOcclusion,
                shadow: ShadowCullingMode::FrustumAndSoftwareOcclusion,
            });

        let params = TechniqueParams {
            exposure: 1.0,
            gamma: 2.2,
            shader_variant: match self.technique {
                TechniqueMode::Pbr => ShaderVariant::Pbr,
                TechniqueMode::BlinnPhong => ShaderVariant::BlinnPhong,
            },
        };

        (recipe, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composition_deferred_pbr_default_matches_scenario_1() {
        let composition = RenderCompositionRecipe {
            path: PathPreset::DeferredTiled,
            technique: TechniqueMode::Pbr,
            post_stack: PostStackPreset::Default,
        };
        let (recipe, _params) = composition.resolve(BackendKind::Vulkan);
        let ids: Vec<PassId> = recipe.pass_chain.iter().map(|e| e.pass_id).collect();
        assert!(ids.contains(&PassId::ShadowMap));
        assert!(ids.contains(&PassId::GBuffer));
        assert!(ids.contains(&PassId::Ssao));
        assert!(ids.contains(&PassId::DeferredLightingTiled));
        assert!(ids.contains(&PassId::Tonemap));
    }

    #[test]
    fn dof_requested_but_path_is_forward_scenario_4() {
        // A "Full" post stack on a plain forward path still declares DoF in
        // the recipe; the compiler later marks it non-present if the
        // backend doesn't support it (tested in compiler.rs).
        let composition = RenderCompositionRecipe {
            path: PathPreset::ForwardSimple,
            technique: TechniqueMode::Pbr,
            post_stack: PostStackPreset::Full,
        };
        let (recipe, _params) = composition.resolve(BackendKind::Vulkan);
        let ids: Vec<PassId> = recipe.pass_chain.iter().map(|e| e.pass_id).collect();
        assert!(ids.contains(&PassId::DepthOfField));
        assert!(ids.contains(&PassId::Taa));
    }
}

//! Resource Planner (L2)
//!
//! Derives the transient GPU resources implied by a compiled
//! [`ExecutionPlan`](super::compiler::ExecutionPlan) and binds each pass's
//! inputs/outputs to the resource that produces or consumes them.

use rustc_hash::FxHashMap;

use crate::errors::{EngineError, Result};

use super::compiler::ExecutionPlan;
use super::contract::PassContractRegistry;
use super::pass_id::PassId;
use super::recipe::RenderPathRecipe;
use super::semantic::PassSemantic;

/// Format family a resource is allocated in. Concrete GPU formats are
/// picked by the backend (`Backend::pick_format`) from this class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatClass {
    Depth,
    ColorHdr,
    ColorLdr,
    Mono,
}

/// How a resource's extent is derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExtentPolicy {
    /// Matches the swapchain extent exactly.
    FullFrame,
    /// A fixed multiplier of the swapchain extent (e.g. half-res SSAO).
    Scaled(f32),
    /// A fixed size independent of the swapchain (e.g. shadow maps).
    Fixed(u32, u32),
    /// Sized from the light grid's tile count (tile_size derived, see
    /// [`crate::lighting::grid::LightGridLayout`]).
    TileGrid,
}

/// One declared transient resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDesc {
    pub semantic: PassSemantic,
    pub format_class: FormatClass,
    pub extent_policy: ExtentPolicy,
    pub layers: u32,
    pub tile_size: Option<u32>,
    /// Index of the compiled pass (by position in the chain) that produces
    /// this resource.
    pub producer_index: usize,
}

/// Coarser grouping than [`FormatClass`] used only for alias-class
/// compatibility: `ColorHdr` and `ColorLdr` are distinct concrete formats
/// (the backend picks differing bit depths for each) but belong to the same
/// allocation family, since a tonemap pass fully drains its HDR input before
/// the LDR output it produces is ever written — the two can share one
/// physical color target (§8 scenario 1: "alias_classes group ColorHDR and
/// ColorLDR with slots=1").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AllocationFamily {
    Depth,
    Color,
    Mono,
}

impl FormatClass {
    fn allocation_family(self) -> AllocationFamily {
        match self {
            FormatClass::Depth => AllocationFamily::Depth,
            FormatClass::ColorHdr | FormatClass::ColorLdr => AllocationFamily::Color,
            FormatClass::Mono => AllocationFamily::Mono,
        }
    }
}

impl ResourceDesc {
    /// Whether two resources could physically share storage: same
    /// allocation family (see [`AllocationFamily`]), extent policy, and
    /// layer count. Extent policy compares by discriminant + scale/fixed
    /// values; `TileGrid` entries always compare equal to other `TileGrid`
    /// entries of the same tile size.
    #[must_use]
    pub fn allocation_compatible(&self, other: &Self) -> bool {
        if self.format_class.allocation_family() != other.format_class.allocation_family() || self.layers != other.layers {
            return false;
        }
        match (self.extent_policy, other.extent_policy) {
            (ExtentPolicy::FullFrame, ExtentPolicy::FullFrame) => true,
            (ExtentPolicy::Scaled(a), ExtentPolicy::Scaled(b)) => (a - b).abs() < f32::EPSILON,
            (ExtentPolicy::Fixed(aw, ah), ExtentPolicy::Fixed(bw, bh)) => aw == bw && ah == bh,
            (ExtentPolicy::TileGrid, ExtentPolicy::TileGrid) => self.tile_size == other.tile_size,
            _ => false,
        }
    }
}

/// Binds one compiled pass's consumed semantics to the resource index that
/// produces each.
#[derive(Debug, Clone, PartialEq)]
pub struct PassBinding {
    pub pass_index: usize,
    pub pass_id: PassId,
    /// `(semantic, resource_index)` pairs for every input this pass reads.
    pub reads: Vec<(PassSemantic, usize)>,
    /// Resource indices this pass writes (its declared outputs).
    pub writes: Vec<usize>,
}

/// Output of the resource planner.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResourcePlan {
    pub resources: Vec<ResourceDesc>,
    pub pass_bindings: Vec<PassBinding>,
}

/// Derives a [`ResourcePlan`] from a compiled, valid [`ExecutionPlan`].
///
/// Each output semantic of a compiled pass materializes as exactly one
/// resource. Consumer bindings reference the most recent (highest-index)
/// producer of their input semantic among passes preceding them in the
/// chain — the same producer the compiler already validated exists.
pub fn plan_resources(
    plan: &ExecutionPlan,
    recipe: &RenderPathRecipe,
    registry: &PassContractRegistry,
) -> Result<ResourcePlan> {
    let tile_size = recipe_tile_size(recipe);

    let mut resources: Vec<ResourceDesc> = Vec::new();
    // Most recent producer resource index for each semantic, as we walk the
    // chain in order.
    let mut latest_producer: FxHashMap<PassSemantic, usize> = FxHashMap::default();
    let mut bindings: Vec<PassBinding> = Vec::with_capacity(plan.compiled_passes.len());

    for (pass_index, compiled) in plan.compiled_passes.iter().enumerate() {
        let contract = registry
            .get(compiled.pass_id)
            .expect("compiled pass must have a registered contract");

        let mut reads = Vec::with_capacity(contract.inputs.len());
        for &input in &contract.inputs {
            let Some(&resource_index) = latest_producer.get(&input) else {
                return Err(EngineError::MissingProducer(compiled.pass_id, input));
            };
            reads.push((input, resource_index));
        }

        let mut writes = Vec::with_capacity(contract.outputs.len());
        for &output in &contract.outputs {
            let (format_class, extent_policy, layers) = resource_shape(output, tile_size);
            let resource_index = resources.len();
            let candidate = ResourceDesc {
                semantic: output,
                format_class,
                extent_policy,
                layers,
                tile_size: matches!(extent_policy, ExtentPolicy::TileGrid).then_some(tile_size),
                producer_index: pass_index,
            };

            // Two producers of the same semantic must agree on its
            // allocation descriptor — e.g. a future per-pass tile_size
            // override that left one LightGrid producer at a different
            // tile_size than an earlier one would hit this. The current
            // built-in registry never triggers it since `resource_shape`
            // is a pure function of `(semantic, tile_size)` and `tile_size`
            // is fixed per plan, but the check is load-bearing the moment
            // either of those stops being true.
            if let Some(&prev_index) = latest_producer.get(&output) {
                if !resources[prev_index].allocation_compatible(&candidate) {
                    return Err(EngineError::AliasingConflict(prev_index, resource_index));
                }
            }

            resources.push(candidate);
            latest_producer.insert(output, resource_index);
            writes.push(resource_index);
        }

        bindings.push(PassBinding {
            pass_index,
            pass_id: compiled.pass_id,
            reads,
            writes,
        });
    }

    Ok(ResourcePlan {
        resources,
        pass_bindings: bindings,
    })
}

/// `LightGrid`'s tile size defaults to the recipe's configured size, clamped
/// to >= 1 (§4.2). Recipes in this crate don't carry a per-recipe override
/// yet, so this resolves to the engine-wide default.
fn recipe_tile_size(_recipe: &RenderPathRecipe) -> u32 {
    crate::lighting::grid::DEFAULT_TILE_SIZE.max(1)
}

/// Maps a semantic to its resource shape. Shadow maps and light-grid/index
/// resources get fixed or tile-grid extents; everything else is full-frame.
fn resource_shape(semantic: PassSemantic, tile_size: u32) -> (FormatClass, ExtentPolicy, u32) {
    match semantic {
        PassSemantic::ShadowMap => (FormatClass::Depth, ExtentPolicy::Fixed(2048, 2048), 1),
        PassSemantic::LightGrid | PassSemantic::LightIndexList | PassSemantic::LightClusters => {
            let _ = tile_size;
            (FormatClass::Mono, ExtentPolicy::TileGrid, 1)
        }
        PassSemantic::AmbientOcclusion => (FormatClass::Mono, ExtentPolicy::FullFrame, 1),
        other => (other.format_class(), ExtentPolicy::FullFrame, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::render_path::compiler::compile;
    use crate::render_path::contract::build_registry;
    use crate::render_path::recipe::{PassChainEntry, PathPreset, RenderPathRecipe, TechniqueMode};

    fn simple_recipe() -> RenderPathRecipe {
        RenderPathRecipe::new("t", BackendKind::Vulkan, TechniqueMode::Pbr, PathPreset::ForwardSimple)
            .with_chain(vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::PbrForward),
                PassChainEntry::required(PassId::Tonemap),
            ])
    }

    #[test]
    fn every_consumer_binding_points_to_earlier_producer() {
        let registry = build_registry();
        let recipe = simple_recipe();
        let plan = compile(&recipe, &registry).unwrap();
        let rp = plan_resources(&plan, &recipe, &registry).unwrap();
        for binding in &rp.pass_bindings {
            for &(_, resource_index) in &binding.reads {
                let producer_pass = rp.resources[resource_index].producer_index;
                assert!(producer_pass < binding.pass_index);
            }
        }
    }

    #[test]
    fn missing_producer_is_reported() {
        // PbrForward needs ShadowMap input per the registry; omit the shadow pass.
        let registry = build_registry();
        let recipe = RenderPathRecipe::new(
            "broken",
            BackendKind::Vulkan,
            TechniqueMode::Pbr,
            PathPreset::ForwardSimple,
        )
        .with_chain(vec![PassChainEntry::required(PassId::PbrForward)]);
        let plan = compile(&recipe, &registry).unwrap();
        let err = plan_resources(&plan, &recipe, &registry).unwrap_err();
        assert!(matches!(err, EngineError::MissingProducer(PassId::PbrForward, PassSemantic::ShadowMap)));
    }
}

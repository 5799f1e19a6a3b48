//! Render Path Compiler (L2)
//!
//! Resolves a [`RenderPathRecipe`] into an [`ExecutionPlan`]: an ordered
//! list of compiled passes plus accumulated warnings and errors. The
//! compiler never aborts early — every error in the recipe is reported, not
//! just the first.

use rustc_hash::FxHashSet;

use super::contract::PassContractRegistry;
use super::pass_id::PassId;
use super::recipe::RenderPathRecipe;
use super::semantic::PassSemantic;

/// One pass that survived compilation, in final chain order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompiledPass {
    /// Position of this pass in the compiled chain (stable across
    /// recompiles of the same recipe).
    pub id: usize,
    pub pass_id: PassId,
    pub required: bool,
}

/// A single compile diagnostic. Kept as data (not raised as a Rust `Err`)
/// so a recipe with problems still yields a usable, partially degraded
/// plan — per §7's propagation model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileDiagnostic {
    UnknownPassId(PassId),
    DuplicatePassId(PassId),
    PassNotSupportedOnBackend(PassId),
    RequiredPassMissing(PassId),
    UnresolvedInputSemantic(PassId, PassSemantic),
    /// A compiled pass's declared output is never consumed by any later
    /// pass in the chain. Non-fatal — the pass still ran, its output is
    /// just wasted work — so this accumulates as a warning, not an error.
    SemanticallyDeadPass(PassId, PassSemantic),
}

/// Output of the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    pub recipe_name: String,
    pub backend: crate::backend::BackendKind,
    pub technique_mode: super::recipe::TechniqueMode,
    pub compiled_passes: Vec<CompiledPass>,
    pub valid: bool,
    pub warnings: Vec<CompileDiagnostic>,
    pub errors: Vec<CompileDiagnostic>,
}

/// Compiles `recipe` against `registry`. Always returns a plan (compilation
/// itself cannot fail in the `Result` sense); callers inspect `valid` and
/// `errors` to decide whether to adopt it.
#[allow(clippy::result_large_err)]
pub fn compile(
    recipe: &RenderPathRecipe,
    registry: &PassContractRegistry,
) -> crate::errors::Result<ExecutionPlan> {
    let mut compiled_passes = Vec::with_capacity(recipe.pass_chain.len());
    let mut warnings = Vec::new();
    let mut errors = Vec::new();
    let mut seen: FxHashSet<PassId> = FxHashSet::default();
    let mut produced: FxHashSet<PassSemantic> = FxHashSet::default();

    for entry in &recipe.pass_chain {
        let pass_id = entry.pass_id;

        if seen.contains(&pass_id) {
            errors.push(CompileDiagnostic::DuplicatePassId(pass_id));
            continue;
        }

        let Some(contract) = registry.get(pass_id) else {
            errors.push(CompileDiagnostic::UnknownPassId(pass_id));
            continue;
        };

        let eligible = contract.eligible_on(recipe.backend) && recipe.path_preset.supports_pass(pass_id);
        if !eligible {
            if entry.required {
                errors.push(CompileDiagnostic::PassNotSupportedOnBackend(pass_id));
            } else {
                warnings.push(CompileDiagnostic::PassNotSupportedOnBackend(pass_id));
            }
            continue;
        }

        seen.insert(pass_id);

        for &input in &contract.inputs {
            if !produced.contains(&input) {
                errors.push(CompileDiagnostic::UnresolvedInputSemantic(pass_id, input));
            }
        }
        for &output in &contract.outputs {
            produced.insert(output);
        }

        compiled_passes.push(CompiledPass {
            id: compiled_passes.len(),
            pass_id,
            required: entry.required,
        });
    }

    for entry in &recipe.pass_chain {
        if entry.required && !compiled_passes.iter().any(|p| p.pass_id == entry.pass_id) {
            errors.push(CompileDiagnostic::RequiredPassMissing(entry.pass_id));
        }
    }

    warnings.extend(find_dead_passes(&compiled_passes, registry));

    let valid = errors.is_empty();

    Ok(ExecutionPlan {
        recipe_name: recipe.name.clone(),
        backend: recipe.backend,
        technique_mode: recipe.technique_mode,
        compiled_passes,
        valid,
        warnings,
        errors,
    })
}

/// A pass's output is semantically dead if no later compiled pass consumes
/// it. `ColorLdr` is exempt: it is the plan's terminal presentable output,
/// consumed by the swapchain present outside the compiled chain rather than
/// by another pass.
fn find_dead_passes(compiled_passes: &[CompiledPass], registry: &PassContractRegistry) -> Vec<CompileDiagnostic> {
    let mut dead = Vec::new();
    for (i, pass) in compiled_passes.iter().enumerate() {
        let Some(contract) = registry.get(pass.pass_id) else {
            continue;
        };
        for &output in &contract.outputs {
            if output == PassSemantic::ColorLdr {
                continue;
            }
            let consumed_later = compiled_passes[i + 1..].iter().any(|later| {
                registry
                    .get(later.pass_id)
                    .is_some_and(|later_contract| later_contract.inputs.contains(&output))
            });
            if !consumed_later {
                dead.push(CompileDiagnostic::SemanticallyDeadPass(pass.pass_id, output));
            }
        }
    }
    dead
}

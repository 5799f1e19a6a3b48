//! Render-Path Compiler & Resource Planner
//!
//! Resolves a [`recipe::RenderPathRecipe`] into a validated,
//! backend-specific [`compiler::ExecutionPlan`], then derives the
//! transient resources ([`resource_plan::ResourcePlan`]) and
//! synchronization/aliasing metadata ([`barrier_plan::BarrierPlan`]) that
//! plan implies.

pub mod barrier_plan;
pub mod compiler;
pub mod contract;
pub mod pass_id;
pub mod recipe;
pub mod resource_plan;
pub mod semantic;

pub use barrier_plan::{plan_barriers, AliasClass, BarrierPlan};
pub use compiler::{compile, CompiledPass, ExecutionPlan};
pub use contract::{build_registry, PassContract, PassContractRegistry};
pub use pass_id::PassId;
pub use recipe::{RenderCompositionRecipe, RenderPathRecipe};
pub use resource_plan::{plan_resources, ResourcePlan};
pub use semantic::PassSemantic;

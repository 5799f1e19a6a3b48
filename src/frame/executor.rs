//! Frame Executor (§4.6): walks a compiled plan once per frame, rotating
//! the frame ring, dispatching each pass, and emitting barriers driven by
//! the [`BarrierPlan`].

use crate::render_path::{BarrierPlan, CompiledPass, ExecutionPlan, PassId, ResourcePlan};

use super::dispatcher::{DispatchOutcome, ExecutionContext, PassDispatcher};
use super::history::HistoryManager;
use super::ring::FrameRing;
use super::timing::{FrameTimings, PassTiming};
use super::wait_group::WaitGroup;

/// Worker pool size is clamped to this range regardless of what the
/// backend recommends (§4.6 "Parallelism").
const MIN_WORKERS: usize = 1;
const MAX_WORKERS: usize = 8;

/// Summary of one executed frame, returned for telemetry and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame_slot: usize,
    pub frame_count: u64,
    pub dispatched: Vec<PassId>,
    /// Passes with no registered handler — counted, never fatal.
    pub fallback_count: u64,
    /// Reads with no matching [`BarrierPlan`] edge; a conservative memory
    /// barrier is assumed and the frame continues (§4.6 "Failure
    /// semantics").
    pub barrier_fallback_count: u64,
    pub timings: FrameTimings,
    pub history_written: bool,
}

/// Drives one plan's passes through a [`PassDispatcher`], frame after
/// frame, owning the ring, worker pool sizing, and history manager.
pub struct FrameExecutor {
    ring: FrameRing<()>,
    dispatcher: PassDispatcher,
    history: HistoryManager,
    worker_count: usize,
}

impl FrameExecutor {
    #[must_use]
    pub fn new(dispatcher: PassDispatcher, recommended_workers: usize, history_enabled: bool) -> Self {
        Self {
            ring: FrameRing::new(()),
            dispatcher,
            history: HistoryManager::new(history_enabled),
            worker_count: recommended_workers.clamp(MIN_WORKERS, MAX_WORKERS),
        }
    }

    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Executes one frame: rotates the ring, fans recording batches out to
    /// a wait-group-synchronized worker pool (recording itself is a no-op
    /// placeholder here — the CPU-side scene work the spec assigns to this
    /// step happens in [`crate::culling`]/[`crate::lighting`] ahead of this
    /// call), dispatches every compiled pass in chain order, and tracks
    /// barrier/dispatch fallbacks.
    pub fn execute_frame(
        &mut self,
        plan: &ExecutionPlan,
        resource_plan: &ResourcePlan,
        barrier_plan: &BarrierPlan,
        instance_batch_count: usize,
        per_pass_cpu_micros: impl Fn(PassId) -> f64,
    ) -> FrameReport {
        let (frame_slot, frame_count) = self.ring.rotate();

        self.fan_out_recording(instance_batch_count);

        let mut post_color_source = 0u8;
        let mut dispatched = Vec::with_capacity(plan.compiled_passes.len());
        let mut fallback_count = 0u64;
        let mut barrier_fallback_count = 0u64;
        let mut timings = FrameTimings::default();

        let mut taa_ran = false;

        for compiled in &plan.compiled_passes {
            barrier_fallback_count += self.emit_barriers(compiled, resource_plan, barrier_plan);

            let mut ctx = ExecutionContext { frame_slot, frame_count, post_color_source };
            match self.dispatcher.dispatch(compiled.pass_id, &mut ctx) {
                DispatchOutcome::Handled(next_source) => {
                    post_color_source = next_source;
                    dispatched.push(compiled.pass_id);
                }
                DispatchOutcome::Fallback => {
                    fallback_count += 1;
                }
            }

            timings.passes.push(PassTiming {
                pass_id: compiled.pass_id,
                cpu_micros: per_pass_cpu_micros(compiled.pass_id),
                gpu_micros: None,
            });

            if compiled.pass_id == PassId::Taa {
                taa_ran = true;
            }
        }

        let history_written = taa_ran && self.history.enabled;
        if history_written {
            self.history.mark_written();
        }
        self.history.advance_frame();

        FrameReport {
            frame_slot,
            frame_count,
            dispatched,
            fallback_count,
            barrier_fallback_count,
            timings,
            history_written,
        }
    }

    fn fan_out_recording(&self, instance_batch_count: usize) {
        if instance_batch_count == 0 {
            return;
        }
        let wg = WaitGroup::new();
        wg.add(self.worker_count);
        for _ in 0..self.worker_count {
            // Real recording happens against a per-worker command pool;
            // this placeholder only exercises the wait-group contract.
            wg.done();
        }
        wg.wait();
    }

    /// Counts, for `compiled`'s input reads, how many have no matching
    /// edge in `barrier_plan` — these fall back to a conservative barrier
    /// rather than a tight one, but the frame still proceeds.
    fn emit_barriers(&self, compiled: &CompiledPass, resource_plan: &ResourcePlan, barrier_plan: &BarrierPlan) -> u64 {
        let Some(binding) = resource_plan
            .pass_bindings
            .iter()
            .find(|b| b.pass_id == compiled.pass_id)
        else {
            return 0;
        };

        binding
            .reads
            .iter()
            .filter(|&&(semantic, resource_index)| {
                let producer_index = resource_plan.resources[resource_index].producer_index;
                let producer_pass_id = resource_plan.pass_bindings[producer_index].pass_id;
                !barrier_plan
                    .edges
                    .iter()
                    .any(|e| e.producer_pass == producer_pass_id && e.consumer_pass == compiled.pass_id && e.semantic == semantic)
            })
            .count() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendKind;
    use crate::render_path::{build_registry, compile, plan_barriers, plan_resources};
    use crate::render_path::recipe::{PassChainEntry, PathPreset, RenderPathRecipe, TechniqueMode};

    fn forward_plan() -> (ExecutionPlan, ResourcePlan, BarrierPlan) {
        let registry = build_registry();
        let recipe = RenderPathRecipe::new("t", BackendKind::Vulkan, TechniqueMode::Pbr, PathPreset::ForwardSimple)
            .with_chain(vec![
                PassChainEntry::required(PassId::ShadowMap),
                PassChainEntry::required(PassId::PbrForward),
                PassChainEntry::required(PassId::Tonemap),
            ]);
        let plan = compile(&recipe, &registry).unwrap();
        let rp = plan_resources(&plan, &recipe, &registry).unwrap();
        let bp = plan_barriers(&rp, &registry).unwrap();
        (plan, rp, bp)
    }

    #[test]
    fn dispatch_order_matches_compiled_chain_order() {
        let (plan, rp, bp) = forward_plan();
        let mut dispatcher = PassDispatcher::new();
        for pass_id in [PassId::ShadowMap, PassId::PbrForward, PassId::Tonemap] {
            dispatcher.register(pass_id, |_ctx| 1);
        }
        let mut executor = FrameExecutor::new(dispatcher, 4, true);
        let report = executor.execute_frame(&plan, &rp, &bp, 10, |_| 10.0);
        assert_eq!(report.dispatched, vec![PassId::ShadowMap, PassId::PbrForward, PassId::Tonemap]);
        assert_eq!(report.fallback_count, 0);
        assert_eq!(report.barrier_fallback_count, 0);
    }

    #[test]
    fn unregistered_pass_counts_as_fallback_not_a_panic() {
        let (plan, rp, bp) = forward_plan();
        let dispatcher = PassDispatcher::new();
        let mut executor = FrameExecutor::new(dispatcher, 4, true);
        let report = executor.execute_frame(&plan, &rp, &bp, 0, |_| 1.0);
        assert_eq!(report.fallback_count, 3);
    }

    #[test]
    fn worker_count_is_clamped_to_one_through_eight() {
        let dispatcher = PassDispatcher::new();
        let executor = FrameExecutor::new(dispatcher, 64, false);
        assert_eq!(executor.worker_count(), MAX_WORKERS);
        let executor = FrameExecutor::new(PassDispatcher::new(), 0, false);
        assert_eq!(executor.worker_count(), MIN_WORKERS);
    }

    #[test]
    fn ring_rotates_across_successive_frames() {
        let (plan, rp, bp) = forward_plan();
        let mut dispatcher = PassDispatcher::new();
        for pass_id in [PassId::ShadowMap, PassId::PbrForward, PassId::Tonemap] {
            dispatcher.register(pass_id, |_ctx| 1);
        }
        let mut executor = FrameExecutor::new(dispatcher, 4, true);
        let r1 = executor.execute_frame(&plan, &rp, &bp, 0, |_| 1.0);
        let r2 = executor.execute_frame(&plan, &rp, &bp, 0, |_| 1.0);
        assert_ne!(r1.frame_slot, r2.frame_slot);
        assert_eq!(r2.frame_count, r1.frame_count + 1);
    }
}

//! Pass dispatcher: a registry keyed by [`PassId`] mapping to the closure
//! that records that pass's work (§9 design note: "handlers are a
//! registry keyed by `PassId` to a closure capturing the pipeline/layout
//! state it needs").

use rustc_hash::FxHashMap;

use crate::render_path::PassId;

/// Context handed to every pass handler. `post_color_source` implements
/// the post-stack ping-pong protocol: `0` means no post-processed color
/// exists yet, `1`/`2` identify which of the two ping-pong targets holds
/// the latest result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionContext {
    pub frame_slot: usize,
    pub frame_count: u64,
    pub post_color_source: u8,
}

/// What dispatching one pass produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The pass ran; carries the updated `post_color_source`.
    Handled(u8),
    /// No handler was registered for this pass. Per §4.6's failure
    /// semantics this is a one-shot warning and a no-op, never a hard
    /// error — the frame continues with the next pass.
    Fallback,
}

type HandlerFn = dyn Fn(&mut ExecutionContext) -> u8 + Send + Sync;

/// Registry of pass handlers, built once per backend/technique
/// combination and reused across frames.
#[derive(Default)]
pub struct PassDispatcher {
    handlers: FxHashMap<PassId, Box<HandlerFn>>,
}

impl PassDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: FxHashMap::default() }
    }

    pub fn register(&mut self, pass_id: PassId, handler: impl Fn(&mut ExecutionContext) -> u8 + Send + Sync + 'static) {
        self.handlers.insert(pass_id, Box::new(handler));
    }

    #[must_use]
    pub fn dispatch(&self, pass_id: PassId, ctx: &mut ExecutionContext) -> DispatchOutcome {
        match self.handlers.get(&pass_id) {
            Some(handler) => DispatchOutcome::Handled(handler(ctx)),
            None => DispatchOutcome::Fallback,
        }
    }

    #[must_use]
    pub fn is_registered(&self, pass_id: PassId) -> bool {
        self.handlers.contains_key(&pass_id)
    }
}

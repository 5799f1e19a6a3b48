//! Frame ring, pass dispatcher, worker-pool wait-group, history manager,
//! and the frame executor that ties them together (§4.6, §5).

pub mod dispatcher;
pub mod executor;
pub mod history;
pub mod ring;
pub mod timing;
pub mod wait_group;

pub use dispatcher::{DispatchOutcome, ExecutionContext, PassDispatcher};
pub use executor::{FrameExecutor, FrameReport};
pub use history::{HistoryManager, JitterOffset};
pub use ring::{FrameRing, FRAME_RING_SIZE};
pub use timing::{FrameTimings, PassTiming};
pub use wait_group::WaitGroup;

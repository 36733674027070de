pub mod config;
pub mod fcfs;
pub mod rr;
pub mod srtf;

use crate::core::state::{SchedCtx, TaskId};
use crate::error::SimResult;
pub use config::{Policy, Quantum, SchedConfig};
pub use fcfs::FcfsScheduler;
pub use rr::RoundRobinScheduler;
pub use srtf::SrtfScheduler;

pub type EnqueueFlags = u64;

// Task just arrived
pub const ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
// Task was taken off the CPU before finishing
pub const ENQ_PREEMPT: EnqueueFlags = 1 << 1;

/// What the driver should do with the running task after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Preempt,
}

/// A scheduling policy plugged into the tick driver.
///
/// The driver owns the clock and the task table; a policy only decides where
/// a ready task goes, which task runs next, and when the running task gives
/// up the CPU.
pub trait Scheduler {
    fn init(ctx: &mut SchedCtx, config: &SchedConfig) -> SimResult<Self>
    where
        Self: Sized;

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, flags: EnqueueFlags);

    fn dispatch(&mut self, ctx: &mut SchedCtx) -> Option<TaskId> {
        ctx.ready_pop()
    }

    // Called after each tick the running task did not finish in
    fn tick(&mut self, ctx: &mut SchedCtx, task: TaskId) -> TickOutcome;
}

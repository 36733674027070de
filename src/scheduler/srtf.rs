use super::{EnqueueFlags, SchedConfig, SchedCtx, Scheduler, TaskId, TickOutcome};
use crate::core::ReadyPool;
use crate::error::SimResult;

/// Shortest-remaining-time-first.
///
/// The running task goes back into the priority pool after every tick, so a
/// shorter job that arrived meanwhile takes the CPU on the very next tick.
/// Equal remaining times go to the lower pid.
pub struct SrtfScheduler;

impl Scheduler for SrtfScheduler {
    fn init(ctx: &mut SchedCtx, _config: &SchedConfig) -> SimResult<Self> {
        ctx.set_ready_pool(ReadyPool::new_priq());
        Ok(Self)
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, _flags: EnqueueFlags) {
        ctx.ready_push(task);
    }

    fn tick(&mut self, _ctx: &mut SchedCtx, _task: TaskId) -> TickOutcome {
        TickOutcome::Preempt
    }
}

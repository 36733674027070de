use super::{EnqueueFlags, SchedConfig, SchedCtx, Scheduler, TaskId, TickOutcome};
use crate::error::SimResult;

/// First-come-first-served: strict FIFO, every task runs to completion.
pub struct FcfsScheduler;

impl Scheduler for FcfsScheduler {
    fn init(_ctx: &mut SchedCtx, _config: &SchedConfig) -> SimResult<Self> {
        Ok(Self)
    }

    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, flags: EnqueueFlags) {
        debug_assert_eq!(
            flags & super::ENQ_PREEMPT,
            0,
            "FCFS never preempts a running task"
        );
        ctx.ready_push(task);
    }

    fn tick(&mut self, _ctx: &mut SchedCtx, _task: TaskId) -> TickOutcome {
        TickOutcome::Continue
    }
}

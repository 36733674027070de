use tracing::debug;

use super::{EnqueueFlags, SchedConfig, SchedCtx, Scheduler, TaskId, TickOutcome};
use crate::core::Ticks;
use crate::error::{SimError, SimResult};

/// Round-robin over a FIFO pool with a fixed time slice.
pub struct RoundRobinScheduler {
    quantum: Ticks,
}

impl RoundRobinScheduler {
    pub fn quantum(&self) -> Ticks {
        self.quantum
    }
}

impl Scheduler for RoundRobinScheduler {
    fn init(_ctx: &mut SchedCtx, config: &SchedConfig) -> SimResult<Self> {
        let quantum = config.quantum().ok_or(SimError::MissingQuantum)?;
        Ok(Self {
            quantum: quantum.ticks(),
        })
    }

    // Preempted tasks go behind everything that arrived during their slice
    fn enqueue(&mut self, ctx: &mut SchedCtx, task: TaskId, _flags: EnqueueFlags) {
        ctx.ready_push(task);
    }

    fn tick(&mut self, ctx: &mut SchedCtx, task: TaskId) -> TickOutcome {
        let task = ctx.task(task);
        if task.consumed_timeslice >= self.quantum {
            debug!(
                pid = task.pid,
                remaining = task.remaining(),
                "time slice expired"
            );
            TickOutcome::Preempt
        } else {
            TickOutcome::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preempts_once_slice_is_used_up() {
        let mut ctx = SchedCtx::new();
        let config = SchedConfig::round_robin(2).unwrap();
        let mut rr = RoundRobinScheduler::init(&mut ctx, &config).unwrap();
        assert_eq!(rr.quantum(), 2);

        let task = ctx.create_task(1, 0, 5);
        ctx.set_running(task);
        ctx.task_mut(task).consumed_timeslice = 1;
        assert_eq!(rr.tick(&mut ctx, task), TickOutcome::Continue);
        ctx.task_mut(task).consumed_timeslice = 2;
        assert_eq!(rr.tick(&mut ctx, task), TickOutcome::Preempt);
    }

    #[test]
    fn init_without_quantum_fails() {
        let mut ctx = SchedCtx::new();
        assert!(matches!(
            RoundRobinScheduler::init(&mut ctx, &SchedConfig::fcfs()),
            Err(SimError::MissingQuantum)
        ));
    }
}

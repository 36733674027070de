use super::state::{SchedCtx, TaskState, Ticks};

/// Checks the simulation invariants after every step (debug builds only).
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
    last_now: Ticks,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &SchedCtx) {
        self.step += 1;

        debug_assert_eq!(
            ctx.now,
            self.last_now + 1,
            "clock must advance by exactly one tick per step"
        );
        self.last_now = ctx.now;

        if let Some(task_id) = ctx.current {
            let task = ctx.task(task_id);
            debug_assert_eq!(
                task.state,
                TaskState::Running,
                "current task {} must be Running",
                task.pid
            );
            debug_assert!(
                !ctx.enqueued.contains(&task_id),
                "Running task {} must not appear in the ready pool",
                task.pid
            );
        }

        for task in &ctx.tasks {
            debug_assert!(
                task.executed_time <= task.burst_time,
                "Task {} executed past its burst",
                task.pid
            );
            if task.state == TaskState::Completed {
                debug_assert!(
                    !ctx.enqueued.contains(&task.id),
                    "Completed task {} still present in the ready pool",
                    task.pid
                );
            }
        }

        debug_assert_eq!(
            ctx.enqueued.len(),
            ctx.ready.len(),
            "ready pool membership index out of sync"
        );
        for &task_id in &ctx.enqueued {
            debug_assert!(
                ctx.ready.contains(task_id),
                "membership index claims task {task_id} is ready, but the pool does not contain it"
            );
        }
    }

    // Every tick is either idle or spent on exactly one burst tick
    pub fn check_conservation(&self, ctx: &SchedCtx) {
        let burst: Ticks = ctx.tasks.iter().map(|t| t.burst_time).sum();
        debug_assert_eq!(
            ctx.stats.idle_ticks + burst,
            ctx.now,
            "idle ticks plus total burst must equal the final clock"
        );
    }
}

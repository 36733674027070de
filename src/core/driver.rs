use tracing::{debug, trace};

use super::{
    event::TraceEvent,
    observer::Observer,
    state::{Pid, SchedCtx, TaskId, Ticks},
};
use crate::error::SimResult;
use crate::scheduler::{ENQ_ARRIVAL, ENQ_PREEMPT, SchedConfig, Scheduler, TickOutcome};

/// The single simulated CPU, driven one tick at a time.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SchedCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(config: &SchedConfig) -> SimResult<Self> {
        let mut ctx = SchedCtx::new();
        let scheduler = S::init(&mut ctx, config)?;
        Ok(Self {
            ctx,
            scheduler,
            observer: Observer::new(),
        })
    }

    /// Hand a newly arrived process to the policy.
    pub fn admit(&mut self, pid: Pid, arrival_time: Ticks, burst_time: Ticks) -> TaskId {
        let task = self.ctx.create_task(pid, arrival_time, burst_time);
        trace!(pid, now = self.ctx.now, "admitted");
        self.scheduler.enqueue(&mut self.ctx, task, ENQ_ARRIVAL);
        task
    }

    /// Give the CPU a task if it has none. Returns whether the CPU is busy.
    pub fn dispatch_if_idle(&mut self) -> bool {
        if !self.ctx.cpu_is_idle() {
            return true;
        }

        match self.scheduler.dispatch(&mut self.ctx) {
            Some(task) => {
                let first = self.ctx.set_running(task);
                debug!(
                    pid = self.ctx.task(task).pid,
                    now = self.ctx.now,
                    first,
                    "dispatched"
                );
                true
            }
            None => false,
        }
    }

    /// Spend the current tick: run the current task for one tick, or idle.
    pub fn execute(&mut self) -> TraceEvent {
        let tick = self.ctx.now;
        let Some(task_id) = self.ctx.current else {
            self.ctx.stats.record_idle();
            self.ctx.advance_time(1);
            return TraceEvent::Idle { tick };
        };

        let task = self.ctx.task_mut(task_id);
        task.executed_time += 1;
        task.consumed_timeslice += 1;
        let pid = task.pid;

        self.ctx.advance_time(1);
        TraceEvent::Running { tick, pid }
    }

    /// Retire or requeue the current task once the tick's arrivals are in.
    pub fn settle(&mut self) -> Option<TraceEvent> {
        let task_id = self.ctx.current?;

        if self.ctx.task(task_id).is_complete() {
            self.ctx.clear_cpu();
            self.ctx.mark_completed(task_id);
            let task = self.ctx.task(task_id);
            debug!(
                pid = task.pid,
                turnaround = task.turnaround_time,
                "finished"
            );
            return Some(TraceEvent::Finished {
                tick: self.ctx.now,
                pid: task.pid,
            });
        }

        if self.scheduler.tick(&mut self.ctx, task_id) == TickOutcome::Preempt {
            self.ctx.clear_cpu();
            self.ctx.mark_ready(task_id);
            self.scheduler.enqueue(&mut self.ctx, task_id, ENQ_PREEMPT);
        }

        None
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn is_quiescent(&self) -> bool {
        self.ctx.cpu_is_idle() && !self.ctx.has_ready_tasks()
    }

    pub fn observe(&mut self) {
        self.observer.observe(&self.ctx);
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }
}

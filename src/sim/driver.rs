use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::job::{Job, ProcessRecord, ValidJob};
use super::report::Report;
use crate::{
    core::{TraceEvent, driver::SchedCore},
    error::{SimError, SimResult},
    scheduler::{SchedConfig, Scheduler},
};

/// One run of a fixed process set under scheduler `S`.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
    config: SchedConfig,
    // Admission queue: sorted by arrival, admitted from `job_cursor` on
    jobs: Vec<ValidJob>,
    job_cursor: usize,
    finished: bool,
}

impl<S: Scheduler> Sim<S> {
    /// Validate `jobs` and prepare a run. The whole batch is rejected if any
    /// descriptor is invalid.
    pub fn new(jobs: Vec<Job>, config: SchedConfig) -> SimResult<Self> {
        let mut seen = FxHashSet::default();
        let mut valid = Vec::with_capacity(jobs.len());
        for job in &jobs {
            if !seen.insert(job.id) {
                return Err(SimError::DuplicatePid(job.id));
            }
            valid.push(job.validate()?);
        }

        // Stable: equal arrivals keep their input order
        valid.sort_by_key(|job| job.arrival_time);

        info!(
            policy = %config.policy(),
            quantum = config.quantum().map(|q| q.ticks()),
            processes = valid.len(),
            "simulation prepared"
        );

        Ok(Self {
            core: SchedCore::<S>::new(&config)?,
            config,
            jobs: valid,
            job_cursor: 0,
            finished: false,
        })
    }

    /// Advance the simulation by one tick and return the events it produced.
    pub fn step(&mut self) -> Vec<TraceEvent> {
        let mut events = Vec::new();
        if self.finished {
            return events;
        }

        self.drain_pending_arrivals();
        if !self.core.dispatch_if_idle() && !self.has_pending_arrivals() {
            self.finish(&mut events);
            return events;
        }

        events.push(self.core.execute());
        // Arrivals during this tick queue up ahead of a preempted task
        self.drain_pending_arrivals();
        events.extend(self.core.settle());
        self.core.observe();

        events
    }

    /// Move every job that has arrived by now into the ready pool.
    pub fn drain_pending_arrivals(&mut self) -> usize {
        let now = self.core.now();
        let arrived = self.jobs[self.job_cursor..]
            .iter()
            .take_while(|job| job.arrival_time <= now)
            .count(); // contiguous, since jobs are sorted

        for job in &self.jobs[self.job_cursor..self.job_cursor + arrived] {
            self.core.admit(job.id, job.arrival_time, job.burst_time);
        }
        self.job_cursor += arrived;

        arrived
    }

    pub fn has_pending_arrivals(&self) -> bool {
        self.job_cursor < self.jobs.len()
    }

    pub fn is_done(&self) -> bool {
        self.finished
    }

    fn finish(&mut self, events: &mut Vec<TraceEvent>) {
        debug_assert!(self.core.is_quiescent());
        self.finished = true;
        self.core.observer().check_conservation(&self.core.ctx);

        let now = self.core.now();
        info!(
            now,
            idle = self.core.ctx.stats.idle_ticks,
            completed = self.core.ctx.stats.completed,
            steps = self.core.observer().steps(),
            "simulation finished"
        );

        if self.jobs.is_empty() {
            debug!("no processes, trace left empty");
            return;
        }
        events.push(TraceEvent::AllFinished { tick: now });
    }

    pub fn process_records(&self) -> Vec<ProcessRecord> {
        let ctx = &self.core.ctx;
        ctx.completed
            .iter()
            .map(|&task_id| {
                let task = ctx.task(task_id);
                ProcessRecord {
                    pid: task.pid,
                    arrival_time: task.arrival_time,
                    burst_time: task.burst_time,
                    response_time: task.response_time.unwrap_or_default(),
                    waiting_time: task.waiting_time().unwrap_or_default(),
                    turnaround_time: task.turnaround_time.unwrap_or_default(),
                    completion_time: task.completion_time.unwrap_or_default(),
                }
            })
            .collect()
    }

    pub fn report(&self, trace: Vec<TraceEvent>) -> Report {
        Report {
            policy: self.config.policy(),
            quantum: self.config.quantum().map(|q| q.ticks()),
            trace,
            summary: self.core.ctx.stats.summary(self.core.now()),
            processes: self.process_records(),
        }
    }
}

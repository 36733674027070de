use super::{Job, Report, Sim};
use crate::core::{TraceEvent, TraceSink};
use crate::error::SimResult;
use crate::scheduler::{
    FcfsScheduler, Policy, RoundRobinScheduler, SchedConfig, Scheduler, SrtfScheduler,
};

/// A simulation run with its policy erased.
pub trait Engine {
    fn step(&mut self) -> Vec<TraceEvent>;

    fn is_done(&self) -> bool;

    fn drain_pending_arrivals(&mut self) -> usize;

    fn report(&self, trace: Vec<TraceEvent>) -> Report;

    fn run(&mut self, sink: &mut dyn TraceSink) {
        while !self.is_done() {
            for event in self.step() {
                sink.record(event);
            }
        }
    }
}

impl<S: Scheduler> Engine for Sim<S> {
    fn step(&mut self) -> Vec<TraceEvent> {
        Sim::step(self)
    }

    fn is_done(&self) -> bool {
        Sim::is_done(self)
    }

    fn drain_pending_arrivals(&mut self) -> usize {
        Sim::drain_pending_arrivals(self)
    }

    fn report(&self, trace: Vec<TraceEvent>) -> Report {
        Sim::report(self, trace)
    }
}

pub fn build_engine(jobs: Vec<Job>, config: SchedConfig) -> SimResult<Box<dyn Engine>> {
    let engine: Box<dyn Engine> = match config.policy() {
        Policy::Fcfs => Box::new(Sim::<FcfsScheduler>::new(jobs, config)?),
        Policy::RoundRobin => Box::new(Sim::<RoundRobinScheduler>::new(jobs, config)?),
        Policy::Srtf => Box::new(Sim::<SrtfScheduler>::new(jobs, config)?),
    };
    Ok(engine)
}

/// Run `jobs` under `config` to completion and collect the full trace.
pub fn simulate(jobs: Vec<Job>, config: SchedConfig) -> SimResult<Report> {
    let mut engine = build_engine(jobs, config)?;
    let mut trace: Vec<TraceEvent> = Vec::new();
    engine.run(&mut trace);
    Ok(engine.report(trace))
}

/// Run `jobs` under `config`, streaming events to `sink` as they happen.
///
/// The returned report carries an empty trace.
pub fn simulate_into(
    jobs: Vec<Job>,
    config: SchedConfig,
    sink: &mut dyn TraceSink,
) -> SimResult<Report> {
    let mut engine = build_engine(jobs, config)?;
    engine.run(sink);
    Ok(engine.report(Vec::new()))
}

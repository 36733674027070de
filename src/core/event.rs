use serde::Serialize;
use std::fmt;

use crate::core::{Pid, Ticks};

/// One entry of the execution trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TraceEvent {
    // No process was ready during `tick`
    Idle { tick: Ticks },
    Running { tick: Ticks, pid: Pid },
    Finished { tick: Ticks, pid: Pid },
    AllFinished { tick: Ticks },
}

impl TraceEvent {
    pub fn tick(&self) -> Ticks {
        match *self {
            Self::Idle { tick }
            | Self::Running { tick, .. }
            | Self::Finished { tick, .. }
            | Self::AllFinished { tick } => tick,
        }
    }

    pub fn pid(&self) -> Option<Pid> {
        match *self {
            Self::Running { pid, .. } | Self::Finished { pid, .. } => Some(pid),
            Self::Idle { .. } | Self::AllFinished { .. } => None,
        }
    }
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle { tick } => write!(f, "<system time {tick}> no process is running"),
            Self::Running { tick, pid } => {
                write!(f, "<system time {tick}> process {pid} is running")
            }
            Self::Finished { tick, pid } => {
                write!(f, "<system time {tick}> process {pid} is finished...")
            }
            Self::AllFinished { tick } => write!(f, "<system time {tick}> All processes finish..."),
        }
    }
}

/// Consumer of trace events as the simulation produces them.
pub trait TraceSink {
    fn record(&mut self, event: TraceEvent);
}

impl TraceSink for Vec<TraceEvent> {
    fn record(&mut self, event: TraceEvent) {
        self.push(event);
    }
}

/// Adapts a closure into a [`TraceSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(TraceEvent)> TraceSink for FnSink<F> {
    fn record(&mut self, event: TraceEvent) {
        (self.0)(event);
    }
}

use serde::Serialize;
use std::fmt;

use super::job::ProcessRecord;
use crate::core::{Pid, Summary, Ticks, TraceEvent};
use crate::scheduler::Policy;

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub policy: Policy,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Ticks>,
    pub trace: Vec<TraceEvent>,
    pub summary: Summary,
    pub processes: Vec<ProcessRecord>,
}

impl Report {
    pub fn finished_at(&self) -> Ticks {
        self.trace.last().map_or(0, TraceEvent::tick)
    }

    pub fn record(&self, pid: Pid) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.pid == pid)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.trace {
            writeln!(f, "{event}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.summary)
    }
}

use thiserror::Error;

use crate::core::Pid;

/// Why a single process descriptor was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptorFault {
    #[error("arrival time {0} is negative")]
    NegativeArrival(i64),

    #[error("burst time {0} is not positive")]
    NonPositiveBurst(i64),
}

/// Errors that prevent a simulation run from starting.
///
/// A failed run produces no partial trace.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid quantum {0}: round-robin needs a quantum greater than zero")]
    InvalidQuantum(i64),

    #[error("round-robin requires a time quantum")]
    MissingQuantum,

    #[error("process {pid}: {reason}")]
    InvalidDescriptor { pid: Pid, reason: DescriptorFault },

    #[error("process id {0} appears more than once")]
    DuplicatePid(Pid),

    #[error("unknown scheduling policy '{0}' (valid: FCFS, RR, SRTF)")]
    UnknownPolicy(String),
}

/// Errors raised while reading descriptors from text.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: expected '<pid> <arrival> <burst>', got '{content}'")]
    Malformed { line: usize, content: String },
}

pub type SimResult<T> = Result<T, SimError>;

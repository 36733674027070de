//! Discrete-time CPU scheduling simulator.
//!
//! A fixed set of process descriptors is replayed through FCFS, round-robin
//! or SRTF on a single simulated CPU, one logical tick at a time. A run
//! yields a per-tick trace and summary statistics (CPU usage, average
//! waiting, response and turnaround time).

pub mod core;
pub mod error;
pub mod input;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Summary, TraceEvent, TraceSink};
pub use error::{DescriptorFault, InputError, SimError};
pub use scheduler::{Policy, SchedConfig, Scheduler};
pub use sim::{Engine, Job, Report, Sim, simulate};

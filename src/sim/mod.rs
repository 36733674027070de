pub mod driver;
pub mod engine;
pub mod job;
pub mod report;
pub mod workload;

pub use driver::Sim;
pub use engine::{Engine, build_engine, simulate, simulate_into};
pub use job::{Job, ProcessRecord};
pub use report::Report;
pub use workload::bernoulli_jobs;

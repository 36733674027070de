pub mod driver;
pub mod event;
pub mod observer;
pub mod state;
pub mod stats;

pub use driver::SchedCore;
pub use event::{FnSink, TraceEvent, TraceSink};
pub use observer::Observer;
pub use state::{Pid, ReadyPool, Remaining, SchedCtx, Task, TaskId, TaskState, Ticks};
pub use stats::{StatsAccumulator, Summary};

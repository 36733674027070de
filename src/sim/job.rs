use serde::{Deserialize, Serialize};

use crate::core::state::{Pid, Ticks};
use crate::error::{DescriptorFault, SimError, SimResult};

/// A process descriptor as supplied by the caller, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: Pid,
    pub arrival_time: i64,
    pub burst_time: i64,
}

impl Job {
    pub fn new(id: Pid, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
        }
    }

    pub(crate) fn validate(&self) -> SimResult<ValidJob> {
        let invalid = |reason| SimError::InvalidDescriptor {
            pid: self.id,
            reason,
        };

        let arrival_time = Ticks::try_from(self.arrival_time)
            .map_err(|_| invalid(DescriptorFault::NegativeArrival(self.arrival_time)))?;
        let burst_time = Ticks::try_from(self.burst_time)
            .ok()
            .filter(|&burst| burst > 0)
            .ok_or_else(|| invalid(DescriptorFault::NonPositiveBurst(self.burst_time)))?;

        Ok(ValidJob {
            id: self.id,
            arrival_time,
            burst_time,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ValidJob {
    pub id: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
}

/// Per-process outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub pid: Pid,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    pub response_time: Ticks,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub completion_time: Ticks,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_arrival() {
        assert_eq!(
            Job::new(3, -1, 4).validate().unwrap_err(),
            SimError::InvalidDescriptor {
                pid: 3,
                reason: DescriptorFault::NegativeArrival(-1)
            }
        );
    }

    #[test]
    fn rejects_non_positive_burst() {
        for burst in [0, -7] {
            assert_eq!(
                Job::new(1, 0, burst).validate().unwrap_err(),
                SimError::InvalidDescriptor {
                    pid: 1,
                    reason: DescriptorFault::NonPositiveBurst(burst)
                }
            );
        }
    }

    #[test]
    fn accepts_zero_arrival() {
        let job = Job::new(9, 0, 1).validate().unwrap();
        assert_eq!((job.id, job.arrival_time, job.burst_time), (9, 0, 1));
    }
}

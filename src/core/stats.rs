use serde::Serialize;
use std::fmt;

use super::state::Ticks;

/// Running totals gathered while the simulation advances.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StatsAccumulator {
    pub idle_ticks: Ticks,
    pub wait_sum: Ticks,
    pub response_sum: Ticks,
    pub turnaround_sum: Ticks,
    pub completed: u64,
}

impl StatsAccumulator {
    pub fn record_idle(&mut self) {
        self.idle_ticks += 1;
    }

    pub fn record_completion(&mut self, waiting: Ticks, response: Ticks, turnaround: Ticks) {
        self.wait_sum += waiting;
        self.response_sum += response;
        self.turnaround_sum += turnaround;
        self.completed += 1;
    }

    /// Render the four summary metrics for a run that ended at `clock`.
    ///
    /// Each field is `None` when its denominator is zero, which only
    /// happens for a run without any processes.
    pub fn summary(&self, clock: Ticks) -> Summary {
        let cpu_usage_percent =
            (clock > 0).then(|| 100.0 * (clock - self.idle_ticks) as f64 / clock as f64);

        let count = self.completed;
        let avg = |sum: Ticks| (count > 0).then(|| sum as f64 / count as f64);

        Summary {
            cpu_usage_percent,
            avg_wait: avg(self.wait_sum),
            avg_response: avg(self.response_sum),
            avg_turnaround: avg(self.turnaround_sum),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub cpu_usage_percent: Option<f64>,
    pub avg_wait: Option<f64>,
    pub avg_response: Option<f64>,
    pub avg_turnaround: Option<f64>,
}

struct Metric(Option<f64>);

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{value:.2}"),
            None => f.write_str("N/A"),
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CPU usage: {} %", Metric(self.cpu_usage_percent))?;
        writeln!(f, "Average waiting time: {}", Metric(self.avg_wait))?;
        writeln!(f, "Average response time: {}", Metric(self.avg_response))?;
        write!(f, "Average turnaround time: {}", Metric(self.avg_turnaround))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_run_is_not_applicable() {
        let summary = StatsAccumulator::default().summary(0);
        assert_eq!(summary.cpu_usage_percent, None);
        assert_eq!(summary.avg_wait, None);
        assert!(summary.to_string().contains("CPU usage: N/A %"));
    }

    #[test]
    fn averages_over_completed_processes() {
        let mut stats = StatsAccumulator::default();
        stats.record_idle();
        stats.record_completion(0, 0, 3);
        stats.record_completion(2, 1, 6);

        let summary = stats.summary(10);
        assert_eq!(summary.cpu_usage_percent, Some(90.0));
        assert_eq!(summary.avg_wait, Some(1.0));
        assert_eq!(summary.avg_response, Some(0.5));
        assert_eq!(summary.avg_turnaround, Some(4.5));
    }

    #[test]
    fn renders_two_decimals() {
        let summary = Summary {
            cpu_usage_percent: Some(100.0),
            avg_wait: Some(1.0 / 3.0),
            avg_response: Some(0.0),
            avg_turnaround: Some(3.0),
        };
        assert_eq!(
            summary.to_string(),
            "CPU usage: 100.00 %\n\
             Average waiting time: 0.33\n\
             Average response time: 0.00\n\
             Average turnaround time: 3.00"
        );
    }
}

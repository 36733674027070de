/*!
 * Property Tests
 * Completion, tick conservation and determinism over random workloads
 */

use proptest::prelude::*;
use schedsim::core::TraceEvent;
use schedsim::sim::bernoulli_jobs;
use schedsim::{Job, Report, SchedConfig, simulate};

fn jobs_strategy() -> impl Strategy<Value = Vec<Job>> {
    prop::collection::vec((0i64..30, 1i64..8), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (arrival, burst))| Job::new(i as u64 + 1, arrival, burst))
            .collect()
    })
}

fn config_strategy() -> impl Strategy<Value = SchedConfig> {
    prop_oneof![
        Just(SchedConfig::fcfs()),
        Just(SchedConfig::srtf()),
        (1i64..5).prop_map(|q| SchedConfig::round_robin(q).unwrap()),
    ]
}

fn total_turnaround(report: &Report) -> u64 {
    report.processes.iter().map(|p| p.turnaround_time).sum()
}

proptest! {
    #[test]
    fn every_process_completes(jobs in jobs_strategy(), config in config_strategy()) {
        let report = simulate(jobs.clone(), config).unwrap();

        prop_assert_eq!(report.processes.len(), jobs.len());
        for job in &jobs {
            let record = report.record(job.id).unwrap();
            let ran = report
                .trace
                .iter()
                .filter(|e| matches!(e, TraceEvent::Running { pid, .. } if *pid == job.id))
                .count() as u64;
            prop_assert_eq!(ran, record.burst_time);
            prop_assert!(record.turnaround_time >= record.burst_time);
            prop_assert!(record.response_time <= record.waiting_time);
            prop_assert_eq!(record.completion_time, record.arrival_time + record.turnaround_time);
        }
    }

    #[test]
    fn ticks_are_conserved(jobs in jobs_strategy(), config in config_strategy()) {
        let report = simulate(jobs.clone(), config).unwrap();
        let burst: u64 = jobs.iter().map(|j| j.burst_time as u64).sum();

        let ticks: Vec<u64> = report
            .trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::Idle { .. } | TraceEvent::Running { .. }))
            .map(TraceEvent::tick)
            .collect();
        let idle = report
            .trace
            .iter()
            .filter(|e| matches!(e, TraceEvent::Idle { .. }))
            .count() as u64;

        // One event per tick, clock advancing by exactly one each time
        prop_assert!(ticks.iter().copied().eq(0..ticks.len() as u64));
        prop_assert_eq!(idle + burst, report.finished_at());
    }

    #[test]
    fn runs_are_reproducible(jobs in jobs_strategy(), config in config_strategy()) {
        let first = simulate(jobs.clone(), config).unwrap();
        let second = simulate(jobs, config).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn srtf_minimizes_total_turnaround(jobs in jobs_strategy(), quantum in 1i64..5) {
        let srtf = simulate(jobs.clone(), SchedConfig::srtf()).unwrap();
        let fcfs = simulate(jobs.clone(), SchedConfig::fcfs()).unwrap();
        let rr = simulate(jobs, SchedConfig::round_robin(quantum).unwrap()).unwrap();

        prop_assert!(total_turnaround(&srtf) <= total_turnaround(&fcfs));
        prop_assert!(total_turnaround(&srtf) <= total_turnaround(&rr));
    }

    #[test]
    fn fcfs_response_equals_waiting(jobs in jobs_strategy()) {
        let report = simulate(jobs, SchedConfig::fcfs()).unwrap();
        for record in &report.processes {
            prop_assert_eq!(record.response_time, record.waiting_time);
        }
        prop_assert_eq!(report.summary.avg_response, report.summary.avg_wait);
    }
}

#[test]
fn generated_workload_runs_under_every_policy() {
    let jobs = bernoulli_jobs(300, 0.3, 0.3, 2, 6, 11);
    for config in [
        SchedConfig::fcfs(),
        SchedConfig::round_robin(3).unwrap(),
        SchedConfig::srtf(),
    ] {
        let report = simulate(jobs.clone(), config).unwrap();
        assert_eq!(report.processes.len(), jobs.len());
        assert!(report.summary.cpu_usage_percent.unwrap() <= 100.0);
    }
}

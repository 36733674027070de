use rand::prelude::*;

use super::Job;
use crate::core::Ticks;

/// Bernoulli arrival process: at each tick in `0..ticks` a job arrives with
/// probability `p_arrival`, and is short with probability `p_short`.
///
/// The same seed always yields the same workload.
pub fn bernoulli_jobs(
    ticks: Ticks,
    p_arrival: f64,
    p_short: f64,
    short_ticks: Ticks,
    long_ticks: Ticks,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let run_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(Job::new(
                jobs.len() as u64 + 1,
                t as i64,
                run_time as i64,
            ));
        }
    }

    jobs
}

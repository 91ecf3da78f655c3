use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::job::ProcessDescriptor;
use crate::core::{Priority, Ticks};

/// The built-in demonstration workload.
pub fn reference_workload() -> Vec<ProcessDescriptor> {
    vec![
        ProcessDescriptor::new("P1", 0, 3, 1),
        ProcessDescriptor::new("P2", 1, 5, 10),
        ProcessDescriptor::new("P3", 1, 3, 100),
        ProcessDescriptor::new("P4", 4, 5, 20),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkloadParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_ticks: Ticks,
    pub long_ticks: Ticks,
    pub max_priority: Priority,
}

impl Default for WorkloadParams {
    fn default() -> Self {
        Self {
            ticks: 20,
            p_arrival: 0.3,
            p_short: 0.3,
            short_ticks: 2,
            long_ticks: 6,
            max_priority: 10,
        }
    }
}

/// Bernoulli arrivals over `params.ticks` with a short/long burst mix.
///
/// Arrivals are pulled forward so that no process arrives after the CPU
/// would have run dry, so every generated workload runs without an idle gap.
pub fn random_workload(params: &WorkloadParams, seed: u64) -> Vec<ProcessDescriptor> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut processes = Vec::new();
    let mut backlog: Ticks = 0;

    for t in 0..params.ticks {
        if rng.random::<f64>() >= params.p_arrival {
            continue;
        }

        let burst = if rng.random::<f64>() < params.p_short {
            params.short_ticks
        } else {
            params.long_ticks
        };
        let required_time = burst.max(1);
        let priority = rng.random_range(0..=params.max_priority.max(0));

        processes.push(ProcessDescriptor::new(
            format!("P{}", processes.len() + 1),
            t.min(backlog),
            required_time,
            priority,
        ));
        backlog += required_time;
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Engine;
    use crate::scheduler::SjfPolicy;

    #[test]
    fn same_seed_same_workload() {
        let params = WorkloadParams::default();
        assert_eq!(random_workload(&params, 7), random_workload(&params, 7));
    }

    #[test]
    fn arrivals_never_leave_the_cpu_idle() {
        let params = WorkloadParams {
            ticks: 200,
            p_arrival: 0.05,
            ..WorkloadParams::default()
        };

        for seed in 0..20 {
            let workload = random_workload(&params, seed);
            let mut backlog = 0;
            for p in &workload {
                assert!(p.arrival_time <= backlog, "{} arrives after idle gap", p.id);
                backlog += p.required_time;
            }

            let mut engine = Engine::new(&workload, SjfPolicy::default()).unwrap();
            assert!(engine.run().is_ok());
        }
    }
}

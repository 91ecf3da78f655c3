use average::{Estimate, Mean};
use serde::Serialize;

use crate::core::{Priority, Snapshot, Ticks};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessMetrics {
    pub id: String,
    pub arrival_time: Ticks,
    pub required_time: Ticks,
    pub priority: Priority,
    pub start_time: Ticks,
    pub finish_time: Ticks,
    pub turnaround: Ticks,
    pub weighted_turnaround: f64,
    pub waiting: Ticks,
    pub response: Ticks,
}

/// Per-process timings and run-wide averages of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub processes: Vec<ProcessMetrics>,
    pub makespan: Ticks,
    pub context_switches: usize,
    pub average_turnaround: f64,
    pub average_weighted_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
}

impl RunSummary {
    /// Summarize a complete history. Returns `None` unless the last snapshot
    /// is terminal.
    pub fn from_history(history: &[Snapshot]) -> Option<Self> {
        let last = history.last().filter(|s| s.is_terminal() && s.all_finished())?;

        let processes: Vec<ProcessMetrics> = last
            .processes
            .iter()
            .filter_map(|p| {
                Some(ProcessMetrics {
                    id: p.id.clone(),
                    arrival_time: p.arrival_time,
                    required_time: p.required_time,
                    priority: p.priority,
                    start_time: p.start_time?,
                    finish_time: p.finish_time?,
                    turnaround: p.turnaround()?,
                    weighted_turnaround: p.weighted_turnaround()?,
                    waiting: p.waiting_time()?,
                    response: p.response_time()?,
                })
            })
            .collect();

        let allocations: Vec<&str> = history
            .iter()
            .filter_map(|s| s.next_allocation.as_deref())
            .collect();
        let context_switches = allocations.windows(2).filter(|w| w[0] != w[1]).count();

        Some(Self {
            makespan: last.timestamp,
            context_switches,
            average_turnaround: avg(processes.iter().map(|m| m.turnaround as f64)),
            average_weighted_turnaround: avg(processes.iter().map(|m| m.weighted_turnaround)),
            average_waiting: avg(processes.iter().map(|m| m.waiting as f64)),
            average_response: avg(processes.iter().map(|m| m.response as f64)),
            processes,
        })
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<Mean>().estimate()
}

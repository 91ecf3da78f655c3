use tracing::trace;

use super::state::{ProcessRecord, Ticks};

/// Checks the per-step engine invariants in debug builds and counts steps.
#[derive(Debug)]
pub struct Observer {
    step: u64,
    last_time: Ticks,
    finish_times: Vec<Option<Ticks>>,
}

impl Observer {
    pub fn new(processes: &[ProcessRecord]) -> Self {
        Self {
            step: 0,
            last_time: 0,
            finish_times: processes.iter().map(|p| p.finish_time).collect(),
        }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, now: Ticks, processes: &[ProcessRecord]) {
        self.step += 1;

        debug_assert!(
            now >= self.last_time,
            "time went backwards: {} -> {now}",
            self.last_time
        );
        self.last_time = now;

        debug_assert_eq!(
            processes.len(),
            self.finish_times.len(),
            "process table changed size during the run"
        );

        for (process, seen) in processes.iter().zip(self.finish_times.iter_mut()) {
            debug_assert!(
                process.processed_time <= process.required_time,
                "process {} served {} of {} ticks",
                process.id,
                process.processed_time,
                process.required_time
            );
            debug_assert_eq!(
                process.finish_time.is_some(),
                process.is_finished(),
                "process {} finish time out of sync with progress",
                process.id
            );
            if let Some(previous) = *seen {
                debug_assert_eq!(
                    process.finish_time,
                    Some(previous),
                    "finish time of process {} changed",
                    process.id
                );
            }
            *seen = process.finish_time;
        }

        trace!(step = self.step, time = now, "observed engine state");
    }
}

use serde::Serialize;

// Index into the engine's process Vec
pub type ProcessSlot = usize;
pub type Ticks = u64;
// Signed so that a misbehaving policy can be caught asking for negative time
pub type Quantum = i64;
pub type Priority = i64;

/// A schedulable unit: fixed descriptor plus the progress made so far.
///
/// Records are only mutated through [`ProcessRecord::allocate`], which the
/// engine calls once per step. Cloning yields a fully independent copy, which
/// is what snapshots rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    pub id: String,
    pub arrival_time: Ticks,
    pub required_time: Ticks,
    pub priority: Priority,
    pub processed_time: Ticks,
    pub start_time: Option<Ticks>,
    pub finish_time: Option<Ticks>,
}

impl ProcessRecord {
    pub fn new(
        id: impl Into<String>,
        arrival_time: Ticks,
        required_time: Ticks,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            required_time,
            priority,
            processed_time: 0,
            start_time: None,
            finish_time: None,
        }
    }

    /// Fraction of the burst already served. Only exceeds 1.0 if a record was
    /// built by hand with `processed_time > required_time`.
    pub fn progress(&self) -> f64 {
        if self.required_time == 0 {
            return 1.0;
        }
        self.processed_time as f64 / self.required_time as f64
    }

    pub fn remaining_time(&self) -> Ticks {
        self.required_time.saturating_sub(self.processed_time)
    }

    pub fn is_arrived(&self, now: Ticks) -> bool {
        now >= self.arrival_time
    }

    pub fn is_finished(&self) -> bool {
        self.processed_time >= self.required_time
    }

    pub fn has_started(&self) -> bool {
        self.processed_time > 0
    }

    /// Runnable means arrived and still owing CPU time.
    pub fn is_runnable(&self, now: Ticks) -> bool {
        self.is_arrived(now) && !self.is_finished()
    }

    /// Serve `ticks` of CPU starting at `dispatched_at`.
    ///
    /// Service is clamped at `required_time`; the amount actually served is
    /// returned. `finish_time` is set the first time the burst completes and
    /// never touched again.
    pub fn allocate(&mut self, ticks: Ticks, dispatched_at: Ticks) -> Ticks {
        let served = ticks.min(self.remaining_time());
        if served == 0 {
            return 0;
        }

        if self.start_time.is_none() {
            self.start_time = Some(dispatched_at);
        }

        self.processed_time += served;
        if self.is_finished() && self.finish_time.is_none() {
            self.finish_time = Some(dispatched_at + served);
        }

        served
    }

    /// `finish - arrival`, once finished.
    pub fn turnaround(&self) -> Option<Ticks> {
        self.finish_time
            .map(|finish| finish.saturating_sub(self.arrival_time))
    }

    pub fn weighted_turnaround(&self) -> Option<f64> {
        self.turnaround()
            .map(|turnaround| turnaround as f64 / self.required_time as f64)
    }

    pub fn waiting_time(&self) -> Option<Ticks> {
        self.turnaround()
            .map(|turnaround| turnaround.saturating_sub(self.required_time))
    }

    pub fn response_time(&self) -> Option<Ticks> {
        self.start_time
            .map(|start| start.saturating_sub(self.arrival_time))
    }
}

impl std::fmt::Display for ProcessRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (processed {}/{}, priority {})",
            self.id, self.processed_time, self.required_time, self.priority
        )
    }
}

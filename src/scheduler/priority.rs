use super::{Policy, SliceMode, ranked};
use crate::core::{
    PolicyView, Quantum, SimResult, Ticks,
    state::{ProcessRecord, ProcessSlot},
};

/// Highest `priority` first, earlier list position on ties.
#[derive(Debug, Clone, Default)]
pub struct PriorityPolicy {
    slice: SliceMode,
    preemptive: bool,
}

impl PriorityPolicy {
    pub fn new(slice: SliceMode, preemptive: bool) -> Self {
        Self { slice, preemptive }
    }

    pub fn with_time_slice(slice: Ticks) -> Self {
        Self::new(SliceMode::Fixed(slice), false)
    }

    pub fn preemptive(mut self, preemptive: bool) -> Self {
        self.preemptive = preemptive;
        self
    }
}

impl Policy for PriorityPolicy {
    fn name(&self) -> &'static str {
        "priority"
    }

    fn check_config(&self) -> SimResult<()> {
        self.slice.validate()
    }

    fn select_next(&mut self, processes: &[ProcessRecord], now: Ticks) -> Option<ProcessSlot> {
        ranked::select(processes, now, self.preemptive, |p| p.priority)
    }

    fn quantum_for(&mut self, process: &ProcessRecord) -> Quantum {
        self.slice.quantum_for(process)
    }

    fn build_view(&self, processes: &[ProcessRecord], now: Ticks) -> Option<PolicyView> {
        Some(ranked::display_order(processes, now, |p| p.priority))
    }
}

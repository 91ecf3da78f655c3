use super::{Policy, SliceMode, ranked};
use crate::core::{
    PolicyView, Quantum, SimResult, Ticks,
    state::{ProcessRecord, ProcessSlot},
};

#[derive(PartialEq, Eq, Debug, Copy, Clone)]
struct Burst(Ticks);

// KeyedPriorityQueue is a max-heap, so shorter bursts must compare greater
impl PartialOrd for Burst {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Burst {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.0.cmp(&self.0)
    }
}

fn burst(process: &ProcessRecord) -> Burst {
    Burst(process.required_time)
}

/// Shortest total burst first, earlier list position on ties.
#[derive(Debug, Clone, Default)]
pub struct SjfPolicy {
    slice: SliceMode,
    preemptive: bool,
}

impl SjfPolicy {
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

impl Policy for SjfPolicy {
    fn name(&self) -> &'static str {
        "shortest_job"
    }

    fn check_config(&self) -> SimResult<()> {
        self.slice.validate()
    }

    fn select_next(&mut self, processes: &[ProcessRecord], now: Ticks) -> Option<ProcessSlot> {
        ranked::select(processes, now, self.preemptive, burst)
    }

    fn quantum_for(&mut self, process: &ProcessRecord) -> Quantum {
        self.slice.quantum_for(process)
    }

    fn build_view(&self, processes: &[ProcessRecord], now: Ticks) -> Option<PolicyView> {
        Some(ranked::display_order(processes, now, burst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn picks_shortest_burst_first_in_list_on_ties() {
        let processes = vec![
            ProcessRecord::new("P1", 0, 5, 0),
            ProcessRecord::new("P2", 0, 2, 0),
            ProcessRecord::new("P3", 0, 2, 0),
        ];
        assert_eq!(SjfPolicy::default().select_next(&processes, 0), Some(1));
    }

    #[test]
    fn started_job_keeps_cpu_over_shorter_arrival() {
        let mut processes = vec![
            ProcessRecord::new("long", 0, 5, 0),
            ProcessRecord::new("short", 1, 1, 0),
        ];
        processes[0].allocate(1, 0);

        assert_eq!(SjfPolicy::default().select_next(&processes, 1), Some(0));
        assert_eq!(
            SjfPolicy::default()
                .preemptive(true)
                .select_next(&processes, 1),
            Some(1)
        );
    }

    #[test]
    fn view_orders_by_ascending_burst() {
        let mut processes = vec![
            ProcessRecord::new("done", 0, 1, 0),
            ProcessRecord::new("long", 0, 9, 0),
            ProcessRecord::new("short", 0, 3, 0),
        ];
        processes[0].allocate(1, 0);

        let view = SjfPolicy::default().build_view(&processes, 1);
        assert_eq!(
            view,
            Some(PolicyView::Ranked {
                order: vec!["short".into(), "long".into(), "done".into()],
            })
        );
    }
}

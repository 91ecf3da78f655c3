use std::cmp::Reverse;

use keyed_priority_queue::KeyedPriorityQueue;

use crate::core::{
    PolicyView, Ticks,
    state::{ProcessRecord, ProcessSlot},
};

// Declaration order matters: the max-heap pops Ready first and Finished last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Placement {
    Finished,
    NotArrived,
    Ready,
}

impl Placement {
    fn of(process: &ProcessRecord, now: Ticks) -> Self {
        if process.is_finished() {
            Self::Finished
        } else if !process.is_arrived(now) {
            Self::NotArrived
        } else {
            Self::Ready
        }
    }
}

/// Shared selection for the ranked policies.
///
/// Without preemption, the first runnable process that has already been served
/// keeps the CPU. Otherwise the highest `rank` wins, earlier slots first on
/// ties.
pub(super) fn select<R, F>(
    processes: &[ProcessRecord],
    now: Ticks,
    preemptive: bool,
    rank: F,
) -> Option<ProcessSlot>
where
    R: Ord,
    F: Fn(&ProcessRecord) -> R,
{
    let runnable = || {
        processes
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.is_runnable(now))
    };

    if !preemptive {
        if let Some((slot, _)) = runnable().find(|(_, p)| p.has_started()) {
            return Some(slot);
        }
    }

    let mut ready = KeyedPriorityQueue::new();
    for (slot, process) in runnable() {
        ready.push(slot, (rank(process), Reverse(slot)));
    }

    ready.peek().map(|(slot, _)| *slot)
}

/// Every process in display order: ready ones by rank, then those that have
/// not arrived, then finished ones.
pub(super) fn display_order<R, F>(processes: &[ProcessRecord], now: Ticks, rank: F) -> PolicyView
where
    R: Ord,
    F: Fn(&ProcessRecord) -> R,
{
    let mut queue = KeyedPriorityQueue::new();
    for (slot, process) in processes.iter().enumerate() {
        queue.push(
            slot,
            (Placement::of(process, now), rank(process), Reverse(slot)),
        );
    }

    let mut order = Vec::with_capacity(queue.len());
    while let Some((slot, _)) = queue.pop() {
        order.push(processes[slot].id.clone());
    }

    PolicyView::Ranked { order }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> Vec<ProcessRecord> {
        vec![
            ProcessRecord::new("A", 0, 3, 1),
            ProcessRecord::new("B", 0, 3, 7),
            ProcessRecord::new("C", 0, 3, 7),
            ProcessRecord::new("D", 5, 3, 9),
        ]
    }

    #[test]
    fn ties_resolve_to_earlier_slot() {
        assert_eq!(select(&table(), 0, true, |p| p.priority), Some(1));
    }

    #[test]
    fn unarrived_processes_are_ignored() {
        let mut processes = table();
        processes.truncate(1);
        processes.push(ProcessRecord::new("late", 3, 1, 100));
        assert_eq!(select(&processes, 0, false, |p| p.priority), Some(0));
    }

    #[test]
    fn started_process_keeps_cpu_without_preemption() {
        let mut processes = table();
        processes[0].allocate(1, 0);

        assert_eq!(select(&processes, 1, false, |p| p.priority), Some(0));
        assert_eq!(select(&processes, 1, true, |p| p.priority), Some(1));
    }

    #[test]
    fn nothing_runnable() {
        let mut processes = table();
        for p in processes.iter_mut() {
            p.allocate(3, 0);
        }
        assert_eq!(select(&processes, 10, false, |p| p.priority), None);
        assert_eq!(select(&[], 0, false, |p: &ProcessRecord| p.priority), None);
    }

    #[test]
    fn display_order_places_pending_and_finished_last() {
        let mut processes = table();
        processes[2].allocate(3, 0);

        let view = display_order(&processes, 3, |p| p.priority);
        assert_eq!(
            view,
            PolicyView::Ranked {
                order: vec!["B".into(), "A".into(), "D".into(), "C".into()],
            }
        );
    }
}

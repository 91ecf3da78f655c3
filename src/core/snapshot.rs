use super::state::{ProcessRecord, Ticks};
use serde::Serialize;

/// Policy-defined auxiliary data attached to a snapshot for display.
///
/// Processes are referenced by id; the full records live in
/// [`Snapshot::processes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyView {
    /// Every process in display order, most urgent first.
    Ranked { order: Vec<String> },
    /// Contents of each feedback level, highest level first.
    FeedbackQueues {
        levels: Vec<Vec<String>>,
        active_level: Option<usize>,
    },
}

/// Engine state captured at one instant.
///
/// A snapshot owns its copy of every process record, so later steps can never
/// alter it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub timestamp: Ticks,
    pub processes: Vec<ProcessRecord>,
    pub next_allocation: Option<String>,
    pub next_quantum: Option<Ticks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_view: Option<PolicyView>,
}

impl Snapshot {
    pub fn capture(
        timestamp: Ticks,
        processes: &[ProcessRecord],
        allocation: Option<(&ProcessRecord, Ticks)>,
        policy_view: Option<PolicyView>,
    ) -> Self {
        let (next_allocation, next_quantum) = match allocation {
            Some((process, quantum)) => (Some(process.id.clone()), Some(quantum)),
            None => (None, None),
        };

        Self {
            timestamp,
            processes: processes.to_vec(),
            next_allocation,
            next_quantum,
            policy_view,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_allocation.is_none()
    }

    pub fn process(&self, id: &str) -> Option<&ProcessRecord> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// The record chosen for the step that produced this snapshot.
    pub fn allocated(&self) -> Option<&ProcessRecord> {
        self.next_allocation
            .as_deref()
            .and_then(|id| self.process(id))
    }

    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(ProcessRecord::is_finished)
    }
}

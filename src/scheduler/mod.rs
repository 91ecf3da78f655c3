pub mod any;
pub mod mfq;
pub mod priority;
mod ranked;
pub mod sjf;

use serde::{Deserialize, Serialize};

use crate::core::{
    PolicyView, Quantum, SimError, SimResult, Ticks,
    state::{ProcessRecord, ProcessSlot},
};
pub use any::AnyPolicy;
pub use mfq::{MfqConfig, MfqPolicy};
pub use priority::PriorityPolicy;
pub use sjf::SjfPolicy;

pub const DEFAULT_TIME_SLICE: Ticks = 1;

/// How long a ranked policy lets the chosen process run per allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SliceMode {
    /// A fixed number of ticks, so the run can be replayed step by step.
    Fixed(Ticks),
    /// Whatever the process still needs; one allocation per choice.
    RemainingBurst,
}

impl Default for SliceMode {
    fn default() -> Self {
        Self::Fixed(DEFAULT_TIME_SLICE)
    }
}

impl SliceMode {
    pub fn validate(&self) -> SimResult<()> {
        match self {
            Self::Fixed(0) => Err(SimError::InvalidPolicyConfiguration(
                "fixed time slice must be at least one tick".into(),
            )),
            _ => Ok(()),
        }
    }

    pub fn quantum_for(&self, process: &ProcessRecord) -> Quantum {
        let ticks = match self {
            Self::Fixed(slice) => *slice,
            Self::RemainingBurst => process.remaining_time(),
        };
        Quantum::try_from(ticks).unwrap_or(Quantum::MAX)
    }
}

/// A scheduling strategy driven by the [`Engine`](crate::core::Engine).
///
/// The engine asks [`select_next`](Policy::select_next) for a process, then
/// [`quantum_for`](Policy::quantum_for) for the allocation length, once per
/// step. Stateless policies must answer purely from the given state.
pub trait Policy {
    fn name(&self) -> &'static str;

    /// Checked before every step; unconfigured policies fail here.
    fn check_config(&self) -> SimResult<()> {
        Ok(())
    }

    /// Pick an arrived, unfinished process, or `None` if there is none.
    fn select_next(&mut self, processes: &[ProcessRecord], now: Ticks) -> Option<ProcessSlot>;

    fn quantum_for(&mut self, process: &ProcessRecord) -> Quantum;

    fn build_view(&self, _processes: &[ProcessRecord], _now: Ticks) -> Option<PolicyView> {
        None
    }

    /// Whether the policy may keep a finished process on the CPU until its
    /// slice ends. Those ticks advance time without serving anyone.
    fn allows_overshoot(&self) -> bool {
        false
    }
}

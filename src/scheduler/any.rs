use super::{MfqPolicy, Policy, PriorityPolicy, SjfPolicy};
use crate::core::{
    PolicyView, Quantum, SimResult, Ticks,
    state::{ProcessRecord, ProcessSlot},
};

/// One of the built-in policies, chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyPolicy {
    Priority(PriorityPolicy),
    ShortestJob(SjfPolicy),
    Mfq(MfqPolicy),
}

impl AnyPolicy {
    fn inner(&self) -> &dyn Policy {
        match self {
            Self::Priority(policy) => policy,
            Self::ShortestJob(policy) => policy,
            Self::Mfq(policy) => policy,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Policy {
        match self {
            Self::Priority(policy) => policy,
            Self::ShortestJob(policy) => policy,
            Self::Mfq(policy) => policy,
        }
    }
}

impl Policy for AnyPolicy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn check_config(&self) -> SimResult<()> {
        self.inner().check_config()
    }

    fn select_next(&mut self, processes: &[ProcessRecord], now: Ticks) -> Option<ProcessSlot> {
        self.inner_mut().select_next(processes, now)
    }

    fn quantum_for(&mut self, process: &ProcessRecord) -> Quantum {
        self.inner_mut().quantum_for(process)
    }

    fn build_view(&self, processes: &[ProcessRecord], now: Ticks) -> Option<PolicyView> {
        self.inner().build_view(processes, now)
    }

    fn allows_overshoot(&self) -> bool {
        self.inner().allows_overshoot()
    }
}

impl From<PriorityPolicy> for AnyPolicy {
    fn from(policy: PriorityPolicy) -> Self {
        Self::Priority(policy)
    }
}

impl From<SjfPolicy> for AnyPolicy {
    fn from(policy: SjfPolicy) -> Self {
        Self::ShortestJob(policy)
    }
}

impl From<MfqPolicy> for AnyPolicy {
    fn from(policy: MfqPolicy) -> Self {
        Self::Mfq(policy)
    }
}

use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::Policy;
use crate::core::{
    PolicyView, Quantum, SimError, SimResult, Ticks,
    state::{ProcessRecord, ProcessSlot},
};

fn default_switch_immediately() -> bool {
    true
}

/// Shape of the feedback queue. Index 0 is the most urgent level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MfqConfig {
    pub level_count: usize,
    pub time_slices: Vec<Ticks>,
    #[serde(default = "default_switch_immediately")]
    pub switch_immediately_after_finish: bool,
}

impl MfqConfig {
    pub fn new(time_slices: Vec<Ticks>) -> Self {
        Self {
            level_count: time_slices.len(),
            time_slices,
            switch_immediately_after_finish: true,
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.level_count == 0 {
            return Err(SimError::InvalidPolicyConfiguration(
                "feedback queue needs at least one level".into(),
            ));
        }
        if self.time_slices.len() != self.level_count {
            return Err(SimError::InvalidPolicyConfiguration(format!(
                "{} time slices given for {} levels",
                self.time_slices.len(),
                self.level_count
            )));
        }
        if let Some(level) = self.time_slices.iter().position(|&slice| slice == 0) {
            return Err(SimError::InvalidPolicyConfiguration(format!(
                "time slice of level {level} must be at least one tick"
            )));
        }
        Ok(())
    }
}

/// Multilevel feedback queue.
///
/// New arrivals join the tail of level 0. A process that uses up its level's
/// slice without finishing is demoted one level; at the lowest level it
/// round-robins. The engine is always granted a single tick at a time, and
/// the policy counts down the slice itself.
#[derive(Debug, Clone, Default)]
pub struct MfqPolicy {
    config: Option<MfqConfig>,
    levels: Vec<VecDeque<ProcessSlot>>,
    admitted: FxHashSet<ProcessSlot>,
    current_level: Option<usize>,
    remaining_in_slice: Ticks,
}

impl MfqPolicy {
    /// An unconfigured policy; [`configure`](Self::configure) must be called
    /// before the engine steps.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: MfqConfig) -> SimResult<Self> {
        let mut policy = Self::new();
        policy.configure(config)?;
        Ok(policy)
    }

    /// Install a configuration, discarding any queue state.
    pub fn configure(&mut self, config: MfqConfig) -> SimResult<()> {
        config.validate()?;

        self.levels = vec![VecDeque::new(); config.level_count];
        self.admitted.clear();
        self.current_level = None;
        self.remaining_in_slice = 0;
        self.config = Some(config);
        Ok(())
    }

    pub fn config(&self) -> Option<&MfqConfig> {
        self.config.as_ref()
    }

    pub fn current_level(&self) -> Option<usize> {
        self.current_level
    }

    pub fn remaining_in_slice(&self) -> Ticks {
        self.remaining_in_slice
    }

    fn level(&self, level: usize) -> &VecDeque<ProcessSlot> {
        &self.levels[level]
    }

    fn level_mut(&mut self, level: usize) -> &mut VecDeque<ProcessSlot> {
        &mut self.levels[level]
    }

    fn time_slice(&self, level: usize) -> Ticks {
        self.config
            .as_ref()
            .map_or(1, |config| config.time_slices[level])
    }

    fn admit_arrivals(&mut self, processes: &[ProcessRecord], now: Ticks) {
        for (slot, process) in processes.iter().enumerate() {
            if process.is_arrived(now) && !self.admitted.contains(&slot) {
                self.admitted.insert(slot);
                if !process.is_finished() {
                    self.level_mut(0).push_back(slot);
                }
            }
        }
    }

    // Move the head of `level` once its slice is over
    fn retire_head(&mut self, level: usize, processes: &[ProcessRecord]) {
        let Some(slot) = self.level_mut(level).pop_front() else {
            return;
        };

        if processes.get(slot).is_none_or(ProcessRecord::is_finished) {
            return;
        }

        let target = if level + 1 < self.levels.len() {
            level + 1
        } else {
            level
        };
        self.level_mut(target).push_back(slot);
    }
}

impl Policy for MfqPolicy {
    fn name(&self) -> &'static str {
        "mfq"
    }

    fn check_config(&self) -> SimResult<()> {
        match &self.config {
            Some(config) => config.validate(),
            None => Err(SimError::InvalidPolicyConfiguration(
                "multilevel feedback queue used before configuration".into(),
            )),
        }
    }

    fn select_next(&mut self, processes: &[ProcessRecord], now: Ticks) -> Option<ProcessSlot> {
        let switch_on_finish = self.config.as_ref()?.switch_immediately_after_finish;

        self.admit_arrivals(processes, now);

        // Slice in progress: stay on the active process
        if self.remaining_in_slice > 0 {
            let active = self
                .current_level
                .and_then(|level| self.level(level).front().copied());
            match active {
                Some(slot) => {
                    let finished = processes.get(slot).is_none_or(ProcessRecord::is_finished);
                    if finished && switch_on_finish {
                        self.remaining_in_slice = 0;
                    } else {
                        return Some(slot);
                    }
                }
                None => {
                    self.remaining_in_slice = 0;
                    self.current_level = None;
                }
            }
        }

        if self.remaining_in_slice == 0 {
            if let Some(level) = self.current_level.take() {
                self.retire_head(level, processes);
            }
        }

        let (level, slot) = (0..self.levels.len())
            .find_map(|level| self.level(level).front().map(|&slot| (level, slot)))?;
        self.current_level = Some(level);
        self.remaining_in_slice = self.time_slice(level);
        Some(slot)
    }

    fn quantum_for(&mut self, _process: &ProcessRecord) -> Quantum {
        self.remaining_in_slice = self.remaining_in_slice.saturating_sub(1);
        1
    }

    fn build_view(&self, processes: &[ProcessRecord], _now: Ticks) -> Option<PolicyView> {
        self.config.as_ref()?;

        let levels: Vec<Vec<String>> = self
            .levels
            .iter()
            .map(|queue| {
                queue
                    .iter()
                    .filter_map(|&slot| processes.get(slot))
                    .filter(|p| !p.is_finished())
                    .map(|p| p.id.clone())
                    .collect::<Vec<_>>()
            })
            .collect();

        Some(PolicyView::FeedbackQueues {
            levels,
            active_level: self.current_level,
        })
    }

    fn allows_overshoot(&self) -> bool {
        self.config
            .as_ref()
            .is_some_and(|config| !config.switch_immediately_after_finish)
    }
}

//! Scenario files: a policy choice plus the process list, as JSON.

use serde::{Deserialize, Serialize};

use crate::{
    core::{Engine, SimResult, Snapshot},
    scheduler::{AnyPolicy, MfqConfig, MfqPolicy, PriorityPolicy, SjfPolicy, SliceMode},
    sim::ProcessDescriptor,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PolicyConfig {
    Priority {
        #[serde(default)]
        slice: SliceMode,
        #[serde(default)]
        preemptive: bool,
    },
    ShortestJob {
        #[serde(default)]
        slice: SliceMode,
        #[serde(default)]
        preemptive: bool,
    },
    Mfq(MfqConfig),
}

impl PolicyConfig {
    pub fn build(&self) -> SimResult<AnyPolicy> {
        let policy: AnyPolicy = match self {
            Self::Priority { slice, preemptive } => {
                slice.validate()?;
                PriorityPolicy::new(*slice, *preemptive).into()
            }
            Self::ShortestJob { slice, preemptive } => {
                slice.validate()?;
                SjfPolicy::new(*slice, *preemptive).into()
            }
            Self::Mfq(config) => MfqPolicy::with_config(config.clone())?.into(),
        };
        Ok(policy)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub policy: PolicyConfig,
    pub processes: Vec<ProcessDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<usize>,
}

impl Scenario {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn engine(&self) -> SimResult<Engine<AnyPolicy>> {
        Engine::new(&self.processes, self.policy.build()?)
    }

    /// Run to completion, honoring `max_steps` when set.
    pub fn run(&self) -> SimResult<Vec<Snapshot>> {
        let mut engine = self.engine()?;
        match self.max_steps {
            Some(limit) => engine.run_bounded(limit)?,
            None => engine.run()?,
        };
        Ok(engine.into_history())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PolicyView, SimError};
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_mfq_scenario() {
        let scenario = Scenario::from_json(
            r#"{
                "policy": { "policy": "mfq", "level_count": 2, "time_slices": [2, 4] },
                "processes": [{ "id": "P1", "arrival_time": 0, "required_time": 5 }]
            }"#,
        )
        .unwrap();

        assert_eq!(
            scenario.policy,
            PolicyConfig::Mfq(MfqConfig::new(vec![2, 4]))
        );

        let history = scenario.run().unwrap();
        assert_eq!(history.len(), 6);
        assert!(matches!(
            history[0].policy_view,
            Some(PolicyView::FeedbackQueues { .. })
        ));
    }

    #[test]
    fn ranked_policy_defaults() {
        let scenario = Scenario::from_json(
            r#"{ "policy": { "policy": "shortest_job" }, "processes": [] }"#,
        )
        .unwrap();
        assert_eq!(
            scenario.policy,
            PolicyConfig::ShortestJob {
                slice: SliceMode::Fixed(1),
                preemptive: false,
            }
        );

        let history = scenario.run().unwrap();
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn explicit_slice_mode() {
        let scenario = Scenario::from_json(
            r#"{
                "policy": { "policy": "priority", "slice": "remaining_burst" },
                "processes": [{ "id": "P1", "arrival_time": 0, "required_time": 4 }]
            }"#,
        )
        .unwrap();
        let history = scenario.run().unwrap();
        assert_eq!(history[0].next_quantum, Some(4));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn bad_policy_config_fails_to_build() {
        let config = PolicyConfig::Priority {
            slice: SliceMode::Fixed(0),
            preemptive: false,
        };
        assert!(matches!(
            config.build(),
            Err(SimError::InvalidPolicyConfiguration(_))
        ));
    }

    #[test]
    fn step_limit_is_honored() {
        let scenario = Scenario {
            policy: PolicyConfig::Priority {
                slice: SliceMode::default(),
                preemptive: false,
            },
            processes: vec![ProcessDescriptor::new("P1", 0, 10, 0)],
            max_steps: Some(4),
        };
        assert_eq!(scenario.run(), Err(SimError::StepLimitExceeded(4)));
    }
}

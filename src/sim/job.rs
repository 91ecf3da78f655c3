use serde::{Deserialize, Serialize};

use crate::core::{Priority, ProcessRecord, SimError, SimResult, Ticks};

/// Caller-supplied description of one process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub id: String,
    pub arrival_time: Ticks,
    pub required_time: Ticks,
    #[serde(default)]
    pub priority: Priority,
}

impl ProcessDescriptor {
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
        }
    }

    pub fn validate(&self) -> SimResult<()> {
        if self.id.is_empty() {
            return Err(SimError::InvalidProcess {
                id: self.id.clone(),
                reason: "id must not be empty".into(),
            });
        }
        if self.required_time == 0 {
            return Err(SimError::InvalidProcess {
                id: self.id.clone(),
                reason: "required time must be at least one tick".into(),
            });
        }
        Ok(())
    }

    pub fn instantiate(&self) -> ProcessRecord {
        ProcessRecord::new(
            self.id.clone(),
            self.arrival_time,
            self.required_time,
            self.priority,
        )
    }
}

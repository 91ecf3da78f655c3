pub mod config;
pub mod core;
pub mod scheduler;
pub mod sim;

pub use crate::core::{Engine, PolicyView, ProcessRecord, SimError, SimResult, Snapshot};
pub use config::{PolicyConfig, Scenario};
pub use scheduler::Policy;
pub use sim::{ProcessDescriptor, RunSummary};

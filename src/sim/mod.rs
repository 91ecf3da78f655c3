pub mod job;
pub mod metrics;
pub mod workload;

pub use job::ProcessDescriptor;
pub use metrics::{ProcessMetrics, RunSummary};
pub use workload::{WorkloadParams, random_workload, reference_workload};

pub mod driver;
pub mod error;
pub mod observer;
pub mod snapshot;
pub mod state;

pub use driver::Engine;
pub use error::{SimError, SimResult};
pub use snapshot::{PolicyView, Snapshot};
pub use state::{Priority, ProcessRecord, ProcessSlot, Quantum, Ticks};

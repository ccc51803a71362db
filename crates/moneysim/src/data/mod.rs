pub mod scenario;
pub mod storage;

pub use scenario::{BASELINE_ID, Scenario, ScenarioBook, ScenarioError};
pub use storage::{DataDirectory, StorageError};

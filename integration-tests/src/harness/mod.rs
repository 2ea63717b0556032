mod fixtures;
pub mod tracing;

pub use fixtures::{Workspace, fixture};
pub use tracing::{CapturedEvent, capture_events};

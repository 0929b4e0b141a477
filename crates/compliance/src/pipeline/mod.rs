pub mod plugin;
pub mod queue;
pub mod result_log;
pub mod system;

pub use plugin::{CompliancePlugin, ComplianceSet};
pub use queue::*;
pub use result_log::{ComplianceResultLog, LoggedResult};
pub use system::validate_queued_measurements;

#[cfg(test)]
mod tests;

//! Injected id and timestamp generation
//!
//! Record construction happens in several pipeline stages; routing every id
//! and timestamp through one injected capability keeps runs reproducible
//! under test instead of scattering `Uuid::new_v4()` and `Utc::now()` calls
//! through the orchestrator.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of generated ids and creation timestamps for persisted records
pub trait RecordStamper: Send + Sync {
    /// Generate a fresh record id
    fn new_id(&self) -> Uuid;

    /// Current timestamp for `created_at` fields
    fn now(&self) -> DateTime<Utc>;
}

/// Default stamper: random v4 uuids and the system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemStamper;

impl RecordStamper for SystemStamper {
    fn new_id(&self) -> Uuid {
        Uuid::new_v4()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_stamper_issues_unique_ids() {
        let stamper = SystemStamper;
        assert_ne!(stamper.new_id(), stamper.new_id());
    }
}

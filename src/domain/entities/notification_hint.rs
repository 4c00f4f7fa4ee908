use serde::{Deserialize, Serialize};
use time::{macros::format_description, OffsetDateTime};

use crate::domain::errors::{DomainError, DomainResult};

/// Signal that a block changed and has subscribers who should hear about it.
///
/// Only the data contract lives here; nothing schedules or stores hints yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationHint {
    /// Kind of block that changed, e.g. `board` or `card`.
    pub block_type: String,
    pub block_id: String,
    pub modified_by_id: String,
    /// Milliseconds since the Unix epoch.
    pub create_at: i64,
    /// When subscribers should be notified, in epoch milliseconds.
    pub notify_at: i64,
}

/// Log-friendly rendering of a hint with readable timestamps.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationHintLog {
    pub block_type: String,
    pub block_id: String,
    pub modified_by_id: String,
    pub create_at: String,
    pub notify_at: String,
}

impl NotificationHint {
    pub fn validate(&self) -> DomainResult<()> {
        if self.block_id.is_empty() {
            return Err(DomainError::validation("missing block id"));
        }
        if self.block_type.is_empty() {
            return Err(DomainError::validation("missing block type"));
        }
        if self.modified_by_id.is_empty() {
            return Err(DomainError::validation("missing modified_by id"));
        }
        Ok(())
    }

    pub fn log_view(&self) -> NotificationHintLog {
        NotificationHintLog {
            block_type: self.block_type.clone(),
            block_id: self.block_id.clone(),
            modified_by_id: self.modified_by_id.clone(),
            create_at: format_millis(self.create_at),
            notify_at: format_millis(self.notify_at),
        }
    }
}

/// Formats epoch milliseconds like `Jan  2 15:04:05.000` (UTC).
fn format_millis(millis: i64) -> String {
    let stamp = format_description!(
        "[month repr:short] [day padding:space] [hour]:[minute]:[second].[subsecond digits:3]"
    );

    OffsetDateTime::from_unix_timestamp_nanos(millis as i128 * 1_000_000)
        .ok()
        .and_then(|t| t.format(&stamp).ok())
        .unwrap_or_else(|| millis.to_string())
}

//! Types for password reset service results

use chrono::{DateTime, Utc};

use crate::domain::entities::passcode::PasscodeRecord;

/// Result of issuing a passcode
#[derive(Debug, Clone)]
pub struct RequestCodeResult {
    /// The persisted passcode record (hash only, never the code)
    pub record: PasscodeRecord,
    /// The mail provider message id
    pub message_id: String,
    /// When the user may request another code
    pub next_resend_at: DateTime<Utc>,
}

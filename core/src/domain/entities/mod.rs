//! Domain entities representing core business objects.

pub mod passcode;
pub mod user;

// Re-export commonly used types
pub use passcode::{
    CodePurpose, PasscodeRecord, PasscodeStatus,
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
pub use user::UserAccount;

pub mod directory;
pub mod passcode;

pub use directory::{MockUserDirectory, UserDirectory};
pub use passcode::{MockPasscodeStore, PasscodeStore};

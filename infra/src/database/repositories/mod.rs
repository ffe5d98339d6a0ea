//! MySQL repository implementations

pub mod passcode_store;
pub mod user_directory;

pub use passcode_store::MySqlPasscodeStore;
pub use user_directory::MySqlUserDirectory;

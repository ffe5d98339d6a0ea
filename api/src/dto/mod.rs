//! Data transfer objects for the HTTP API

pub mod password_reset;

pub use password_reset::{
    RequestCodeRequest, RequestCodeResponse, VerifyResetRequest, VerifyResetResponse,
};

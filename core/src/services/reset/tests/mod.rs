//! Tests for password reset service

#[cfg(test)]
mod mocks;

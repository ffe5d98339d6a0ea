//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check; full RFC 5322 validation is not the goal
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Normalize an email address by trimming whitespace and lowercasing
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for logging (e.g., al***@example.com)
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) if local.len() > 2 => {
            format!("{}***@{}", &local[..2], domain)
        }
        Some((_, domain)) => format!("***@{}", domain),
        None => "***".to_string(),
    }
}

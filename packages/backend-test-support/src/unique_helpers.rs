//! Test helpers for generating unique test data
//!
//! ULID-based generators keep test rows from colliding across runs and
//! between concurrently running tests.

use ulid::Ulid;

/// Generate a unique string in the format `{prefix}-{ulid}`.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_str;
///
/// let id1 = unique_str("user");
/// let id2 = unique_str("user");
/// assert_ne!(id1, id2);
/// assert!(id1.starts_with("user-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique email address in the format
/// `{prefix}-{ulid}@example.test`.
///
/// # Examples
/// ```
/// use backend_test_support::unique_helpers::unique_email;
///
/// let email1 = unique_email("test");
/// let email2 = unique_email("test");
/// assert_ne!(email1, email2);
/// assert!(email1.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix, Ulid::new())
}

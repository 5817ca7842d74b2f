//! Backend test support utilities
//!
//! This crate provides utilities specifically for backend testing: unified
//! logging initialization, unique test-data helpers, and assertions over the
//! JSON response envelope.

pub mod envelope;
pub mod test_logging;
pub mod unique_helpers;

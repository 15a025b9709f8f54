//! Utility modules shared across the crate.
//!
//! - [`datetime`] - Day boundaries and other date/time helpers

pub mod datetime;

//! Compliance recommendations for small and medium enterprises.
//!
//! The [`recommendation`] module holds the rule table and evaluator; the
//! remaining modules carry the service plumbing shared with the API binary.

pub mod config;
pub mod error;
pub mod recommendation;
pub mod telemetry;

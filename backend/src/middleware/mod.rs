//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns: trace
//! identifiers with completion logging, and request deadlines.

pub mod timeout;
pub mod trace;

pub use timeout::Timeout;
pub use trace::Trace;

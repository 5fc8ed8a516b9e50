//! Command implementations for the Tunekit CLI.

pub mod output;
pub mod request;
pub mod stats;
pub mod validate;

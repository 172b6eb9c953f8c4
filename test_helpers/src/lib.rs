//! Test helpers shared across the workspace.
//!
//! - [`env`]: guarded mutation of process environment variables.
//! - [`fixtures`]: a temporary directory for writing configuration files.

pub mod env;
pub mod fixtures;

//! Command implementations for the Luver CLI.

pub mod export;
pub mod types;
pub mod update;

pub use types::{ExportArgs, UpdateArgs};

//! Interactive generator flow built on cliclack
//!
//! Compiled only with the `tui` feature.

#[cfg(feature = "tui")]
mod prompts;

#[cfg(feature = "tui")]
pub use prompts::{run, CreateArgs};

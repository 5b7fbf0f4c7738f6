//! Tool detection and execution
//!
//! This module provides:
//! - git and npm detection
//! - Running git and dependency installation inside a new project

pub mod check;
pub mod tool;

pub use check::{check_git, check_npm, check_runtimes, Language, RuntimeInfo};
pub use tool::{git_init, install_dependencies, ToolCommand};

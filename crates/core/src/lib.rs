//! Core utilities for droidplan
//!
//! This crate provides shared functionality used by every droidplan crate:
//!
//! - **Error handling**: Structured errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based tool configuration with defaults
//! - **Validation**: Warning collector and identifier rules
//! - **Process execution**: Running external tools such as the Gradle wrapper
//!
//! # Example
//!
//! ```rust,no_run
//! use droidplan_core::config::Config;
//!
//! let config = Config::load(None).expect("config should load");
//! println!("project file: {}", config.schema.general.project_file);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod process;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

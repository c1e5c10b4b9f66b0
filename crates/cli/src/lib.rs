//! CLI utilities for droidplan
//!
//! Provides shared CLI functionality:
//! - Status messages and color control
//! - Human-readable plan rendering

#![warn(missing_docs)]

pub mod output;
pub mod render;

//! Configuration loading and schema definitions
//!
//! Tool-level settings shared by every droidplan command.

mod loader;
mod schema;

pub use loader::Config;
pub use schema::*;

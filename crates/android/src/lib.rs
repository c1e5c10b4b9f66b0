//! Android build variant resolution for droidplan
//!
//! This crate turns a declarative build descriptor into a validated build plan:
//! - Project file loading (`droidplan.toml`)
//! - Descriptor resolution against the local environment
//! - Signing material lookup (`keystore.properties`, environment variables)
//! - Advisory plan checks
//! - Gradle wrapper integration

pub mod checks;
pub mod descriptor;
pub mod environment;
pub mod error;
pub mod gradle;
pub mod keystore;
pub mod plan;
pub mod project;
pub mod resolver;

pub use descriptor::{BuildDescriptor, Dependency, DependencyKind, Signing};
pub use environment::{Credentials, Environment, FsEnvironment, Secret, StaticEnvironment};
pub use error::ConfigError;
pub use plan::{ArtifactKind, BuildPlan, ResolvedDependency, ResolvedSigning, ResolvedVersion};
pub use project::ProjectFile;
pub use resolver::{resolve, ConfigResolver};

//! Install-time dependency resolution for jar-manager.
//!
//! Turns a component's declared jar requirements into a generated
//! loader script: the external resolution tool produces a flat
//! manifest, the parser turns it into ordered entries, and the
//! orchestrator filters them and emits one loader statement per
//! runtime archive, vendored alongside the component or referencing
//! the shared repository.

pub mod error;
pub mod installer;
pub mod io;
pub mod manifest;
pub mod maven;
pub mod spec;

pub use error::{Error, Result};
pub use installer::{InstallOutcome, install_jars, vendor_jars};
pub use manifest::{ArtifactKind, DependencyEntry, Scope};
pub use maven::{DependencyResolver, ListOptions, ListRequest, MavenCli};
pub use spec::ComponentSpec;

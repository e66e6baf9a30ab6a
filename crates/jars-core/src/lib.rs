//! Runtime registry for external binary artifacts.
//!
//! Tracks which artifacts are loaded in this process, at which
//! version, loading each coordinate at most once and declining
//! version conflicts with a warning instead of a crash. Generated
//! loader scripts bootstrap this crate and call [`require_jar`] /
//! [`require_jarfile`] once per dependency.
//!
//! Explicit [`LoadRegistry`] / [`Config`] instances are first-class;
//! the free functions below operate on a documented process-lifetime
//! singleton guarded by a mutex, so check-then-act registration keeps
//! its first-writer-wins invariant even if the globals are touched
//! from multiple threads.

pub mod config;
pub mod coordinate;
pub mod error;
pub mod registry;

pub use config::{Config, EnvSource, PropertiesSource, PropertySource, keys};
pub use coordinate::ArtifactCoordinate;
pub use error::{Error, Result};
pub use registry::{ArtifactLoader, ClasspathLoader, LoadRegistry, Outcome};

use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

struct RuntimeState {
    config: Config,
    registry: LoadRegistry,
    loader: ClasspathLoader,
}

static RUNTIME: LazyLock<Mutex<RuntimeState>> = LazyLock::new(|| {
    Mutex::new(RuntimeState {
        config: Config::new(),
        registry: LoadRegistry::new(),
        loader: ClasspathLoader::new(),
    })
});

fn runtime() -> MutexGuard<'static, RuntimeState> {
    RUNTIME.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn coordinate_for(
    group: &str,
    artifact: &str,
    classifier: Option<&str>,
    version: &str,
) -> ArtifactCoordinate {
    let coordinate = ArtifactCoordinate::new(group, artifact, version);
    match classifier {
        Some(classifier) => coordinate.with_classifier(classifier),
        None => coordinate,
    }
}

fn settle(coordinate: &ArtifactCoordinate, outcome: Outcome) -> bool {
    match outcome {
        Outcome::Loaded => true,
        Outcome::AlreadyLoaded => false,
        Outcome::Conflict { existing } => {
            tracing::warn!(
                coordinate = %coordinate.key(),
                existing = %existing,
                "artifact already loaded at a different version; request ignored"
            );
            false
        }
    }
}

/// Load an artifact through the process-wide registry.
///
/// Returns `Ok(true)` when this call performed the load, `Ok(false)`
/// when the coordinate was already loaded, loading is skipped, or the
/// request conflicted with an already-loaded version (the conflict is
/// warned about, never fatal). A coordinate that cannot be located at
/// all is an [`Error::LoadFailure`].
pub fn require_jar(
    group: &str,
    artifact: &str,
    classifier: Option<&str>,
    version: &str,
) -> Result<bool> {
    let coordinate = coordinate_for(group, artifact, classifier, version);
    let mut guard = runtime();
    let RuntimeState {
        config,
        registry,
        loader,
    } = &mut *guard;
    if config.skip() {
        return Ok(false);
    }
    let outcome = registry.require(config, loader, &coordinate)?;
    Ok(settle(&coordinate, outcome))
}

/// Load an artifact from an explicit archive path, with the same
/// registry bookkeeping as [`require_jar`] but no repository-home
/// lookup. Non-vendored generated scripts use this entry point.
pub fn require_jarfile(
    archive: impl AsRef<Path>,
    group: &str,
    artifact: &str,
    classifier: Option<&str>,
    version: &str,
) -> Result<bool> {
    let coordinate = coordinate_for(group, artifact, classifier, version);
    let mut guard = runtime();
    let RuntimeState {
        config,
        registry,
        loader,
    } = &mut *guard;
    if config.skip() {
        return Ok(false);
    }
    let outcome = registry.require_from(config, loader, archive.as_ref(), &coordinate)?;
    Ok(settle(&coordinate, outcome))
}

/// Version registered for a coordinate in the process-wide registry.
pub fn loaded_version(group: &str, artifact: &str, classifier: Option<&str>) -> Option<String> {
    let key = coordinate::registry_key(group, artifact, classifier);
    runtime().registry.version_of(&key).map(str::to_string)
}

/// Archives loaded so far by the process-wide loader, in load order.
pub fn classpath() -> Vec<PathBuf> {
    runtime().loader.classpath().to_vec()
}

/// Pin the skip flag on the process-wide configuration; every later
/// load request is declined without side effects.
pub fn freeze_loading() {
    runtime().config.freeze();
}

/// Install a structured property source ahead of the environment on
/// the process-wide configuration.
pub fn install_property_source(source: Box<dyn PropertySource>) {
    runtime().config.install_source(source);
}

/// Clear the process-wide registry and the configuration's cached
/// paths. Callers use this between independent install runs in the
/// same process.
pub fn reset() {
    let mut guard = runtime();
    guard.config.reset();
    guard.registry.clear();
}

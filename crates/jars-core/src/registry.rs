//! Load registry and artifact loading
//!
//! The [`LoadRegistry`] tracks which artifacts are loaded in this
//! process, at which version. The first writer for a coordinate wins:
//! a key's mapped version never changes once set unless the registry
//! is cleared. Requests for an already-registered coordinate at a
//! different version are declined with [`Outcome::Conflict`], never
//! an error and never an overwrite.

use crate::config::Config;
use crate::coordinate::ArtifactCoordinate;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Result of a load request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The artifact was resolved and loaded by this call.
    Loaded,
    /// Nothing was done: the coordinate is already registered at this
    /// version, or loading is globally skipped.
    AlreadyLoaded,
    /// The coordinate is registered at a different version; the
    /// request was declined and the registry is unchanged.
    Conflict { existing: String },
}

/// The module-loading primitive, abstracted so the registry never
/// depends on how an archive actually enters the process.
pub trait ArtifactLoader {
    /// Bring the archive at `path` into the process and return the
    /// location that was actually loaded. A relative path consults
    /// the implementation's own search mechanism. Failures surface as
    /// plain text; the registry wraps them with a remediation hint.
    fn load(&mut self, path: &Path) -> std::result::Result<PathBuf, String>;
}

/// Default loader: accumulates an in-process classpath.
///
/// Absolute paths are loaded directly; relative paths are resolved
/// against the configured search roots, then the working directory.
/// Every successful load appends one entry to [`classpath`].
///
/// [`classpath`]: ClasspathLoader::classpath
#[derive(Debug, Default)]
pub struct ClasspathLoader {
    search_path: Vec<PathBuf>,
    entries: Vec<PathBuf>,
}

impl ClasspathLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader resolving relative paths against `roots` first.
    pub fn with_search_path(roots: Vec<PathBuf>) -> Self {
        Self {
            search_path: roots,
            entries: Vec::new(),
        }
    }

    /// Archives loaded so far, in load order.
    pub fn classpath(&self) -> &[PathBuf] {
        &self.entries
    }

    fn resolve(&self, path: &Path) -> Option<PathBuf> {
        if path.is_absolute() {
            return path.is_file().then(|| path.to_path_buf());
        }
        for root in &self.search_path {
            let candidate = root.join(path);
            if candidate.is_file() {
                return Some(candidate);
            }
        }
        path.is_file().then(|| path.to_path_buf())
    }
}

impl ArtifactLoader for ClasspathLoader {
    fn load(&mut self, path: &Path) -> std::result::Result<PathBuf, String> {
        let resolved = self
            .resolve(path)
            .ok_or_else(|| format!("no such archive: {}", path.display()))?;
        self.entries.push(resolved.clone());
        Ok(resolved)
    }
}

/// Process-wide map of loaded coordinates to their versions.
#[derive(Debug, Default)]
pub struct LoadRegistry {
    loaded: HashMap<String, String>,
}

impl LoadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version registered for a coordinate key, if any.
    pub fn version_of(&self, key: &str) -> Option<&str> {
        self.loaded.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Forget every registered coordinate.
    pub fn clear(&mut self) {
        self.loaded.clear();
    }

    /// Load an artifact by coordinate, resolving its location under
    /// the configured repository home.
    ///
    /// If `repository_home/<relative_path>` exists the archive is
    /// loaded from there; otherwise the bare relative path is handed
    /// to the loader's generic search mechanism.
    pub fn require(
        &mut self,
        config: &mut Config,
        loader: &mut dyn ArtifactLoader,
        coordinate: &ArtifactCoordinate,
    ) -> Result<Outcome> {
        self.register(config, loader, coordinate, None)
    }

    /// Load an artifact from an explicit archive location, keeping
    /// the same dedup and conflict bookkeeping but bypassing the
    /// repository-home lookup.
    pub fn require_from(
        &mut self,
        config: &mut Config,
        loader: &mut dyn ArtifactLoader,
        archive: &Path,
        coordinate: &ArtifactCoordinate,
    ) -> Result<Outcome> {
        self.register(config, loader, coordinate, Some(archive))
    }

    fn register(
        &mut self,
        config: &mut Config,
        loader: &mut dyn ArtifactLoader,
        coordinate: &ArtifactCoordinate,
        archive: Option<&Path>,
    ) -> Result<Outcome> {
        if config.skip() {
            return Ok(Outcome::AlreadyLoaded);
        }

        let key = coordinate.key();
        if let Some(existing) = self.loaded.get(&key) {
            if existing == coordinate.version() {
                return Ok(Outcome::AlreadyLoaded);
            }
            return Ok(Outcome::Conflict {
                existing: existing.clone(),
            });
        }

        let attempt = match archive {
            Some(path) => loader.load(path),
            None => {
                let relative = coordinate.relative_path();
                let candidate = config.repository_home().join(&relative);
                if candidate.is_file() {
                    loader.load(&candidate)
                } else {
                    loader.load(Path::new(&relative))
                }
            }
        };

        match attempt {
            Ok(location) => {
                tracing::debug!(gav = %coordinate.gav(), path = %location.display(), "loaded archive");
                self.loaded.insert(key, coordinate.version().to_string());
                Ok(Outcome::Loaded)
            }
            Err(cause) => Err(Error::LoadFailure {
                gav: coordinate.gav(),
                cause,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts load attempts; never touches the filesystem.
    struct SpyLoader {
        calls: usize,
        fail: bool,
    }

    impl SpyLoader {
        fn new() -> Self {
            Self {
                calls: 0,
                fail: false,
            }
        }
    }

    impl ArtifactLoader for SpyLoader {
        fn load(&mut self, path: &Path) -> std::result::Result<PathBuf, String> {
            self.calls += 1;
            if self.fail {
                Err(format!("no such archive: {}", path.display()))
            } else {
                Ok(path.to_path_buf())
            }
        }
    }

    fn config() -> Config {
        Config::with_sources(vec![])
    }

    fn coordinate(version: &str) -> ArtifactCoordinate {
        ArtifactCoordinate::new("com.example", "foo", version)
    }

    #[test]
    fn test_dedup_loads_exactly_once() {
        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = SpyLoader::new();
        let c = coordinate("1.0");

        let first = registry.require(&mut config, &mut loader, &c).unwrap();
        let second = registry.require(&mut config, &mut loader, &c).unwrap();

        assert_eq!(first, Outcome::Loaded);
        assert_eq!(second, Outcome::AlreadyLoaded);
        assert_eq!(loader.calls, 1);
    }

    #[test]
    fn test_conflict_first_writer_wins() {
        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = SpyLoader::new();

        let first = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap();
        let second = registry
            .require(&mut config, &mut loader, &coordinate("2.0"))
            .unwrap();

        assert_eq!(first, Outcome::Loaded);
        assert_eq!(
            second,
            Outcome::Conflict {
                existing: "1.0".to_string()
            }
        );
        // the registry still reports the first version
        assert_eq!(registry.version_of("com.example:foo"), Some("1.0"));
        assert_eq!(loader.calls, 1);
    }

    #[test]
    fn test_skip_flag_bypasses_everything() {
        let mut registry = LoadRegistry::new();
        let mut config = Config::with_sources(vec![Box::new(
            crate::config::PropertiesSource::from_entries([("jars.skip", "true")]),
        )]);
        let mut loader = SpyLoader::new();

        let outcome = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap();

        assert_eq!(outcome, Outcome::AlreadyLoaded);
        assert!(registry.is_empty());
        assert_eq!(loader.calls, 0);
    }

    #[test]
    fn test_classifier_is_part_of_the_key() {
        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = SpyLoader::new();

        let plain = coordinate("1.0");
        let classified = coordinate("1.0").with_classifier("linux");

        assert_eq!(
            registry.require(&mut config, &mut loader, &plain).unwrap(),
            Outcome::Loaded
        );
        assert_eq!(
            registry
                .require(&mut config, &mut loader, &classified)
                .unwrap(),
            Outcome::Loaded
        );
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_load_failure_carries_remediation_hint() {
        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = SpyLoader::new();
        loader.fail = true;

        let err = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("may need reinstalling"));
        assert!(message.contains("com.example:foo:1.0"));
        assert!(message.contains("no such archive"));
        // nothing registered on failure
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failed_load_can_be_retried() {
        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = SpyLoader::new();
        loader.fail = true;

        assert!(registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .is_err());

        loader.fail = false;
        assert_eq!(
            registry
                .require(&mut config, &mut loader, &coordinate("1.0"))
                .unwrap(),
            Outcome::Loaded
        );
    }

    #[test]
    fn test_require_from_uses_the_given_archive() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("foo-1.0.jar");
        std::fs::write(&archive, b"jar").unwrap();

        let mut registry = LoadRegistry::new();
        let mut config = config();
        let mut loader = ClasspathLoader::new();

        let outcome = registry
            .require_from(&mut config, &mut loader, &archive, &coordinate("1.0"))
            .unwrap();

        assert_eq!(outcome, Outcome::Loaded);
        assert_eq!(loader.classpath(), &[archive]);
    }

    #[test]
    fn test_classpath_loader_resolves_from_repository() {
        let dir = tempfile::tempdir().unwrap();
        let relative = "com/example/foo/1.0/foo-1.0.jar";
        let archive = dir.path().join(relative);
        std::fs::create_dir_all(archive.parent().unwrap()).unwrap();
        std::fs::write(&archive, b"jar").unwrap();

        let mut registry = LoadRegistry::new();
        let mut config = Config::with_sources(vec![Box::new(
            crate::config::PropertiesSource::from_entries([(
                "jars.home".to_string(),
                dir.path().to_str().unwrap().to_string(),
            )]),
        )]);
        let mut loader = ClasspathLoader::new();

        let outcome = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap();

        assert_eq!(outcome, Outcome::Loaded);
        assert_eq!(loader.classpath(), &[archive]);
    }

    #[test]
    fn test_classpath_loader_falls_back_to_search_path() {
        let repo = tempfile::tempdir().unwrap();
        let extra = tempfile::tempdir().unwrap();
        let relative = "com/example/foo/1.0/foo-1.0.jar";
        let archive = extra.path().join(relative);
        std::fs::create_dir_all(archive.parent().unwrap()).unwrap();
        std::fs::write(&archive, b"jar").unwrap();

        let mut registry = LoadRegistry::new();
        // repository home exists but does not contain the artifact
        let mut config = Config::with_sources(vec![Box::new(
            crate::config::PropertiesSource::from_entries([(
                "jars.home".to_string(),
                repo.path().to_str().unwrap().to_string(),
            )]),
        )]);
        let mut loader = ClasspathLoader::with_search_path(vec![extra.path().to_path_buf()]);

        let outcome = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap();

        assert_eq!(outcome, Outcome::Loaded);
        assert_eq!(loader.classpath(), &[archive]);
    }

    #[test]
    fn test_classpath_loader_missing_everywhere_is_an_error() {
        let repo = tempfile::tempdir().unwrap();
        let mut registry = LoadRegistry::new();
        let mut config = Config::with_sources(vec![Box::new(
            crate::config::PropertiesSource::from_entries([(
                "jars.home".to_string(),
                repo.path().to_str().unwrap().to_string(),
            )]),
        )]);
        let mut loader = ClasspathLoader::new();

        let err = registry
            .require(&mut config, &mut loader, &coordinate("1.0"))
            .unwrap_err();
        assert!(err.to_string().contains("no such archive"));
    }
}

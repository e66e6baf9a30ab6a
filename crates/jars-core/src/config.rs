//! Layered configuration resolution
//!
//! Runtime behavior is controlled by dotted-key properties resolved
//! through an ordered chain of [`PropertySource`]s. The
//! environment-variable source is always installed last; a structured
//! source (e.g. a TOML properties file) can be installed ahead of it
//! at startup. The first source that yields a value wins.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Dotted property keys understood by the resolver.
pub mod keys {
    pub const HOME: &str = "jars.home";
    pub const MAVEN_SETTINGS: &str = "jars.maven.settings";
    pub const SKIP: &str = "jars.skip";
    pub const VERBOSE: &str = "jars.verbose";
    pub const DEBUG: &str = "jars.debug";
    pub const VENDOR: &str = "jars.vendor";
}

/// A single configuration source in the lookup chain.
pub trait PropertySource: Send {
    /// Look up a dotted property key (e.g. `jars.home`).
    fn get(&self, key: &str) -> Option<String>;
}

/// Environment-variable source.
///
/// Dotted keys map to upper-snake-case variables: `jars.home` reads
/// `JARS_HOME`, `jars.maven.settings` reads `JARS_MAVEN_SETTINGS`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl PropertySource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(env_name(key)).ok()
    }
}

fn env_name(key: &str) -> String {
    key.to_uppercase().replace('.', "_")
}

/// Structured dotted-key source backed by a flat map.
///
/// Loaded from a TOML file, nested tables flatten into dotted keys:
/// `[jars] skip = true` yields `jars.skip`.
#[derive(Debug, Clone, Default)]
pub struct PropertiesSource {
    values: HashMap<String, String>,
}

impl PropertiesSource {
    /// Load properties from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::Properties {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            Error::Properties {
                path: path.to_path_buf(),
                message: e.message().to_string(),
            }
        })?;
        let mut values = HashMap::new();
        flatten(&table, "", &mut values);
        Ok(Self { values })
    }

    /// Build a source from explicit key/value pairs.
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl PropertySource for PropertiesSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, String>) {
    for (name, value) in table {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}.{name}")
        };
        match value {
            toml::Value::Table(nested) => flatten(nested, &key, out),
            toml::Value::String(s) => {
                out.insert(key, s.clone());
            }
            other => {
                out.insert(key, other.to_string());
            }
        }
    }
}

/// Resolves runtime flags and repository paths through the source
/// chain, with a hard default below everything.
///
/// Path reads are cached after first resolution; [`Config::reset`]
/// clears the caches so independent install runs in one process see
/// fresh values.
pub struct Config {
    sources: Vec<Box<dyn PropertySource>>,
    frozen: bool,
    home: Option<PathBuf>,
    settings: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// A configuration backed by the environment alone.
    pub fn new() -> Self {
        Self::with_sources(vec![Box::new(EnvSource)])
    }

    /// A configuration with an explicit source chain (first wins).
    pub fn with_sources(sources: Vec<Box<dyn PropertySource>>) -> Self {
        Self {
            sources,
            frozen: false,
            home: None,
            settings: None,
        }
    }

    /// Install a structured source ahead of the existing chain.
    pub fn install_source(&mut self, source: Box<dyn PropertySource>) {
        self.sources.insert(0, source);
    }

    /// Raw property lookup through the chain.
    pub fn property(&self, key: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(key))
    }

    /// Tri-state boolean read: `None` when the property is absent;
    /// the empty string and the literal `true` decode to true,
    /// anything else to false.
    pub fn boolean(&self, key: &str) -> Option<bool> {
        self.property(key).map(|value| value.is_empty() || value == "true")
    }

    pub fn skip(&self) -> bool {
        self.frozen || self.boolean(keys::SKIP).unwrap_or(false)
    }

    pub fn verbose(&self) -> bool {
        self.boolean(keys::VERBOSE).unwrap_or(false)
    }

    pub fn debug(&self) -> bool {
        self.boolean(keys::DEBUG).unwrap_or(false)
    }

    pub fn vendor(&self) -> bool {
        self.boolean(keys::VENDOR).unwrap_or(false)
    }

    /// Pin the skip flag on for the lifetime of this configuration,
    /// regardless of the property chain. Not cleared by [`reset`].
    ///
    /// [`reset`]: Config::reset
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Path of the Maven settings file: the property chain, made
    /// absolute, else `<home>/.m2/settings.xml`. Cached.
    pub fn maven_settings(&mut self) -> PathBuf {
        if let Some(settings) = &self.settings {
            return settings.clone();
        }
        let resolved = self
            .property(keys::MAVEN_SETTINGS)
            .map(|p| absolute(PathBuf::from(p)))
            .unwrap_or_else(|| home_dir().join(".m2").join("settings.xml"));
        self.settings = Some(resolved.clone());
        resolved
    }

    /// Root of the local artifact repository.
    ///
    /// Resolution order: the property chain (made absolute); the
    /// `<localRepository>` element of the settings file, if it can be
    /// read; else `<home>/.m2/repository`. Cached.
    pub fn repository_home(&mut self) -> PathBuf {
        if let Some(home) = &self.home {
            return home.clone();
        }
        let settings = self.maven_settings();
        let resolved = match self.property(keys::HOME) {
            Some(configured) => absolute(PathBuf::from(configured)),
            None => local_repository_from(&settings).unwrap_or_else(|| {
                tracing::debug!(
                    settings = %settings.display(),
                    "no configured repository, using the default"
                );
                home_dir().join(".m2").join("repository")
            }),
        };
        self.home = Some(resolved.clone());
        resolved
    }

    /// Clear the cached repository and settings paths.
    pub fn reset(&mut self) {
        self.home = None;
        self.settings = None;
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn absolute(path: PathBuf) -> PathBuf {
    std::path::absolute(&path).unwrap_or(path)
}

static LOCAL_REPOSITORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<localRepository>\s*([^<]+?)\s*</localRepository>")
        .expect("Invalid localRepository regex")
});

/// Extract `<localRepository>` from a Maven settings file.
///
/// Absence and malformed content both resolve to `None`; this lookup
/// never fails loudly. Backslashes are normalized to forward slashes.
fn local_repository_from(settings: &Path) -> Option<PathBuf> {
    let content = fs::read_to_string(settings).ok()?;
    let captured = LOCAL_REPOSITORY.captures(&content)?;
    let raw = captured.get(1)?.as_str().replace('\\', "/");
    Some(PathBuf::from(raw))
}

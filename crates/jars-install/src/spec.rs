//! Component packaging metadata
//!
//! A component declares its jar requirements in a `<name>.jars.toml`
//! file next to its sources:
//!
//! ```toml
//! name = "my-component"
//! require-path = "lib"
//! requirements = ["com.example:foo:1.0"]
//! ```

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix identifying a component spec file.
pub const SPEC_SUFFIX: &str = ".jars.toml";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawSpec {
    name: String,
    #[serde(default = "default_require_path")]
    require_path: String,
    #[serde(default)]
    requirements: Vec<String>,
}

fn default_require_path() -> String {
    "lib".to_string()
}

/// A loaded component spec plus the paths derived from its location.
#[derive(Debug, Clone)]
pub struct ComponentSpec {
    name: String,
    require_path: String,
    requirements: Vec<String>,
    base_dir: PathBuf,
    source_path: PathBuf,
}

impl ComponentSpec {
    /// Load a spec from an explicit file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let raw: RawSpec = toml::from_str(&content).map_err(|e| Error::InvalidSpec {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        let source_path = std::path::absolute(path).map_err(|e| Error::io(path, e))?;
        let base_dir = source_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self {
            name: raw.name,
            require_path: raw.require_path,
            requirements: raw.requirements,
            base_dir,
            source_path,
        })
    }

    /// Find the single `*.jars.toml` spec in `dir`.
    ///
    /// Zero candidates or more than one is fatal: when no file was
    /// explicitly given there is no way to pick.
    pub fn discover(dir: &Path) -> Result<Self> {
        let mut candidates = Vec::new();
        let entries = fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
        for entry in entries.flatten() {
            let path = entry.path();
            let is_spec = path
                .file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.ends_with(SPEC_SUFFIX));
            if is_spec && path.is_file() {
                candidates.push(path);
            }
        }
        candidates.sort();

        match candidates.as_slice() {
            [] => Err(Error::SpecNotFound {
                dir: dir.to_path_buf(),
            }),
            [single] => Self::load(single),
            _ => Err(Error::SpecAmbiguous {
                dir: dir.to_path_buf(),
                candidates: candidates
                    .iter()
                    .filter_map(|path| path.file_name())
                    .map(|name| name.to_string_lossy().into_owned())
                    .collect(),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn require_path(&self) -> &str {
        &self.require_path
    }

    pub fn requirements(&self) -> &[String] {
        &self.requirements
    }

    /// Directory containing the spec file.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Absolute path of the spec file itself; the regeneration guard
    /// compares against this file's modification time.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn has_runtime_requirements(&self) -> bool {
        !self.requirements.is_empty()
    }

    /// Directory the generated script (and vendored archives) land in.
    pub fn require_dir(&self) -> PathBuf {
        self.base_dir.join(&self.require_path)
    }

    /// Location of the generated loader script.
    pub fn generated_script_path(&self) -> PathBuf {
        self.require_dir()
            .join(format!("{}_jars.rs", identifier(&self.name)))
    }
}

/// Sanitize a component name into a Rust identifier fragment.
pub(crate) fn identifier(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

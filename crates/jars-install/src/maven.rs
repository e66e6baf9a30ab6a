//! External dependency-resolution tool invocation
//!
//! The resolution tool is an opaque command: it is handed the
//! component spec and a path to write the manifest to. Everything the
//! orchestrator wants from it is expressed through [`ListOptions`];
//! behavior is never altered by patching the collaborator.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Options controlling a dependency listing.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Dependency scope to include (`runtime`).
    pub scope: String,
    /// Dependency types to include (`jar`).
    pub types: String,
    /// Ask for absolute resolved file paths.
    pub absolute_paths: bool,
    /// Ask for the scope field in each output line.
    pub output_scope: bool,
    /// Leave dependencies inferred from the component's own package
    /// metadata out of the listing; only the declared jar
    /// requirements are resolved.
    pub exclude_package_dependencies: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            scope: "runtime".to_string(),
            types: "jar".to_string(),
            absolute_paths: true,
            output_scope: true,
            exclude_package_dependencies: true,
        }
    }
}

/// One dependency listing run against a component spec.
#[derive(Debug)]
pub struct ListRequest<'a> {
    pub spec_file: &'a Path,
    pub output_file: &'a Path,
    pub options: ListOptions,
}

/// Seam for the external resolution tool. Tests install a fake; the
/// shipped implementation shells out to Apache Maven.
pub trait DependencyResolver {
    fn list_dependencies(&mut self, request: &ListRequest<'_>) -> Result<()>;
}

/// Apache Maven, located on PATH on first use so components without
/// requirements never need the tool installed.
#[derive(Debug, Default)]
pub struct MavenCli {
    program: Option<PathBuf>,
}

impl MavenCli {
    pub const PROGRAM: &'static str = "mvn";

    pub fn new() -> Self {
        Self::default()
    }

    fn program(&mut self) -> Result<&Path> {
        if self.program.is_none() {
            let located = find_on_path(Self::PROGRAM).ok_or_else(|| Error::MissingTool {
                program: Self::PROGRAM.to_string(),
            })?;
            tracing::debug!(program = %located.display(), "located resolution tool");
            self.program = Some(located);
        }
        Ok(self.program.as_deref().expect("program located above"))
    }
}

impl DependencyResolver for MavenCli {
    fn list_dependencies(&mut self, request: &ListRequest<'_>) -> Result<()> {
        let program = self.program()?.to_path_buf();
        let options = &request.options;

        let mut command = Command::new(&program);
        command
            .arg("dependency:list")
            .arg(format!("-DoutputFile={}", request.output_file.display()))
            .arg(format!("-DincludeScope={}", options.scope))
            .arg(format!("-DincludeTypes={}", options.types));
        if options.absolute_paths {
            command.arg("-DoutputAbsoluteArtifactFilename=true");
        }
        if options.output_scope {
            command.arg("-DoutputScope=true");
        }
        if options.exclude_package_dependencies {
            command.arg("-Djars.excludePackageDependencies=true");
        }
        command.arg("-f").arg(request.spec_file).arg("--quiet");

        tracing::debug!(spec = %request.spec_file.display(), "listing dependencies");
        let status = command.status().map_err(|e| Error::io(&program, e))?;
        if !status.success() {
            return Err(Error::ToolFailed { status });
        }
        Ok(())
    }
}

/// `which`-style PATH search, honoring PATHEXT on Windows.
fn find_on_path(tool: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &extensions {
            let candidate = if ext.is_empty() {
                dir.join(tool)
            } else {
                dir.join(format!("{tool}{ext}"))
            };
            if candidate.is_file() {
                return Some(candidate);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_ask_for_runtime_jars() {
        let options = ListOptions::default();
        assert_eq!(options.scope, "runtime");
        assert_eq!(options.types, "jar");
        assert!(options.absolute_paths);
        assert!(options.output_scope);
        assert!(options.exclude_package_dependencies);
    }

    #[test]
    fn test_find_on_path_misses_unknown_tool() {
        assert!(find_on_path("definitely-not-a-real-tool-491").is_none());
    }

    #[test]
    fn test_missing_tool_message_is_instructive() {
        let err = Error::MissingTool {
            program: MavenCli::PROGRAM.to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("mvn"));
        assert!(message.contains("install Apache Maven"));
    }
}

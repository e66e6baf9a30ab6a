//! Install orchestration
//!
//! Drives the external resolution tool, parses its manifest, and
//! emits the component's generated loader script. Regeneration is
//! idempotent: a script at least as new as the spec source is left
//! untouched and the tool is not invoked at all.

use crate::error::{Error, Result};
use crate::io;
use crate::manifest::{self, DependencyEntry};
use crate::maven::{DependencyResolver, ListOptions, ListRequest};
use crate::spec::{ComponentSpec, identifier};
use jars_core::Config;
use jars_core::config::keys;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// What an install run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    /// The component declares no runtime requirements.
    NothingToDo,
    /// The generated script is at least as new as the spec source.
    UpToDate,
    /// The script was (re)generated.
    Generated { script: PathBuf, entries: usize },
}

/// Generate the loader script referencing archives in the shared
/// repository by absolute resolved path.
pub fn install_jars(
    spec: &ComponentSpec,
    resolver: &mut dyn DependencyResolver,
) -> Result<InstallOutcome> {
    do_install(spec, resolver, false)
}

/// Generate the loader script and vendor the archives alongside the
/// component. Vendoring itself is overridable through the vendor-flag
/// chain; absent decodes to true here.
pub fn vendor_jars(
    spec: &ComponentSpec,
    config: &mut Config,
    resolver: &mut dyn DependencyResolver,
) -> Result<InstallOutcome> {
    let vendor = config.boolean(keys::VENDOR).unwrap_or(true);
    do_install(spec, resolver, vendor)
}

fn do_install(
    spec: &ComponentSpec,
    resolver: &mut dyn DependencyResolver,
    vendor: bool,
) -> Result<InstallOutcome> {
    if !spec.has_runtime_requirements() {
        return Ok(InstallOutcome::NothingToDo);
    }

    let script = spec.generated_script_path();
    if up_to_date(&script, spec.source_path()) {
        tracing::debug!(script = %script.display(), "generated script is current");
        return Ok(InstallOutcome::UpToDate);
    }

    let entries = resolve_dependencies(spec, resolver)?;
    let runtime: Vec<DependencyEntry> = entries
        .into_iter()
        .filter(DependencyEntry::is_runtime_archive)
        .collect();

    let content = emit_script(spec, &runtime, vendor)?;
    io::write_atomic(&script, content.as_bytes())?;

    tracing::debug!(script = %script.display(), entries = runtime.len(), "generated loader script");
    Ok(InstallOutcome::Generated {
        script,
        entries: runtime.len(),
    })
}

/// The regeneration guard: a script whose modification time is equal
/// to or newer than the spec source's stands; only a strictly newer
/// spec triggers regeneration. Unreadable metadata counts as stale.
fn up_to_date(script: &Path, source: &Path) -> bool {
    match (mtime(script), mtime(source)) {
        (Some(script_time), Some(source_time)) => script_time >= source_time,
        _ => false,
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

/// Run the external tool against a temporary manifest path and parse
/// the result. The temporary file is removed on drop, tool failure
/// included.
fn resolve_dependencies(
    spec: &ComponentSpec,
    resolver: &mut dyn DependencyResolver,
) -> Result<Vec<DependencyEntry>> {
    let manifest_file = tempfile::Builder::new()
        .prefix("deps-")
        .suffix(".lst")
        .tempfile()
        .map_err(|e| Error::io(std::env::temp_dir(), e))?;

    let request = ListRequest {
        spec_file: spec.source_path(),
        output_file: manifest_file.path(),
        options: ListOptions::default(),
    };
    resolver.list_dependencies(&request)?;

    manifest::load(manifest_file.path())
}

fn emit_script(
    spec: &ComponentSpec,
    entries: &[DependencyEntry],
    vendor: bool,
) -> Result<String> {
    let mut script = String::new();
    if vendor {
        script.push_str("use jars_core::{Result, require_jar};\n");
    } else {
        script.push_str("use jars_core::{Result, require_jarfile};\n");
    }
    script.push('\n');
    script.push_str(&format!(
        "pub fn load_{}_jars() -> Result<()> {{\n",
        identifier(spec.name())
    ));

    for entry in entries {
        let coordinate = &entry.coordinate;
        let classifier = match coordinate.classifier() {
            Some(classifier) => format!("Some({classifier:?})"),
            None => "None".to_string(),
        };
        if vendor {
            vendor_archive(spec, entry)?;
            script.push_str(&format!(
                "    require_jar({:?}, {:?}, {}, {:?})?;\n",
                coordinate.group(),
                coordinate.artifact(),
                classifier,
                coordinate.version()
            ));
        } else {
            script.push_str(&format!(
                "    require_jarfile({:?}, {:?}, {:?}, {}, {:?})?;\n",
                entry.resolved_path,
                coordinate.group(),
                coordinate.artifact(),
                classifier,
                coordinate.version()
            ));
        }
    }

    script.push_str("    Ok(())\n}\n");
    Ok(script)
}

/// Copy a resolved archive into the component's require directory,
/// under its repository-layout relative path.
fn vendor_archive(spec: &ComponentSpec, entry: &DependencyEntry) -> Result<()> {
    let destination = spec.require_dir().join(entry.coordinate.relative_path());
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    fs::copy(&entry.resolved_path, &destination)
        .map_err(|e| Error::io(&entry.resolved_path, e))?;
    tracing::debug!(
        from = %entry.resolved_path.display(),
        to = %destination.display(),
        "vendored archive"
    );
    Ok(())
}

//! Manifest parsing
//!
//! The external resolution tool writes one resolved dependency per
//! line, colon delimited, with literal markers for type and scope:
//!
//! ```text
//!    com.example:foo:jar:1.0:runtime:/repo/com/example/foo/1.0/foo-1.0.jar
//!    com.example:bar:jar:linux:2.1:provided:/repo/com/example/bar/2.1/bar-2.1-linux.jar
//!    com.example:parent:pom:1.0:runtime:/repo/com/example/parent/1.0/parent-1.0.pom
//! ```
//!
//! Fields, right to left: resolved file, output scope; before them
//! the coordinate stem `group:artifact:<type>[:classifier]:version`.
//! A line carrying neither type marker is not a dependency line and
//! yields no entry; a structurally broken line is dropped the same
//! way. Parsing a manifest never fails.

use crate::error::{Error, Result};
use jars_core::ArtifactCoordinate;
use std::fs;
use std::path::{Path, PathBuf};

const ARCHIVE_MARKER: &str = ":jar:";
const DESCRIPTOR_MARKER: &str = ":pom:";
const PROVIDED_MARKER: &str = ":provided:";
const TEST_MARKER: &str = ":test:";

/// Dependency type, from the `:jar:` / `:pom:` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Archive,
    Descriptor,
}

/// Dependency scope; `runtime` unless a marker says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Provided,
    Test,
    Runtime,
}

/// One parsed manifest line, in manifest order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyEntry {
    pub kind: ArtifactKind,
    pub scope: Scope,
    pub coordinate: ArtifactCoordinate,
    pub resolved_path: PathBuf,
    /// Coordinate stem with the markers collapsed:
    /// `group:artifact[:classifier]:version`.
    pub gav: String,
}

impl DependencyEntry {
    /// The entries a generated loader script is built from.
    pub fn is_runtime_archive(&self) -> bool {
        self.kind == ArtifactKind::Archive && self.scope == Scope::Runtime
    }
}

/// Parse one manifest line; `None` for anything that is not a
/// well-formed dependency line.
pub fn parse_line(line: &str) -> Option<DependencyEntry> {
    let line = line.trim();

    let (kind, marker) = if line.contains(ARCHIVE_MARKER) {
        (ArtifactKind::Archive, ARCHIVE_MARKER)
    } else if line.contains(DESCRIPTOR_MARKER) {
        (ArtifactKind::Descriptor, DESCRIPTOR_MARKER)
    } else {
        return None;
    };

    // strip the trailing `:<scope>:<file>` fields to get the stem
    let file_sep = line.rfind(':')?;
    let scope_sep = line[..file_sep].rfind(':')?;
    let stem = &line[..scope_sep];

    let (ga, remainder) = stem.split_once(marker)?;
    let (group, artifact) = ga.split_once(':')?;
    if group.is_empty() || artifact.is_empty() || remainder.is_empty() {
        return None;
    }

    // remainder is `version` or `classifier:version`
    let (classifier, version) = match remainder.rsplit_once(':') {
        Some((classifier, version)) if !classifier.is_empty() => (Some(classifier), version),
        Some((_, version)) => (None, version),
        None => (None, remainder),
    };
    if version.is_empty() {
        return None;
    }

    let scope = if line.contains(PROVIDED_MARKER) {
        Scope::Provided
    } else if line.contains(TEST_MARKER) {
        Scope::Test
    } else {
        Scope::Runtime
    };

    let resolved_path = PathBuf::from(line[file_sep + 1..].trim());

    let mut coordinate = ArtifactCoordinate::new(group, artifact, version);
    if let Some(classifier) = classifier {
        coordinate = coordinate.with_classifier(classifier);
    }
    let gav = coordinate.gav();

    Some(DependencyEntry {
        kind,
        scope,
        coordinate,
        resolved_path,
        gav,
    })
}

/// Parse a whole manifest text, preserving line order.
pub fn parse(manifest: &str) -> Vec<DependencyEntry> {
    manifest.lines().filter_map(parse_line).collect()
}

/// Read and parse a manifest file.
pub fn load(path: &Path) -> Result<Vec<DependencyEntry>> {
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse(&content))
}

//! Artifact coordinates and their repository-layout paths

use std::fmt;

/// The identity of a resolved artifact: group, artifact, optional
/// classifier, and version.
///
/// The registry key deliberately excludes the version: two requests
/// for the same `group:artifact[:classifier]` at different versions
/// collide on the same key, which is what makes version-conflict
/// detection possible.
///
/// # Example
///
/// ```
/// use jars_core::ArtifactCoordinate;
///
/// let coordinate = ArtifactCoordinate::new("com.example", "foo", "1.0");
/// assert_eq!(coordinate.key(), "com.example:foo");
/// assert_eq!(coordinate.relative_path(), "com/example/foo/1.0/foo-1.0.jar");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactCoordinate {
    group: String,
    artifact: String,
    classifier: Option<String>,
    version: String,
}

/// Registry key for a coordinate: `group:artifact[:classifier]`.
pub fn registry_key(group: &str, artifact: &str, classifier: Option<&str>) -> String {
    match classifier {
        Some(classifier) => format!("{group}:{artifact}:{classifier}"),
        None => format!("{group}:{artifact}"),
    }
}

impl ArtifactCoordinate {
    /// Create a coordinate without a classifier.
    pub fn new(
        group: impl Into<String>,
        artifact: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
            classifier: None,
            version: version.into(),
        }
    }

    /// Attach a classifier (e.g. a platform qualifier like `linux`).
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn artifact(&self) -> &str {
        &self.artifact
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// The registry identity key: `group:artifact[:classifier]`.
    pub fn key(&self) -> String {
        registry_key(&self.group, &self.artifact, self.classifier.as_deref())
    }

    /// The full `group:artifact[:classifier]:version` form.
    pub fn gav(&self) -> String {
        format!("{}:{}", self.key(), self.version)
    }

    /// Archive file name: `artifact-version[-classifier].jar`.
    pub fn file_name(&self) -> String {
        match &self.classifier {
            Some(classifier) => format!("{}-{}-{}.jar", self.artifact, self.version, classifier),
            None => format!("{}-{}.jar", self.artifact, self.version),
        }
    }

    /// Repository-layout path relative to the repository home: the
    /// group id with `.` replaced by `/`, then
    /// `artifact/version/<file_name>`.
    pub fn relative_path(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.group.replace('.', "/"),
            self.artifact,
            self.version,
            self.file_name()
        )
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.gav())
    }
}

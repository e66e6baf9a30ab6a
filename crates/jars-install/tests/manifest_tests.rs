//! Table-driven tests for the manifest grammar

use jars_install::manifest::{ArtifactKind, Scope, parse_line};
use rstest::rstest;

#[rstest]
#[case(
    "com.example:foo:jar:1.0:runtime:/r/foo-1.0.jar",
    ArtifactKind::Archive,
    Scope::Runtime,
    "com.example:foo:1.0"
)]
#[case(
    "com.example:foo:jar:linux:1.0:runtime:/r/foo-1.0-linux.jar",
    ArtifactKind::Archive,
    Scope::Runtime,
    "com.example:foo:linux:1.0"
)]
#[case(
    "com.example:parent:pom:1.0:runtime:/r/parent-1.0.pom",
    ArtifactKind::Descriptor,
    Scope::Runtime,
    "com.example:parent:1.0"
)]
#[case(
    "junit:junit:jar:4.12:test:/r/junit-4.12.jar",
    ArtifactKind::Archive,
    Scope::Test,
    "junit:junit:4.12"
)]
#[case(
    "org.slf4j:slf4j-api:jar:2.0.9:provided:/r/slf4j-api-2.0.9.jar",
    ArtifactKind::Archive,
    Scope::Provided,
    "org.slf4j:slf4j-api:2.0.9"
)]
fn dependency_lines(
    #[case] line: &str,
    #[case] kind: ArtifactKind,
    #[case] scope: Scope,
    #[case] gav: &str,
) {
    let entry = parse_line(line).unwrap();
    assert_eq!(entry.kind, kind);
    assert_eq!(entry.scope, scope);
    assert_eq!(entry.gav, gav);
}

#[rstest]
#[case("The following files have been resolved:")]
#[case("")]
#[case("none")]
#[case("com.example:foo:war:1.0:runtime:/r/foo-1.0.war")]
fn non_dependency_lines(#[case] line: &str) {
    assert!(parse_line(line).is_none());
}

//! Integration test for the process-wide runtime
//!
//! Everything lives in one test function: the global registry is
//! process state, and independent test threads would race on it.

use jars_core::PropertiesSource;
use std::fs;

#[test]
fn global_runtime_full_flow() {
    let repo = tempfile::tempdir().unwrap();
    let foo = repo.path().join("com/example/foo/1.0/foo-1.0.jar");
    fs::create_dir_all(foo.parent().unwrap()).unwrap();
    fs::write(&foo, b"foo").unwrap();
    let bar = repo.path().join("bar-1.0.jar");
    fs::write(&bar, b"bar").unwrap();

    // point the global configuration at the temporary repository
    jars_core::install_property_source(Box::new(PropertiesSource::from_entries([(
        "jars.home".to_string(),
        repo.path().to_str().unwrap().to_string(),
    )])));

    // fresh load, then dedup
    assert!(jars_core::require_jar("com.example", "foo", None, "1.0").unwrap());
    assert!(!jars_core::require_jar("com.example", "foo", None, "1.0").unwrap());
    assert_eq!(
        jars_core::loaded_version("com.example", "foo", None).as_deref(),
        Some("1.0")
    );
    assert_eq!(jars_core::classpath(), vec![foo.clone()]);

    // conflicting version is declined and the registry keeps 1.0
    assert!(!jars_core::require_jar("com.example", "foo", None, "2.0").unwrap());
    assert_eq!(
        jars_core::loaded_version("com.example", "foo", None).as_deref(),
        Some("1.0")
    );

    // explicit archive path, same bookkeeping
    assert!(jars_core::require_jarfile(&bar, "com.example", "bar", None, "1.0").unwrap());
    assert_eq!(
        jars_core::loaded_version("com.example", "bar", None).as_deref(),
        Some("1.0")
    );

    // a coordinate that exists nowhere fails with the remediation hint
    let err = jars_core::require_jar("com.example", "missing", None, "1.0").unwrap_err();
    assert!(err.to_string().contains("may need reinstalling"));

    // reset isolates runs: foo loads fresh again
    jars_core::reset();
    assert_eq!(jars_core::loaded_version("com.example", "foo", None), None);
    assert!(jars_core::require_jar("com.example", "foo", None, "1.0").unwrap());

    // frozen loading declines everything without touching the registry
    jars_core::freeze_loading();
    assert!(!jars_core::require_jar("com.example", "bar", None, "1.0").unwrap());
    assert_eq!(jars_core::loaded_version("com.example", "bar", None), None);
}

//! Install and vendor commands

use crate::error::Result;
use colored::Colorize;
use jars_core::Config;
use jars_install::installer::{self, InstallOutcome};
use jars_install::maven::MavenCli;
use jars_install::spec::ComponentSpec;
use std::path::Path;

pub fn run_install(cwd: &Path, spec: Option<&Path>) -> Result<()> {
    let spec = load_spec(cwd, spec)?;
    let mut maven = MavenCli::new();
    let outcome = installer::install_jars(&spec, &mut maven)?;
    report(&spec, &outcome);
    Ok(())
}

pub fn run_vendor(cwd: &Path, spec: Option<&Path>, config: &mut Config) -> Result<()> {
    let spec = load_spec(cwd, spec)?;
    let mut maven = MavenCli::new();
    let outcome = installer::vendor_jars(&spec, config, &mut maven)?;
    report(&spec, &outcome);
    Ok(())
}

fn load_spec(cwd: &Path, explicit: Option<&Path>) -> Result<ComponentSpec> {
    match explicit {
        Some(path) => Ok(ComponentSpec::load(path)?),
        None => Ok(ComponentSpec::discover(cwd)?),
    }
}

fn report(spec: &ComponentSpec, outcome: &InstallOutcome) {
    match outcome {
        InstallOutcome::NothingToDo => {
            println!("{} declares no jar requirements", spec.name().bold());
        }
        InstallOutcome::UpToDate => {
            println!("{} is up to date", spec.name().bold());
        }
        InstallOutcome::Generated { script, entries } => {
            println!(
                "{} wrote {} ({} archive{})",
                spec.name().green().bold(),
                script.display(),
                entries,
                if *entries == 1 { "" } else { "s" }
            );
        }
    }
}

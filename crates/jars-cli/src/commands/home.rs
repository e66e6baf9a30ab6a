//! Home command: show the resolved paths

use crate::error::Result;
use jars_core::Config;

pub fn run_home(config: &mut Config) -> Result<()> {
    println!("repository: {}", config.repository_home().display());
    println!("settings:   {}", config.maven_settings().display());
    Ok(())
}

use color_eyre::eyre::Result;

use crate::config::{runtime_dir, Settings};
use crate::logging::log_dir;

pub fn run(settings: &Settings) -> Result<()> {
    println!("Runtime dir: {}", runtime_dir().display());
    println!("Log dir:     {}", log_dir().display());
    println!();
    println!("{}", settings.to_toml()?);
    Ok(())
}

//! `warden init`: Write a default configuration file.

use clap::Args;
use std::path::Path;

use crate::config::WardenConfig;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file.
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: &InitArgs, path: &Path) -> anyhow::Result<()> {
    if path.exists() && !args.force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let config = WardenConfig::default();
    config.save(path)?;
    println!("Wrote {}", path.display());
    println!(
        "Set {} before issuing or verifying credentials.",
        config.credentials.secret_env
    );
    Ok(())
}

//! `warden hash`: Hash a password into a PHC string.

use clap::Args;
use std::sync::Arc;

use warden_crypto::PasswordAuthenticator;

use crate::config::WardenConfig;

#[derive(Args, Debug)]
pub struct HashArgs {
    /// Password to hash. Read from stdin when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn run(args: &HashArgs, config: &WardenConfig) -> anyhow::Result<()> {
    let password = super::value_or_stdin(args.password.as_deref(), "password")?;
    println!("{}", hash(password, config).await?);
    Ok(())
}

async fn hash(password: String, config: &WardenConfig) -> anyhow::Result<String> {
    let hasher = Arc::new(PasswordAuthenticator::new(config.password.clone())?);
    let phc = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;
    Ok(phc)
}

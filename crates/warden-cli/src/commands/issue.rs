//! `warden issue`: Issue a credential without a password check.

use clap::Args;
use std::sync::Arc;

use warden_core::{Handle, UserId};
use warden_credentials::{CredentialIssuer, IssuedCredential};

use crate::config::WardenConfig;

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// User id (UUID) to embed in the credential.
    #[arg(short, long)]
    pub user_id: String,

    /// Handle to embed in the credential.
    #[arg(short = 'n', long)]
    pub username: String,

    /// Lifetime override in seconds.
    #[arg(long)]
    pub ttl_secs: Option<u64>,
}

pub fn run(args: &IssueArgs, config: &WardenConfig) -> anyhow::Result<()> {
    let issued = issue(args, config)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "token": issued.credential,
            "issued_at": issued.issued_at,
            "expires_at": issued.expires_at,
        }))?
    );
    Ok(())
}

fn issue(args: &IssueArgs, config: &WardenConfig) -> anyhow::Result<IssuedCredential> {
    let user_id: UserId = args.user_id.parse()?;
    let handle = Handle::new(args.username.clone())?;

    let mut policy = config.credentials.clone();
    if let Some(ttl) = args.ttl_secs {
        policy.ttl_secs = ttl;
    }
    let secret = Arc::new(config.signing_secret()?);
    let issuer = CredentialIssuer::new(secret, &policy)?;
    Ok(issuer.issue_at(user_id, &handle, chrono::Utc::now())?)
}

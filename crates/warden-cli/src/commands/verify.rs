//! `warden verify`: Verify a bearer credential.

use clap::Args;
use std::sync::Arc;

use warden_core::AuthenticatedPrincipal;
use warden_credentials::CredentialVerifier;

use crate::config::WardenConfig;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Credential to verify. Read from stdin when omitted.
    #[arg(short, long)]
    pub token: Option<String>,
}

pub fn run(args: &VerifyArgs, config: &WardenConfig) -> anyhow::Result<()> {
    let token = super::value_or_stdin(args.token.as_deref(), "credential")?;
    let principal = verify(&token, config)?;
    println!("{}", serde_json::to_string_pretty(&principal)?);
    Ok(())
}

fn verify(token: &str, config: &WardenConfig) -> anyhow::Result<AuthenticatedPrincipal> {
    let verifier = CredentialVerifier::new(Arc::new(config.signing_secret()?));
    verifier.verify(token.trim()).map_err(|err| {
        tracing::debug!(reason = err.kind(), "credential rejected");
        anyhow::anyhow!("unauthorized: {}", err)
    })
}

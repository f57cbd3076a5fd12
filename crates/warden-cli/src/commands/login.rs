//! `warden login`: Log in against the configured user seed file.

use clap::Args;
use std::sync::Arc;

use warden_auth::{Authenticator, LoginRequest, LoginResponse};

use crate::config::WardenConfig;
use crate::users;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Handle to log in as.
    #[arg(short = 'n', long)]
    pub username: String,

    /// Password. Read from stdin when omitted.
    #[arg(short, long)]
    pub password: Option<String>,
}

pub async fn run(args: &LoginArgs, config: &WardenConfig) -> anyhow::Result<()> {
    let request = LoginRequest {
        username: args.username.clone(),
        password: super::value_or_stdin(args.password.as_deref(), "password")?,
    };
    let response = login(&request, config).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

async fn login(request: &LoginRequest, config: &WardenConfig) -> anyhow::Result<LoginResponse> {
    let path = config
        .users
        .path
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("users.path is not set in the configuration"))?;
    let store = users::load_store(path)?;

    let auth = Authenticator::from_policies(
        config.signing_secret()?,
        &config.credentials,
        config.password.clone(),
        Arc::new(store),
    )?;
    Ok(auth.login(&request.username, &request.password).await?)
}

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Replay an OAuth2 sign-in from a captured Smartsheet user payload
    SignIn(SignInArgs),
    /// Inspect stored accounts and their external-auth links
    Account {
        #[command(subcommand)]
        action: AccountCommands,
    },
}

#[derive(Debug, Args)]
pub struct SignInArgs {
    /// JSON file with the raw Smartsheet user (`-` reads stdin)
    pub payload: PathBuf,

    /// OAuth2 access token issued with the payload
    #[arg(long, default_value = "")]
    pub access_token: String,

    /// OAuth2 refresh token
    #[arg(long, default_value = "")]
    pub refresh_token: String,

    /// Access token expiry (RFC 3339)
    #[arg(long)]
    pub expiry: Option<DateTime<Utc>>,

    /// Provider name placed in the request context (defaults to config)
    #[arg(long)]
    pub provider: Option<String>,

    /// Do not insert the external-auth row afterwards
    #[arg(long)]
    pub skip_link: bool,
}

#[derive(Debug, Subcommand)]
pub enum AccountCommands {
    /// Show one account and its external-auth links
    Show {
        /// Account id (the Smartsheet user id)
        id: String,
    },
    /// List all accounts of the configured collection
    List,
}

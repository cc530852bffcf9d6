//! Whoami command - Display current identity

use super::Context;
use crate::config::{Config, ConfigPaths};
use crate::credentials::get_credential_store;
use crate::error::{CliError, CliResult};
use crate::models::Session;
use crate::output::{format_when, print_json, print_key_value};
use clap::Args;
use govgate_core::Role;
use serde::Serialize;

/// Arguments for the whoami command
#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for whoami
#[derive(Serialize)]
struct WhoamiOutput<'a> {
    role: Role,
    user_id: Option<&'a str>,
    name: Option<&'a str>,
    email: Option<&'a str>,
    api_url: &'a str,
    token_expires_at: Option<String>,
}

/// Execute the whoami command
pub async fn execute(args: WhoamiArgs, ctx: &Context) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;

    let store = get_credential_store(&paths);
    let credentials = store.load()?.ok_or(CliError::NotAuthenticated)?;
    let session = Session::load(&paths)?.ok_or(CliError::NotAuthenticated)?;
    let role = ctx.role.unwrap_or(session.role);

    let output = WhoamiOutput {
        role,
        user_id: session.user_id.as_deref(),
        name: session.name.as_deref(),
        email: session.email.as_deref(),
        api_url: &config.api_url,
        token_expires_at: Some(govgate_core::time::format_timestamp(&credentials.expires_at)),
    };

    if args.json {
        print_json(&output)?;
    } else {
        println!();
        print_key_value("Role", role.title());
        print_key_value("User ID", output.user_id.unwrap_or("-"));
        print_key_value("Name", output.name.unwrap_or("-"));
        print_key_value("Email", output.email.unwrap_or("-"));
        print_key_value("API URL", output.api_url);
        print_key_value("Token expires", &format_when(Some(credentials.expires_at)));
        if credentials.is_expired() {
            print_key_value("Status", "expired (refreshed on next call)");
        }
        println!();
    }

    Ok(())
}

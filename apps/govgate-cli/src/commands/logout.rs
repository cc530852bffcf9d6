//! Logout command - Clear stored credentials

use crate::config::ConfigPaths;
use crate::credentials::get_credential_store;
use crate::error::CliResult;
use crate::models::Session;
use crate::output::{print_info, print_success};
use clap::Args;

/// Arguments for the logout command
#[derive(Args, Debug)]
pub struct LogoutArgs {}

/// Execute the logout command
pub async fn execute(_args: LogoutArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    logout(&paths)
}

/// Remove tokens and session. Succeeds when nothing was stored.
pub fn logout(paths: &ConfigPaths) -> CliResult<()> {
    let store = get_credential_store(paths);
    let had_tokens = store.exists();

    if !had_tokens && !paths.session_file.exists() {
        print_info("You are not logged in.");
        return Ok(());
    }

    if had_tokens {
        store.delete()?;
    }
    Session::delete(paths)?;

    print_success("Credentials cleared. Logged out successfully.");
    Ok(())
}

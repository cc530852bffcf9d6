//! Login command - exchange account credentials for bearer tokens

use super::Context;
use crate::api::{self, ApiClient};
use crate::config::{Config, ConfigPaths};
use crate::error::{CliError, CliResult};
use crate::models::{Credentials, LoginResponse, Session};
use crate::output::{print_info, print_success};
use clap::Args;
use dialoguer::{Input, Password};
use govgate_core::Role;
use std::io::IsTerminal;

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account e-mail
    #[arg(long, env = "GOVGATE_EMAIL")]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "GOVGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Role username for staff logins (defaults to the e-mail's local part)
    #[arg(long)]
    pub role_username: Option<String>,

    /// Role password for staff logins (defaults to the account password)
    #[arg(long)]
    pub role_password: Option<String>,
}

/// Execute the login command
pub async fn execute(args: LoginArgs, ctx: &Context) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;
    let role = ctx.role.unwrap_or(Role::Citizen);

    let email = match args.email {
        Some(email) => email,
        None => prompt_email()?,
    };
    let password = match args.password {
        Some(password) => password,
        None => prompt_password()?,
    };
    govgate_core::validate::email("Email", &email)?;

    let client = ApiClient::new(config, &paths, role)?;
    let response = api::login(
        &client,
        &email,
        &password,
        args.role_username.as_deref(),
        args.role_password.as_deref(),
    )
    .await?;

    let session = persist_login(&client, &paths, role, &email, response)?;

    print_success(&format!("Logged in as {} ({})", display_name(&session), role.title()));
    if role != Role::Citizen {
        print_info(&format!("Commands now use /api/{}/", role.segment()));
    }
    Ok(())
}

/// Store the token pair and write the session file.
pub fn persist_login(
    client: &ApiClient,
    paths: &ConfigPaths,
    role: Role,
    email: &str,
    response: LoginResponse,
) -> CliResult<Session> {
    let session = Session::from_login(role, &response.access, response.user.as_ref(), email);
    let credentials = Credentials::from_tokens(response.access, response.refresh);
    client.store().store(&credentials)?;
    session.save(paths)?;
    tracing::info!(role = %role, "Session stored");
    Ok(session)
}

fn display_name(session: &Session) -> &str {
    session
        .name
        .as_deref()
        .or(session.email.as_deref())
        .unwrap_or("unknown user")
}

fn require_terminal(what: &str) -> CliResult<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::InputError(format!(
            "No {what} given and no terminal to prompt on. Pass --{what}."
        )))
    }
}

fn prompt_email() -> CliResult<String> {
    require_terminal("email")?;
    Ok(Input::<String>::new().with_prompt("E-mail").interact_text()?)
}

fn prompt_password() -> CliResult<String> {
    require_terminal("password")?;
    Ok(Password::new().with_prompt("Password").interact()?)
}

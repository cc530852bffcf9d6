//! Register command - create a citizen account

use crate::api::{self, ApiClient};
use crate::config::{Config, ConfigPaths};
use crate::error::{CliError, CliResult};
use crate::output::{print_info, print_success};
use clap::Args;
use dialoguer::Password;
use govgate_core::models::Registration;
use govgate_core::Role;
use std::io::IsTerminal;

/// Arguments for the register command
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub first_name: String,

    #[arg(long)]
    pub second_name: Option<String>,

    #[arg(long)]
    pub surname: String,

    /// National identification number
    #[arg(long)]
    pub national_id: String,

    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: String,

    /// Password (prompted twice when omitted)
    #[arg(long, env = "GOVGATE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

pub async fn execute(args: RegisterArgs) -> CliResult<()> {
    let paths = ConfigPaths::new()?;
    let config = Config::load(&paths)?;

    let password = match args.password {
        Some(password) => password,
        None => prompt_new_password()?,
    };

    let registration = Registration {
        user_name: args.username.trim().to_string(),
        email: args.email.trim().to_string(),
        first_name: args.first_name.trim().to_string(),
        second_name: args.second_name.map(|s| s.trim().to_string()),
        surname: args.surname.trim().to_string(),
        national_id: args.national_id.trim().to_string(),
        dob: Some(super::parse_when(&args.dob, "date of birth")?),
        password,
    };
    registration.validate()?;

    let client = ApiClient::new(config, &paths, Role::Citizen)?;
    api::register(&client, &registration).await?;

    print_success(&format!("Account created for {}", registration.email));
    print_info("Run 'govgate login' to sign in.");
    Ok(())
}

fn prompt_new_password() -> CliResult<String> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password given and no terminal to prompt on. Pass --password.".to_string(),
        ));
    }
    Ok(Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?)
}

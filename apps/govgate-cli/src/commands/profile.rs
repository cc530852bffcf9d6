//! Profile commands - show or edit the logged-in account

use super::Context;
use crate::api;
use crate::error::CliResult;
use crate::output::{print_json, print_key_value, print_success};
use clap::{Args, Subcommand};
use serde_json::Value;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommands,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Show the profile record
    Show {
        #[arg(long)]
        json: bool,
    },
    /// Change profile fields
    Update {
        /// Field assignment using the backend's field name, e.g. FirstName=Jane
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,

        #[arg(long)]
        json: bool,
    },
}

pub async fn execute(args: ProfileArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    match args.command {
        ProfileCommands::Show { json } => {
            let profile = api::get_profile(&client).await?;
            render(&profile, json)
        }
        ProfileCommands::Update { set, json } => {
            let changes = api::parse_assignments(&set)?;
            let profile = api::update_profile(&client, &changes).await?;
            if !json {
                print_success("Profile updated");
            }
            render(&profile, json)
        }
    }
}

fn render(profile: &Value, json: bool) -> CliResult<()> {
    if json {
        return print_json(profile);
    }
    println!();
    if let Some(map) = profile.as_object() {
        for (key, value) in map {
            print_key_value(key, &scalar(value));
        }
    }
    println!();
    Ok(())
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_rendering() {
        assert_eq!(scalar(&json!(null)), "-");
        assert_eq!(scalar(&json!("Jane")), "Jane");
        assert_eq!(scalar(&json!(true)), "true");
    }
}

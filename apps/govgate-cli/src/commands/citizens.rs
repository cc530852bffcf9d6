//! Citizen account commands
//!
//! Citizens register themselves, so there is no create here. Staff can
//! inspect, edit, deactivate and delete accounts.

use super::{confirm, ensure_changes, or_dash, parse_uuid, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_date, format_when, print_json, print_key_value, print_success, yes_no, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{Citizen, CitizenUpdate};

#[derive(Args, Debug)]
pub struct CitizensArgs {
    #[command(subcommand)]
    pub command: CitizensCommands,
}

#[derive(Subcommand, Debug)]
pub enum CitizensCommands {
    /// List citizens
    List(ListArgs),
    /// Show one citizen
    Get(GetArgs),
    /// Change citizen fields
    Update(UpdateArgs),
    /// Delete a citizen account
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter on username, names, national ID and e-mail
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Only accounts that are not active
    #[arg(long)]
    pub inactive: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    pub id: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub username: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub second_name: Option<String>,

    #[arg(long)]
    pub surname: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Activate or deactivate the account
    #[arg(long)]
    pub active: Option<bool>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: CitizensArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        CitizensCommands::List(a) => execute_list(a, ctx).await,
        CitizensCommands::Get(a) => execute_get(a, ctx).await,
        CitizensCommands::Update(a) => execute_update(a, ctx).await,
        CitizensCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut citizens = resource::list::<Citizen>(&client).await?;
    if args.inactive {
        citizens.retain(|citizen| !citizen.is_active);
    }
    if let Some(query) = &args.search {
        citizens = filter_by_query(&citizens, query);
    }

    if args.json {
        return print_json(&citizens);
    }
    if citizens.is_empty() {
        println!("No citizens found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("USERNAME", 18),
        ("NAME", 26),
        ("EMAIL", 28),
        ("ACTIVE", 6),
    ]);
    for citizen in &citizens {
        table.row(vec![
            citizen.id.to_string(),
            citizen.user_name.clone(),
            citizen.full_name(),
            citizen.email.clone(),
            yes_no(citizen.is_active).to_string(),
        ]);
    }
    table.print();
    println!("\n{} citizen(s)", citizens.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "citizen")?;
    let client = ctx.client()?;
    let citizen = resource::get::<Citizen>(&client, id).await?;

    if args.json {
        print_json(&citizen)
    } else {
        print_citizen_details(&citizen);
        Ok(())
    }
}

async fn execute_update(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "citizen")?;
    let update = CitizenUpdate {
        user_name: args.username,
        first_name: args.first_name,
        second_name: args.second_name,
        surname: args.surname,
        email: args.email,
        is_active: args.active,
    };
    ensure_changes(&update)?;
    update.validate()?;

    let client = ctx.client()?;
    let citizen = resource::update::<Citizen, _>(&client, id, &update).await?;

    if args.json {
        print_json(&citizen)
    } else {
        print_success("Citizen updated");
        print_citizen_details(&citizen);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "citizen")?;
    let client = ctx.client()?;
    let citizen = resource::get::<Citizen>(&client, id).await?;

    if !confirm(
        format!(
            "Delete citizen '{}'? Their requests and grants go with them.",
            citizen.full_name()
        ),
        args.force,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<Citizen>(&client, id).await?;
    print_success(&format!("Citizen deleted: {}", citizen.full_name()));
    Ok(())
}

fn print_citizen_details(citizen: &Citizen) {
    println!();
    print_key_value("ID", &citizen.id.to_string());
    print_key_value("Username", &citizen.user_name);
    print_key_value("Name", &citizen.full_name());
    print_key_value("National ID", &citizen.national_id);
    print_key_value("Date of birth", &format_date(citizen.dob));
    print_key_value("Email", &citizen.email);
    print_key_value("Verified", yes_no(citizen.email_verified));
    print_key_value("Active", yes_no(citizen.is_active));
    print_key_value("Second name", &or_dash(citizen.second_name.as_deref()));
    print_key_value("Created", &format_when(citizen.created));
    println!();
}

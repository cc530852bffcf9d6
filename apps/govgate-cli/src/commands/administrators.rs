//! Administrator account commands

use super::{confirm, or_dash, parse_uuid, ref_label, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_when, print_json, print_key_value, print_success, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{Administrator, NewAdministrator};

#[derive(Args, Debug)]
pub struct AdministratorsArgs {
    #[command(subcommand)]
    pub command: AdministratorsCommands,
}

#[derive(Subcommand, Debug)]
pub enum AdministratorsCommands {
    /// List administrators
    List(ListArgs),
    /// Show one administrator
    Get(GetArgs),
    /// Promote a citizen to administrator
    Create(CreateArgs),
    /// Remove an administrator
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

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
pub struct CreateArgs {
    pub username: String,

    /// Citizen account backing the administrator (ID)
    #[arg(long)]
    pub citizen: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub second_email: Option<String>,

    /// How many grantees the administrator may appoint (0-99)
    #[arg(long, default_value_t = 10)]
    pub grantee_limit: u32,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: AdministratorsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        AdministratorsCommands::List(a) => execute_list(a, ctx).await,
        AdministratorsCommands::Get(a) => execute_get(a, ctx).await,
        AdministratorsCommands::Create(a) => execute_create(a, ctx).await,
        AdministratorsCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut administrators = resource::list::<Administrator>(&client).await?;
    if let Some(query) = &args.search {
        administrators = filter_by_query(&administrators, query);
    }

    if args.json {
        return print_json(&administrators);
    }
    if administrators.is_empty() {
        println!("No administrators found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("USERNAME", 22),
        ("EMAIL", 30),
        ("LIMIT", 5),
    ]);
    for admin in &administrators {
        table.row(vec![
            admin.id.to_string(),
            admin.administrator_user_name.clone(),
            admin.first_email.clone(),
            admin
                .grantee_limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ]);
    }
    table.print();
    println!("\n{} administrator(s)", administrators.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "administrator")?;
    let client = ctx.client()?;
    let admin = resource::get::<Administrator>(&client, id).await?;

    if args.json {
        print_json(&admin)
    } else {
        print_administrator_details(&admin);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let admin = NewAdministrator {
        administrator_user_name: args.username.trim().to_string(),
        citizen: parse_uuid(&args.citizen, "citizen")?,
        first_email: args.email.trim().to_string(),
        second_email: args.second_email,
        grantee_limit: args.grantee_limit,
    };
    admin.validate()?;

    let client = ctx.client()?;
    let created = resource::create::<Administrator, _>(&client, &admin).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!(
            "Administrator created: {}",
            created.administrator_user_name
        ));
        print_administrator_details(&created);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "administrator")?;
    let client = ctx.client()?;
    let admin = resource::get::<Administrator>(&client, id).await?;

    if !confirm(
        format!("Remove administrator '{}'?", admin.administrator_user_name),
        args.force,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<Administrator>(&client, id).await?;
    print_success(&format!(
        "Administrator removed: {}",
        admin.administrator_user_name
    ));
    Ok(())
}

fn print_administrator_details(admin: &Administrator) {
    println!();
    print_key_value("ID", &admin.id.to_string());
    print_key_value("Username", &admin.administrator_user_name);
    print_key_value("Citizen", &ref_label(&admin.citizen));
    print_key_value("Email", &admin.first_email);
    print_key_value("Second email", &or_dash(admin.second_email.as_deref()));
    print_key_value(
        "Grantee limit",
        &admin
            .grantee_limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    print_key_value("Created", &format_when(admin.created));
    println!();
}

//! Grantee account commands

use super::{confirm, parse_uuid, ref_label, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_when, print_json, print_key_value, print_success, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{Grantee, NewGrantee};

#[derive(Args, Debug)]
pub struct GranteesArgs {
    #[command(subcommand)]
    pub command: GranteesCommands,
}

#[derive(Subcommand, Debug)]
pub enum GranteesCommands {
    /// List grantees
    List(ListArgs),
    /// Show one grantee
    Get(GetArgs),
    /// Make a citizen a grantee of an association
    Create(CreateArgs),
    /// Remove a grantee
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

    /// Citizen account backing the grantee (ID)
    #[arg(long)]
    pub citizen: String,

    /// Association the grantee works for (ID)
    #[arg(long)]
    pub association: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: GranteesArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        GranteesCommands::List(a) => execute_list(a, ctx).await,
        GranteesCommands::Get(a) => execute_get(a, ctx).await,
        GranteesCommands::Create(a) => execute_create(a, ctx).await,
        GranteesCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut grantees = resource::list::<Grantee>(&client).await?;
    if let Some(query) = &args.search {
        grantees = filter_by_query(&grantees, query);
    }

    if args.json {
        return print_json(&grantees);
    }
    if grantees.is_empty() {
        println!("No grantees found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("USERNAME", 20),
        ("CITIZEN", 20),
        ("ASSOCIATION", 26),
    ]);
    for grantee in &grantees {
        table.row(vec![
            grantee.id.to_string(),
            grantee.grantee_user_name.clone(),
            ref_label(&grantee.citizen),
            ref_label(&grantee.association),
        ]);
    }
    table.print();
    println!("\n{} grantee(s)", grantees.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "grantee")?;
    let client = ctx.client()?;
    let grantee = resource::get::<Grantee>(&client, id).await?;

    if args.json {
        print_json(&grantee)
    } else {
        print_grantee_details(&grantee);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let grantee = NewGrantee {
        grantee_user_name: args.username.trim().to_string(),
        citizen: parse_uuid(&args.citizen, "citizen")?,
        association: parse_uuid(&args.association, "association")?,
    };
    grantee.validate()?;

    let client = ctx.client()?;
    let created = resource::create::<Grantee, _>(&client, &grantee).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Grantee created: {}", created.grantee_user_name));
        print_grantee_details(&created);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "grantee")?;
    let client = ctx.client()?;
    let grantee = resource::get::<Grantee>(&client, id).await?;

    if !confirm(
        format!("Remove grantee '{}'?", grantee.grantee_user_name),
        args.force,
    )? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<Grantee>(&client, id).await?;
    print_success(&format!("Grantee removed: {}", grantee.grantee_user_name));
    Ok(())
}

fn print_grantee_details(grantee: &Grantee) {
    println!();
    print_key_value("ID", &grantee.id.to_string());
    print_key_value("Username", &grantee.grantee_user_name);
    print_key_value("Citizen", &ref_label(&grantee.citizen));
    print_key_value("Association", &ref_label(&grantee.association));
    print_key_value("Created", &format_when(grantee.created));
    println!();
}

//! Association management commands

use super::{confirm, ensure_changes, parse_uuid, ref_label, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_when, print_json, print_key_value, print_success, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{Association, AssociationUpdate, NewAssociation};
use uuid::Uuid;

#[derive(Args, Debug)]
pub struct AssociationsArgs {
    #[command(subcommand)]
    pub command: AssociationsCommands,
}

#[derive(Subcommand, Debug)]
pub enum AssociationsCommands {
    /// List associations
    List(ListArgs),
    /// Show one association
    Get(GetArgs),
    /// Create an association
    Create(CreateArgs),
    /// Change association fields
    Update(UpdateArgs),
    /// Delete an association
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
    pub title: String,

    #[arg(long)]
    pub email: String,

    /// Parent department (ID)
    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub administrator: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub department: Option<String>,

    #[arg(long)]
    pub administrator: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: AssociationsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        AssociationsCommands::List(a) => execute_list(a, ctx).await,
        AssociationsCommands::Get(a) => execute_get(a, ctx).await,
        AssociationsCommands::Create(a) => execute_create(a, ctx).await,
        AssociationsCommands::Update(a) => execute_update(a, ctx).await,
        AssociationsCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

fn optional_id(value: Option<&str>, resource: &str) -> CliResult<Option<Uuid>> {
    value.map(|v| parse_uuid(v, resource)).transpose()
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut associations = resource::list::<Association>(&client).await?;
    if let Some(query) = &args.search {
        associations = filter_by_query(&associations, query);
    }

    if args.json {
        return print_json(&associations);
    }
    if associations.is_empty() {
        println!("No associations found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("TITLE", 28),
        ("DEPARTMENT", 24),
        ("EMAIL", 30),
    ]);
    for association in &associations {
        table.row(vec![
            association.id.to_string(),
            association.title.clone(),
            ref_label(&association.department),
            association.email.clone(),
        ]);
    }
    table.print();
    println!("\n{} association(s)", associations.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "association")?;
    let client = ctx.client()?;
    let association = resource::get::<Association>(&client, id).await?;

    if args.json {
        print_json(&association)
    } else {
        print_association_details(&association);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let association = NewAssociation {
        title: args.title.trim().to_string(),
        email: args.email.trim().to_string(),
        department: optional_id(args.department.as_deref(), "department")?,
        administrator: optional_id(args.administrator.as_deref(), "administrator")?,
        website: args.website,
        description: args.description,
    };
    association.validate()?;

    let client = ctx.client()?;
    let created = resource::create::<Association, _>(&client, &association).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Association created: {}", created.title));
        print_association_details(&created);
        Ok(())
    }
}

async fn execute_update(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "association")?;
    let update = AssociationUpdate {
        title: args.title,
        email: args.email,
        department: optional_id(args.department.as_deref(), "department")?,
        administrator: optional_id(args.administrator.as_deref(), "administrator")?,
        website: args.website,
        description: args.description,
    };
    ensure_changes(&update)?;
    update.validate()?;

    let client = ctx.client()?;
    let association = resource::update::<Association, _>(&client, id, &update).await?;

    if args.json {
        print_json(&association)
    } else {
        print_success("Association updated");
        print_association_details(&association);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "association")?;
    let client = ctx.client()?;
    let association = resource::get::<Association>(&client, id).await?;

    if !confirm(format!("Delete association '{}'?", association.title), args.force)? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<Association>(&client, id).await?;
    print_success(&format!("Association deleted: {}", association.title));
    Ok(())
}

fn print_association_details(association: &Association) {
    println!();
    print_key_value("ID", &association.id.to_string());
    print_key_value("Title", &association.title);
    print_key_value("Email", &association.email);
    print_key_value("Department", &ref_label(&association.department));
    print_key_value("Administrator", &ref_label(&association.administrator));
    print_key_value("Website", association.website.as_deref().unwrap_or("-"));
    print_key_value(
        "Description",
        association.description.as_deref().unwrap_or("-"),
    );
    print_key_value("Created", &format_when(association.created));
    println!();
}

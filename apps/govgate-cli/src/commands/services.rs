//! Public service management commands

use super::{confirm, ensure_changes, parse_uuid, parse_uuid_list, ref_label, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_when, print_json, print_key_value, print_success, yes_no, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{NewPublicService, PublicService, PublicServiceUpdate};

#[derive(Args, Debug)]
pub struct ServicesArgs {
    #[command(subcommand)]
    pub command: ServicesCommands,
}

#[derive(Subcommand, Debug)]
pub enum ServicesCommands {
    /// List public services
    List(ListArgs),
    /// Show one service
    Get(GetArgs),
    /// Create a service
    Create(CreateArgs),
    /// Change service fields
    Update(UpdateArgs),
    /// Delete a service
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Include services hidden from citizens
    #[arg(long)]
    pub all: bool,

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

    /// Stable identifier, e.g. `drivers-licence-renewal`
    #[arg(long)]
    pub machine_name: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub email: String,

    /// Owning association (ID)
    #[arg(long)]
    pub association: String,

    /// Grantees handling the service (comma-separated IDs)
    #[arg(long)]
    pub grantees: Option<String>,

    #[arg(long)]
    pub url: String,

    /// Require a permission before citizens can request the service
    #[arg(long)]
    pub restricted: bool,

    /// Hide the service from citizens
    #[arg(long)]
    pub hidden: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Replace the grantee list (comma-separated IDs)
    #[arg(long)]
    pub grantees: Option<String>,

    #[arg(long)]
    pub url: Option<String>,

    #[arg(long)]
    pub restricted: Option<bool>,

    #[arg(long)]
    pub visible: Option<bool>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: ServicesArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        ServicesCommands::List(a) => execute_list(a, ctx).await,
        ServicesCommands::Get(a) => execute_get(a, ctx).await,
        ServicesCommands::Create(a) => execute_create(a, ctx).await,
        ServicesCommands::Update(a) => execute_update(a, ctx).await,
        ServicesCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut services = resource::list::<PublicService>(&client).await?;
    if !args.all {
        services.retain(|service| service.visibility);
    }
    if let Some(query) = &args.search {
        services = filter_by_query(&services, query);
    }

    if args.json {
        return print_json(&services);
    }
    if services.is_empty() {
        println!("No services found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("TITLE", 30),
        ("ASSOCIATION", 24),
        ("RESTRICTED", 10),
    ]);
    for service in &services {
        table.row(vec![
            service.id.to_string(),
            service.title.clone(),
            ref_label(&service.association),
            yes_no(service.restricted).to_string(),
        ]);
    }
    table.print();
    println!("\n{} service(s)", services.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "service")?;
    let client = ctx.client()?;
    let service = resource::get::<PublicService>(&client, id).await?;

    if args.json {
        print_json(&service)
    } else {
        print_service_details(&service);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let service = NewPublicService {
        title: args.title.trim().to_string(),
        machine_name: args.machine_name.trim().to_string(),
        description: args.description.trim().to_string(),
        email: args.email.trim().to_string(),
        association: parse_uuid(&args.association, "association")?,
        grantee: match args.grantees.as_deref() {
            Some(list) => parse_uuid_list(list, "grantee")?,
            None => Vec::new(),
        },
        restricted: args.restricted,
        url: args.url.trim().to_string(),
        visibility: !args.hidden,
    };
    service.validate()?;

    let client = ctx.client()?;
    let created = resource::create::<PublicService, _>(&client, &service).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Service created: {}", created.title));
        print_service_details(&created);
        Ok(())
    }
}

async fn execute_update(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "service")?;
    let update = PublicServiceUpdate {
        title: args.title,
        description: args.description,
        email: args.email,
        grantee: args
            .grantees
            .as_deref()
            .map(|list| parse_uuid_list(list, "grantee"))
            .transpose()?,
        restricted: args.restricted,
        url: args.url,
        visibility: args.visible,
    };
    ensure_changes(&update)?;
    update.validate()?;

    let client = ctx.client()?;
    let service = resource::update::<PublicService, _>(&client, id, &update).await?;

    if args.json {
        print_json(&service)
    } else {
        print_success("Service updated");
        print_service_details(&service);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "service")?;
    let client = ctx.client()?;
    let service = resource::get::<PublicService>(&client, id).await?;

    if !confirm(format!("Delete service '{}'?", service.title), args.force)? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<PublicService>(&client, id).await?;
    print_success(&format!("Service deleted: {}", service.title));
    Ok(())
}

fn print_service_details(service: &PublicService) {
    println!();
    print_key_value("ID", &service.id.to_string());
    print_key_value("Title", &service.title);
    print_key_value("Machine name", &service.machine_name);
    print_key_value("Description", &service.description);
    print_key_value("Email", &service.email);
    print_key_value("URL", service.url.as_deref().unwrap_or("-"));
    print_key_value("Association", &ref_label(&service.association));
    let grantees: Vec<String> = service.grantee.iter().map(|g| g.label()).collect();
    print_key_value(
        "Grantees",
        &if grantees.is_empty() {
            "-".to_string()
        } else {
            grantees.join(", ")
        },
    );
    print_key_value("Restricted", yes_no(service.restricted));
    print_key_value("Visible", yes_no(service.visibility));
    print_key_value("Created", &format_when(service.created));
    println!();
}

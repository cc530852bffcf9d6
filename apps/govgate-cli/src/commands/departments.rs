//! Department management commands

use super::{confirm, ensure_changes, parse_uuid, ref_label, Context};
use crate::api::resource;
use crate::error::CliResult;
use crate::output::{format_when, print_json, print_key_value, print_success, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{Department, DepartmentUpdate, NewDepartment};

#[derive(Args, Debug)]
pub struct DepartmentsArgs {
    #[command(subcommand)]
    pub command: DepartmentsCommands,
}

#[derive(Subcommand, Debug)]
pub enum DepartmentsCommands {
    /// List departments
    List(ListArgs),
    /// Show one department
    Get(GetArgs),
    /// Create a department
    Create(CreateArgs),
    /// Change department fields
    Update(UpdateArgs),
    /// Delete a department
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Case-insensitive filter on title, description and contact details
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

    /// Administrator responsible for the department (ID)
    #[arg(long)]
    pub administrator: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub telephone: String,

    #[arg(long)]
    pub website: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub administrator: Option<String>,

    #[arg(long)]
    pub description: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub telephone: Option<String>,

    #[arg(long)]
    pub website: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    pub id: String,

    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: DepartmentsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        DepartmentsCommands::List(a) => execute_list(a, ctx).await,
        DepartmentsCommands::Get(a) => execute_get(a, ctx).await,
        DepartmentsCommands::Create(a) => execute_create(a, ctx).await,
        DepartmentsCommands::Update(a) => execute_update(a, ctx).await,
        DepartmentsCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut departments = resource::list::<Department>(&client).await?;
    if let Some(query) = &args.search {
        departments = filter_by_query(&departments, query);
    }

    if args.json {
        print_json(&departments)
    } else if departments.is_empty() {
        println!("No departments found.");
        Ok(())
    } else {
        print_department_table(&departments);
        println!("\n{} department(s)", departments.len());
        Ok(())
    }
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "department")?;
    let client = ctx.client()?;
    let department = resource::get::<Department>(&client, id).await?;

    if args.json {
        print_json(&department)
    } else {
        print_department_details(&department);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let department = NewDepartment {
        title: args.title.trim().to_string(),
        administrator: parse_uuid(&args.administrator, "administrator")?,
        description: args.description.trim().to_string(),
        email: args.email.trim().to_string(),
        telephone: args.telephone.trim().to_string(),
        website: args.website.trim().to_string(),
    };
    department.validate()?;

    let client = ctx.client()?;
    let created = resource::create::<Department, _>(&client, &department).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Department created: {}", created.title));
        print_department_details(&created);
        Ok(())
    }
}

async fn execute_update(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "department")?;
    let update = DepartmentUpdate {
        title: args.title,
        administrator: args
            .administrator
            .as_deref()
            .map(|a| parse_uuid(a, "administrator"))
            .transpose()?,
        description: args.description,
        email: args.email,
        telephone: args.telephone,
        website: args.website,
    };
    ensure_changes(&update)?;
    update.validate()?;

    let client = ctx.client()?;
    let department = resource::update::<Department, _>(&client, id, &update).await?;

    if args.json {
        print_json(&department)
    } else {
        print_success("Department updated");
        print_department_details(&department);
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "department")?;
    let client = ctx.client()?;
    let department = resource::get::<Department>(&client, id).await?;

    if !confirm(format!("Delete department '{}'?", department.title), args.force)? {
        println!("Cancelled.");
        return Ok(());
    }

    resource::delete::<Department>(&client, id).await?;
    print_success(&format!("Department deleted: {}", department.title));
    Ok(())
}

fn print_department_table(departments: &[Department]) {
    let mut table = Table::new(&[
        ("ID", 36),
        ("TITLE", 28),
        ("EMAIL", 30),
        ("TELEPHONE", 16),
    ]);
    for department in departments {
        table.row(vec![
            department.id.to_string(),
            department.title.clone(),
            department.email.clone(),
            department.telephone.clone(),
        ]);
    }
    table.print();
}

fn print_department_details(department: &Department) {
    println!();
    print_key_value("ID", &department.id.to_string());
    print_key_value("Title", &department.title);
    print_key_value("Description", &department.description);
    print_key_value("Email", &department.email);
    print_key_value("Telephone", &department.telephone);
    print_key_value("Website", department.website.as_deref().unwrap_or("-"));
    print_key_value("Administrator", &ref_label(&department.administrator));
    print_key_value("Created", &format_when(department.created));
    print_key_value("Updated", &format_when(department.updated));
    println!();
}

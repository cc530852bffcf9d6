//! Permission commands - time-boxed access windows on departments,
//! associations and services

use super::{confirm, parse_optional_when, parse_uuid, parse_uuid_list, Context};
use crate::api;
use crate::error::{CliError, CliResult};
use crate::output::{
    format_when, print_json, print_key_value, print_success, truncate, yes_no, Table,
};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Subcommand};
use govgate_core::models::{NewPermission, Permission, PermissionScope};
use govgate_core::{filter_by_query, PermissionWindow};

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    #[command(subcommand)]
    pub command: PermissionsCommands,
}

#[derive(Subcommand, Debug)]
pub enum PermissionsCommands {
    /// List permissions in one scope
    List(ListArgs),
    /// Show one permission
    Get(GetArgs),
    /// Open a permission window
    Create(CreateArgs),
    /// Delete a permission
    Delete(DeleteArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// department, association or service
    #[arg(long)]
    pub scope: PermissionScope,

    /// Only permissions that are active and open right now
    #[arg(long)]
    pub open_only: bool,

    #[arg(long, short = 's')]
    pub search: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    #[arg(long)]
    pub scope: PermissionScope,

    pub id: String,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub scope: PermissionScope,

    /// ID of the department, association or service
    #[arg(long)]
    pub target: String,

    #[arg(long)]
    pub name: String,

    #[arg(long, default_value = "")]
    pub description: String,

    /// Window start (defaults to now)
    #[arg(long)]
    pub start: Option<String>,

    /// Window end
    #[arg(long, conflicts_with = "days")]
    pub end: Option<String>,

    /// Window length in days from the start
    #[arg(long)]
    pub days: Option<i64>,

    /// Comma-separated citizen IDs covered by the permission
    #[arg(long)]
    pub citizens: Option<String>,

    /// Create the permission switched off
    #[arg(long)]
    pub inactive: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    #[arg(long)]
    pub scope: PermissionScope,

    pub id: String,

    /// Skip the confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn execute(args: PermissionsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        PermissionsCommands::List(a) => execute_list(a, ctx).await,
        PermissionsCommands::Get(a) => execute_get(a, ctx).await,
        PermissionsCommands::Create(a) => execute_create(a, ctx).await,
        PermissionsCommands::Delete(a) => execute_delete(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let now = Utc::now();

    let mut permissions = api::list_permissions(&client, args.scope).await?;
    if args.open_only {
        permissions.retain(|p| p.is_effective(now));
    }
    if let Some(query) = &args.search {
        permissions = filter_by_query(&permissions, query);
    }

    if args.json {
        return print_json(&permissions);
    }
    if permissions.is_empty() {
        println!("No {} permissions found.", args.scope);
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("NAME", 24),
        ("TARGET", 22),
        ("STARTS", 16),
        ("ENDS", 16),
        ("OPEN", 4),
    ]);
    for permission in &permissions {
        table.row(vec![
            permission.id.to_string(),
            permission.name.clone(),
            permission.target_label(),
            format_when(permission.start_time),
            format_when(permission.end_time),
            yes_no(permission.is_effective(now)).to_string(),
        ]);
    }
    table.print();
    println!("\n{} permission(s)", permissions.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "permission")?;
    let client = ctx.client()?;
    let permission = api::get_permission(&client, args.scope, id).await?;

    if args.json {
        print_json(&permission)
    } else {
        print_permission_details(&permission, Utc::now());
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let target = parse_uuid(&args.target, args.scope.segment())?;
    let start = parse_optional_when(args.start.as_deref(), "start time")?.unwrap_or_else(Utc::now);
    let window = build_window(start, args.end.as_deref(), args.days)?;

    let mut permission =
        NewPermission::new(args.scope, target, args.name.trim(), args.description.trim(), window);
    if let Some(list) = &args.citizens {
        permission = permission.with_citizens(parse_uuid_list(list, "citizen")?);
    }
    permission.active = !args.inactive;

    let client = ctx.client()?;
    let created = api::create_permission(&client, args.scope, &permission).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Permission created: {}", created.name));
        print_permission_details(&created, Utc::now());
        Ok(())
    }
}

async fn execute_delete(args: DeleteArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "permission")?;
    if !confirm(format!("Delete {} permission {id}?", args.scope), args.force)? {
        println!("Cancelled.");
        return Ok(());
    }

    let client = ctx.client()?;
    api::delete_permission(&client, args.scope, id).await?;
    print_success(&format!("Permission {id} deleted"));
    Ok(())
}

/// Window from `start`: an explicit end, `days` later, or the default length.
fn build_window(
    start: DateTime<Utc>,
    end: Option<&str>,
    days: Option<i64>,
) -> CliResult<PermissionWindow> {
    if let Some(end) = parse_optional_when(end, "end time")? {
        return Ok(PermissionWindow::new(start, end)?);
    }
    match days {
        Some(days) if days <= 0 => Err(CliError::Validation(
            "--days must be at least 1".to_string(),
        )),
        Some(days) => Ok(PermissionWindow::new(start, start + Duration::days(days))?),
        None => Ok(PermissionWindow::starting_at(start)),
    }
}

fn print_permission_details(permission: &Permission, now: DateTime<Utc>) {
    println!();
    print_key_value("ID", &permission.id.to_string());
    print_key_value("Name", &permission.name);
    if !permission.description.is_empty() {
        print_key_value("Description", &truncate(&permission.description, 200));
    }
    print_key_value("Target", &permission.target_label());
    print_key_value("Starts", &format_when(permission.start_time));
    print_key_value("Ends", &format_when(permission.end_time));
    print_key_value("Active", yes_no(permission.active != Some(false)));
    print_key_value("Open now", yes_no(permission.is_effective(now)));
    if let Some(remaining) = permission.window().and_then(|w| w.remaining(now)) {
        print_key_value("Remaining", &format!("{} day(s)", remaining.num_days()));
    }
    print_key_value("Citizens", &permission.citizens.len().to_string());
    if !permission.grantee.is_empty() {
        let grantees: Vec<String> = permission.grantee.iter().map(|g| g.label()).collect();
        print_key_value("Grantee", &grantees.join(", "));
    }
    println!();
}

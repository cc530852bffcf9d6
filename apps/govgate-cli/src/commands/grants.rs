//! Grant commands - review and decide grants

use super::{parse_optional_when, parse_uuid, Context};
use crate::api::dashboard::log_conflicts;
use crate::api::{self, resource};
use crate::error::CliResult;
use crate::output::{format_date, format_when, print_json, print_key_value, print_success, Table};
use chrono::{DateTime, Utc};
use clap::{ArgGroup, Args, Subcommand};
use govgate_core::models::{Grant, GrantUpdate};
use govgate_core::{filter_by_query, filter_by_status, GrantStatus};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct GrantsArgs {
    #[command(subcommand)]
    pub command: GrantsCommands,
}

#[derive(Subcommand, Debug)]
pub enum GrantsCommands {
    /// List grants visible to the current role
    List(ListArgs),
    /// Show one grant
    Get(GetArgs),
    /// Approve or decline a grant
    Decide(DecideArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// pending, active, expired or declined
    #[arg(long)]
    pub status: Option<String>,

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
#[command(group(ArgGroup::new("decision").required(true).args(["approve", "decline"])))]
pub struct DecideArgs {
    pub id: String,

    #[arg(long)]
    pub approve: bool,

    #[arg(long)]
    pub decline: bool,

    /// Access starts (defaults to now when approving)
    #[arg(long, conflicts_with = "decline")]
    pub start: Option<String>,

    /// Access ends; open-ended when omitted
    #[arg(long, conflicts_with = "decline")]
    pub end: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: GrantsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        GrantsCommands::List(a) => execute_list(a, ctx).await,
        GrantsCommands::Get(a) => execute_get(a, ctx).await,
        GrantsCommands::Decide(a) => execute_decide(a, ctx).await,
    }
}

/// A grant with its derived status, for `--json` output.
#[derive(Serialize)]
struct GrantView<'a> {
    #[serde(flatten)]
    grant: &'a Grant,
    status: GrantStatus,
}

impl<'a> GrantView<'a> {
    fn new(grant: &'a Grant, now: DateTime<Utc>) -> Self {
        Self {
            grant,
            status: GrantStatus::of(grant, now),
        }
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let status = args
        .status
        .as_deref()
        .map(str::parse::<GrantStatus>)
        .transpose()?;
    let client = ctx.client()?;
    let now = Utc::now();

    let mut grants = resource::list::<Grant>(&client).await?;
    log_conflicts("grant", &grants, now);
    if let Some(query) = &args.search {
        grants = filter_by_query(&grants, query);
    }
    if let Some(status) = status {
        grants = filter_by_status(&grants, status, now);
    }

    if args.json {
        let views: Vec<GrantView> = grants.iter().map(|g| GrantView::new(g, now)).collect();
        return print_json(&views);
    }
    if grants.is_empty() {
        println!("No grants found.");
        return Ok(());
    }

    let mut table = Table::new(&[
        ("ID", 36),
        ("REQUEST", 26),
        ("GRANTEE", 16),
        ("STATUS", 8),
        ("START", 10),
        ("END", 10),
    ]);
    for grant in &grants {
        table.row(vec![
            grant.id.to_string(),
            grant.request_label(),
            grant.grantee_label(),
            GrantStatus::of(grant, now).label().to_string(),
            format_date(grant.start_date),
            format_date(grant.end_date),
        ]);
    }
    table.print();
    println!("\n{} grant(s)", grants.len());
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "grant")?;
    let client = ctx.client()?;
    let grant = resource::get::<Grant>(&client, id).await?;

    let now = Utc::now();
    if args.json {
        print_json(&GrantView::new(&grant, now))
    } else {
        print_grant_details(&grant, now);
        Ok(())
    }
}

async fn execute_decide(args: DecideArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "grant")?;
    let mut update = if args.approve {
        let start = parse_optional_when(args.start.as_deref(), "start date")?
            .unwrap_or_else(Utc::now);
        let end = parse_optional_when(args.end.as_deref(), "end date")?;
        GrantUpdate::approve(start, end)
    } else {
        GrantUpdate::decline()
    };
    if let Some(message) = args.message {
        update = update.with_message(message.trim());
    }

    let client = ctx.client()?;
    let grant = api::decide_grant(&client, id, &update).await?;

    let now = Utc::now();
    if args.json {
        print_json(&GrantView::new(&grant, now))
    } else {
        let verb = if args.approve { "approved" } else { "declined" };
        print_success(&format!("Grant {verb}"));
        print_grant_details(&grant, now);
        Ok(())
    }
}

fn print_grant_details(grant: &Grant, now: DateTime<Utc>) {
    println!();
    print_key_value("ID", &grant.id.to_string());
    print_key_value("Request", &grant.request_label());
    print_key_value("Grantee", &grant.grantee_label());
    print_key_value("Status", GrantStatus::of(grant, now).label());
    print_key_value("Start", &format_date(grant.start_date));
    print_key_value("End", &format_date(grant.end_date));
    if !grant.message.is_empty() {
        print_key_value("Message", &grant.message);
    }
    print_key_value("Updated", &format_when(grant.updated));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
    }

    fn grant(json: serde_json::Value) -> Grant {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_grant_view_carries_derived_status() {
        let declined = grant(serde_json::json!({
            "id": "550e8400e29b41d4a716446655440000",
            "Decline": true
        }));
        let json = serde_json::to_value(GrantView::new(&declined, now())).unwrap();
        assert_eq!(json["status"], "declined");
        assert_eq!(json["Decline"], true);
        assert_eq!(json["id"], "550e8400-e29b-41d4-a716-446655440000");

        let expired = grant(serde_json::json!({
            "id": "550e8400e29b41d4a716446655440000",
            "StartDate": "2026-01-01",
            "EndDate": "2026-02-01"
        }));
        let json = serde_json::to_value(GrantView::new(&expired, now())).unwrap();
        assert_eq!(json["status"], "expired");
    }
}

//! Audit log commands

use super::{or_dash, Context};
use crate::api;
use crate::error::CliResult;
use crate::output::{format_when, print_json, truncate, Table};
use clap::{Args, Subcommand};
use govgate_core::filter_by_query;
use govgate_core::models::{most_recent, LogKind};

#[derive(Args, Debug)]
pub struct LogsArgs {
    #[command(subcommand)]
    pub command: LogsCommands,
}

#[derive(Subcommand, Debug)]
pub enum LogsCommands {
    /// Show the newest entries of one audit trail
    List(ListArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// citizen, grantee, administrator or manager
    #[arg(long)]
    pub kind: LogKind,

    /// Maximum entries to show
    #[arg(long, default_value = "50")]
    pub limit: usize,

    #[arg(long, short = 's')]
    pub search: Option<String>,

    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: LogsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        LogsCommands::List(a) => execute_list(a, ctx).await,
    }
}

async fn execute_list(args: ListArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let mut entries = api::list_logs(&client, args.kind).await?;
    if let Some(query) = &args.search {
        entries = filter_by_query(&entries, query);
    }
    let entries = most_recent(entries, args.limit);

    if args.json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("No {} log entries found.", args.kind);
        return Ok(());
    }

    let mut table = Table::new(&[
        ("WHEN", 16),
        ("METHOD", 6),
        ("OBJECT", 14),
        ("STATUS", 6),
        ("BY", 16),
        ("CITIZEN", 20),
        ("IP", 15),
    ]);
    for entry in &entries {
        table.row(vec![
            format_when(entry.created),
            entry.method.clone(),
            truncate(&entry.object, 14),
            entry
                .status_code
                .map_or_else(|| "-".to_string(), |code| code.to_string()),
            or_dash(entry.actor()),
            entry.citizen_label(),
            or_dash(entry.ip_address.as_deref()),
        ]);
    }
    table.print();
    Ok(())
}

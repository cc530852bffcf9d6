//! Dashboard command - role overview

use super::Context;
use crate::api::{self, DashboardSummary};
use crate::error::CliResult;
use crate::output::{format_when, print_header, print_json, truncate, Table};
use clap::Args;
use govgate_core::GrantStatus;

#[derive(Args, Debug)]
pub struct DashboardArgs {
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: DashboardArgs, ctx: &Context) -> CliResult<()> {
    let client = ctx.client()?;
    let summary = api::load_dashboard(&client).await?;

    if args.json {
        print_json(&summary)
    } else {
        print_summary(&summary);
        Ok(())
    }
}

fn print_summary(summary: &DashboardSummary) {
    print_header(&format!("{} dashboard", summary.role.title()));

    let mut totals = Table::new(&[("COLLECTION", 16), ("COUNT", 8)]);
    for entry in &summary.collections {
        totals.row(vec![entry.name.to_string(), entry.count.to_string()]);
    }
    totals.print();

    println!();
    let mut statuses = Table::new(&[("STATUS", 10), ("REQUESTS", 10), ("GRANTS", 8)]);
    for status in GrantStatus::ALL {
        statuses.row(vec![
            status.label().to_string(),
            summary.requests.get(status).to_string(),
            summary.grants.get(status).to_string(),
        ]);
    }
    statuses.print();

    if !summary.recent_logs.is_empty() {
        print_header("Recent activity");
        let mut logs = Table::new(&[("WHEN", 16), ("METHOD", 7), ("OBJECT", 20), ("BY", 20)]);
        for entry in &summary.recent_logs {
            logs.row(vec![
                format_when(entry.created),
                entry.method.clone(),
                truncate(&entry.object, 20),
                entry
                    .actor()
                    .map(str::to_string)
                    .unwrap_or_else(|| entry.citizen_label()),
            ]);
        }
        logs.print();
    }
    println!();
}

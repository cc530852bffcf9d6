//! Request commands - the citizen application workflow
//!
//! Citizens create and amend their requests; grantees and administrators
//! approve or reject them. Status is derived locally from the decision
//! fields at the time of the call.

use super::{ensure_changes, parse_optional_when, parse_uuid, ref_label, Context};
use crate::api::dashboard::log_conflicts;
use crate::api::{self, resource, RetryPolicy};
use crate::error::CliResult;
use crate::output::{
    format_date, format_when, print_json, print_key_value, print_success, truncate, Table,
};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};
use govgate_core::models::{DecisionPayload, NewRequest, Request, RequestUpdate};
use govgate_core::{filter_by_query, filter_by_status, GrantStatus, StatusCounts};
use serde::Serialize;

#[derive(Args, Debug)]
pub struct RequestsArgs {
    #[command(subcommand)]
    pub command: RequestsCommands,
}

#[derive(Subcommand, Debug)]
pub enum RequestsCommands {
    /// List requests visible to the current role
    List(ListArgs),
    /// Show one request
    Get(GetArgs),
    /// Submit a request for a public service
    Create(CreateArgs),
    /// Amend a request's subject, message or service
    Update(UpdateArgs),
    /// Approve a request
    Approve(ApproveArgs),
    /// Reject a request
    Reject(RejectArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Filter on subject, message and service
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

    /// Fail on the first 404 instead of retrying
    #[arg(long)]
    pub no_retry: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,

    /// Public service requested (ID)
    #[arg(long)]
    pub service: String,

    #[arg(long)]
    pub priority: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    pub id: String,

    #[arg(long)]
    pub subject: Option<String>,

    #[arg(long)]
    pub message: Option<String>,

    #[arg(long)]
    pub service: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ApproveArgs {
    pub id: String,

    /// Note for the citizen
    #[arg(long, default_value = "")]
    pub message: String,

    /// Access starts (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub start: Option<String>,

    /// Access ends (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub end: Option<String>,

    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct RejectArgs {
    pub id: String,

    /// Reason given to the citizen
    #[arg(long, default_value = "")]
    pub message: String,

    #[arg(long)]
    pub json: bool,
}

/// A request with its derived status, for `--json` output.
#[derive(Serialize)]
struct RequestView<'a> {
    #[serde(flatten)]
    request: &'a Request,
    status: GrantStatus,
}

pub async fn execute(args: RequestsArgs, ctx: &Context) -> CliResult<()> {
    match args.command {
        RequestsCommands::List(a) => execute_list(a, ctx).await,
        RequestsCommands::Get(a) => execute_get(a, ctx).await,
        RequestsCommands::Create(a) => execute_create(a, ctx).await,
        RequestsCommands::Update(a) => execute_update(a, ctx).await,
        RequestsCommands::Approve(a) => execute_approve(a, ctx).await,
        RequestsCommands::Reject(a) => execute_reject(a, ctx).await,
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

    let mut requests = resource::list::<Request>(&client).await?;
    log_conflicts("request", &requests, now);
    if let Some(query) = &args.search {
        requests = filter_by_query(&requests, query);
    }
    if let Some(status) = status {
        requests = filter_by_status(&requests, status, now);
    }

    if args.json {
        let views: Vec<RequestView> = requests
            .iter()
            .map(|request| RequestView {
                request,
                status: GrantStatus::of(request, now),
            })
            .collect();
        return print_json(&views);
    }
    if requests.is_empty() {
        println!("No requests found.");
        return Ok(());
    }

    print_request_table(&requests, now);
    let counts = StatusCounts::tally(&requests, now);
    println!(
        "\n{} request(s): {} pending, {} active, {} expired, {} declined",
        counts.total(),
        counts.pending,
        counts.active,
        counts.expired,
        counts.declined
    );
    Ok(())
}

async fn execute_get(args: GetArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "request")?;
    let client = ctx.client()?;
    let policy = if args.no_retry {
        RetryPolicy::none()
    } else {
        RetryPolicy::not_found_detail()
    };

    let request = api::get_request_with_retry(&client, id, &policy).await?;
    let now = Utc::now();

    if args.json {
        print_json(&RequestView {
            request: &request,
            status: GrantStatus::of(&request, now),
        })
    } else {
        print_request_details(&request, now);
        Ok(())
    }
}

async fn execute_create(args: CreateArgs, ctx: &Context) -> CliResult<()> {
    let request = NewRequest {
        subject: args.subject,
        message: args.message,
        public_service: Some(parse_uuid(&args.service, "service")?),
        priority: args.priority,
        category: args.category,
    };

    let client = ctx.client()?;
    let created = api::create_request(&client, &request).await?;

    if args.json {
        print_json(&created)
    } else {
        print_success(&format!("Request submitted: {}", created.subject));
        print_request_details(&created, Utc::now());
        Ok(())
    }
}

async fn execute_update(args: UpdateArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "request")?;
    let update = RequestUpdate {
        subject: args.subject.map(|s| s.trim().to_string()),
        message: args.message.map(|s| s.trim().to_string()),
        public_service: args
            .service
            .as_deref()
            .map(|s| parse_uuid(s, "service"))
            .transpose()?,
    };
    ensure_changes(&update)?;

    let client = ctx.client()?;
    let request = api::update_request(&client, id, &update).await?;

    if args.json {
        print_json(&request)
    } else {
        print_success("Request updated");
        print_request_details(&request, Utc::now());
        Ok(())
    }
}

async fn execute_approve(args: ApproveArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "request")?;
    let payload = DecisionPayload {
        message: args.message.trim().to_string(),
        start_date: parse_optional_when(args.start.as_deref(), "start date")?,
        end_date: parse_optional_when(args.end.as_deref(), "end date")?,
    };

    let client = ctx.client()?;
    let response = api::approve(&client, id, &payload).await?;

    if args.json {
        print_json(&response)
    } else {
        print_success(&format!("Request {id} approved"));
        Ok(())
    }
}

async fn execute_reject(args: RejectArgs, ctx: &Context) -> CliResult<()> {
    let id = parse_uuid(&args.id, "request")?;
    let payload = DecisionPayload {
        message: args.message.trim().to_string(),
        start_date: None,
        end_date: None,
    };

    let client = ctx.client()?;
    let response = api::reject(&client, id, &payload).await?;

    if args.json {
        print_json(&response)
    } else {
        print_success(&format!("Request {id} rejected"));
        Ok(())
    }
}

fn print_request_table(requests: &[Request], now: DateTime<Utc>) {
    let mut table = Table::new(&[
        ("ID", 36),
        ("SUBJECT", 30),
        ("SERVICE", 22),
        ("STATUS", 8),
        ("CREATED", 10),
    ]);
    for request in requests {
        table.row(vec![
            request.id.to_string(),
            request.subject.clone(),
            request.service_label(),
            GrantStatus::of(request, now).label().to_string(),
            format_date(request.created),
        ]);
    }
    table.print();
}

fn print_request_details(request: &Request, now: DateTime<Utc>) {
    println!();
    print_key_value("ID", &request.id.to_string());
    print_key_value("Subject", &request.subject);
    print_key_value("Message", &truncate(&request.message, 200));
    print_key_value("Service", &request.service_label());
    print_key_value("Citizen", &request.citizen_label());
    print_key_value("Status", GrantStatus::of(request, now).label());
    print_key_value("Grant", &ref_label(&request.grant));
    print_key_value("Start", &format_date(request.start_date));
    print_key_value("End", &format_date(request.end_date));
    if let Some(priority) = &request.priority {
        print_key_value("Priority", priority);
    }
    if let Some(category) = &request.category {
        print_key_value("Category", category);
    }
    print_key_value("Created", &format_when(request.created));
    print_key_value("Updated", &format_when(request.updated));
    println!();
}

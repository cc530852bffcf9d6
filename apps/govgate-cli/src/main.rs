//! govgate - command-line client for the government-service access backend
//!
//! One client for every dashboard role:
//! - Citizens register, submit requests and follow their grants
//! - Grantees review requests and decide grants
//! - Administrators manage departments, associations, services and staff
//! - Site managers oversee everything, including the audit trails

use clap::{Parser, Subcommand};
use govgate_cli::commands::{self, Context};
use govgate_cli::error::CliResult;
use govgate_cli::logging::{self, LogConfig};
use govgate_core::Role;
use std::path::PathBuf;

/// govgate - government service access from the terminal
#[derive(Parser)]
#[command(name = "govgate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Act as this role instead of the one stored with the session
    /// (citizen, grantee, admin, manager)
    #[arg(long, global = true, env = "GOVGATE_ROLE")]
    role: Option<Role>,

    /// Informational logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Debug logging, including request timings
    #[arg(long, global = true)]
    debug: bool,

    /// Trace logging, including redacted request bodies
    #[arg(long, global = true)]
    trace: bool,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with_all = ["verbose", "debug", "trace"])]
    quiet: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in as citizen, grantee, admin or manager
    Login(commands::login::LoginArgs),

    /// Clear the stored session and tokens
    Logout(commands::logout::LogoutArgs),

    /// Show the logged-in account and role
    Whoami(commands::whoami::WhoamiArgs),

    /// Create a citizen account
    Register(commands::register::RegisterArgs),

    /// View or edit your own profile
    Profile(commands::profile::ProfileArgs),

    /// Manage departments
    Departments(commands::departments::DepartmentsArgs),

    /// Manage associations
    Associations(commands::associations::AssociationsArgs),

    /// Manage public services
    Services(commands::services::ServicesArgs),

    /// Manage citizen accounts
    Citizens(commands::citizens::CitizensArgs),

    /// Manage grantees
    Grantees(commands::grantees::GranteesArgs),

    /// Manage administrators
    Administrators(commands::administrators::AdministratorsArgs),

    /// Submit, review and decide service requests
    Requests(commands::requests::RequestsArgs),

    /// Review and decide grants
    Grants(commands::grants::GrantsArgs),

    /// Manage time-boxed permissions
    Permissions(commands::permissions::PermissionsArgs),

    /// Read audit trails
    Logs(commands::logs::LogsArgs),

    /// Role overview with request and grant status counts
    Dashboard(commands::dashboard::DashboardArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_config = LogConfig::from_args(
        cli.verbose,
        cli.debug,
        cli.trace,
        cli.quiet,
        cli.log_file.clone(),
    );
    if let Err(e) = logging::init(&log_config) {
        e.print();
        std::process::exit(e.exit_code());
    }

    match run(cli).await {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            e.print();
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let ctx = Context { role: cli.role };

    match cli.command {
        Commands::Login(args) => commands::login::execute(args, &ctx).await,
        Commands::Logout(args) => commands::logout::execute(args).await,
        Commands::Whoami(args) => commands::whoami::execute(args, &ctx).await,
        Commands::Register(args) => commands::register::execute(args).await,
        Commands::Profile(args) => commands::profile::execute(args, &ctx).await,
        Commands::Departments(args) => commands::departments::execute(args, &ctx).await,
        Commands::Associations(args) => commands::associations::execute(args, &ctx).await,
        Commands::Services(args) => commands::services::execute(args, &ctx).await,
        Commands::Citizens(args) => commands::citizens::execute(args, &ctx).await,
        Commands::Grantees(args) => commands::grantees::execute(args, &ctx).await,
        Commands::Administrators(args) => commands::administrators::execute(args, &ctx).await,
        Commands::Requests(args) => commands::requests::execute(args, &ctx).await,
        Commands::Grants(args) => commands::grants::execute(args, &ctx).await,
        Commands::Permissions(args) => commands::permissions::execute(args, &ctx).await,
        Commands::Logs(args) => commands::logs::execute(args, &ctx).await,
        Commands::Dashboard(args) => commands::dashboard::execute(args, &ctx).await,
    }
}

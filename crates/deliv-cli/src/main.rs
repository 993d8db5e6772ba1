mod cmd;
mod output;
mod root;
mod tools;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "deliv",
    about = "Track deliverables for an agent session — create, update status, deprecate, list",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .deliverables/ or .git/)
    #[arg(long, global = true, env = "DELIV_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize deliverable tracking in the current project
    Init,

    /// Create one deliverable, or a batch from a JSON file
    Create {
        /// Deliverable ID (e.g. DL-001)
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        id: Option<String>,

        /// What the deliverable is
        #[arg(long, required_unless_present = "file", conflicts_with = "file")]
        description: Option<String>,

        /// Acceptance criterion (repeatable)
        #[arg(long = "criterion", short = 'c', conflicts_with = "file")]
        criteria: Vec<String>,

        /// JSON array of {id, description, acceptanceCriteria}; "-" reads stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Set a deliverable's status (pending, passed, blocked)
    Set { id: String, status: String },

    /// Permanently deprecate a deliverable
    Deprecate { id: String },

    /// List active deliverables
    List {
        /// Only deliverables with this status
        #[arg(long)]
        status: Option<String>,

        /// Maximum number of entries
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show a single deliverable, including deprecated ones
    Show { id: String },

    /// Summarize progress across active deliverables
    Summary,

    /// Inspect and validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Run as an MCP stdio server exposing the deliverable tools
    Mcp {
        /// Start a verification session and expose the verify tool
        #[arg(long)]
        verify: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Mcp { .. } => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root, cli.json),
        Commands::Create {
            id,
            description,
            criteria,
            file,
        } => cmd::deliverable::create(
            &root,
            id,
            description,
            criteria,
            file.as_deref(),
            cli.json,
        ),
        Commands::Set { id, status } => cmd::deliverable::set(&root, &id, &status, cli.json),
        Commands::Deprecate { id } => cmd::deliverable::deprecate(&root, &id, cli.json),
        Commands::List { status, limit } => {
            cmd::deliverable::list(&root, status.as_deref(), limit, cli.json)
        }
        Commands::Show { id } => cmd::deliverable::show(&root, &id, cli.json),
        Commands::Summary => cmd::deliverable::summary(&root, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
        Commands::Mcp { verify } => cmd::mcp::run(&root, verify),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

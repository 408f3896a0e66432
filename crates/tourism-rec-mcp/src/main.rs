//! TourismRec MCP Server: entry point.

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use tourism_rec::synthetic::{self, DEFAULT_SEED, DEFAULT_USERS};
use tourism_rec::{PlaceRef, TrecWriter};

use tourism_rec_mcp::config::{resolve_dataset_path, EngineDefaults};
use tourism_rec_mcp::protocol::ProtocolHandler;
use tourism_rec_mcp::session::TourismSessionManager;
use tourism_rec_mcp::tools::render::{matches_json, recommendation_json};
use tourism_rec_mcp::tools::ToolRegistry;
use tourism_rec_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "tourism-rec-mcp",
    about = "MCP server for TourismRec: destination recommendations for LLM agents",
    version
)]
struct Cli {
    /// Path to .trec dataset file.
    #[arg(short, long)]
    dataset: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve {
        /// Path to .trec dataset file.
        #[arg(short, long)]
        dataset: Option<String>,
    },

    /// Validate a .trec dataset file.
    Validate,

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   tourism-rec-mcp completions bash > ~/.local/share/bash-completion/completions/tourism-rec-mcp
    ///   tourism-rec-mcp completions zsh > ~/.zfunc/_tourism-rec-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },

    /// Launch interactive REPL mode.
    Repl,

    /// Write a synthetic demo dataset.
    Demo {
        /// Output path (defaults to the resolved dataset path).
        #[arg(short, long)]
        output: Option<String>,

        /// Number of users to generate.
        #[arg(long, default_value_t = DEFAULT_USERS)]
        users: u32,

        /// Random seed.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Print recommendations for a registered user, or for random demo ratings.
    Recommend {
        /// Registered user id. Omit to use a random demo session.
        #[arg(short, long)]
        user: Option<u32>,

        /// Minimum user similarity, exclusive.
        #[arg(long)]
        threshold: Option<f64>,

        /// Number of recommendations.
        #[arg(short = 'n', long)]
        top_n: Option<usize>,

        /// Seed for the demo session.
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },

    /// Print places similar to a place, by id or exact name.
    Similar {
        /// Place id or exact name.
        place: String,

        /// Number of matches.
        #[arg(short, long)]
        k: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let defaults = EngineDefaults::from_env()?;

    match cli.command.unwrap_or(Commands::Serve { dataset: None }) {
        Commands::Serve { dataset } => {
            let path = resolve_dataset_path(dataset.or(cli.dataset).as_deref());
            let session = TourismSessionManager::open(&path, defaults)?;
            let session = Arc::new(Mutex::new(session));
            let handler = ProtocolHandler::new(session);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Validate => {
            let path = resolve_dataset_path(cli.dataset.as_deref());
            if !Path::new(&path).exists() {
                eprintln!("Invalid dataset file: {path} does not exist");
                std::process::exit(1);
            }
            match TourismSessionManager::open(&path, defaults) {
                Ok(session) => {
                    let dataset = session.dataset();
                    println!("Valid dataset file: {path}");
                    println!("  Places:  {}", dataset.catalog.len());
                    println!("  Users:   {}", dataset.user_ids().len());
                    println!("  Ratings: {}", dataset.ratings.len());
                    println!("  Cities:  {}", dataset.catalog.cities().len());
                }
                Err(e) => {
                    eprintln!("Invalid dataset file: {e}");
                    std::process::exit(1);
                }
            }
        }

        Commands::Info => {
            let capabilities = tourism_rec_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "tool_count": tools.len(),
                "defaults": {
                    "threshold": defaults.threshold,
                    "top_n": defaults.top_n,
                    "content_top_k": defaults.content_top_k,
                },
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "tourism-rec-mcp", &mut std::io::stdout());
        }

        Commands::Repl => {
            tourism_rec_mcp::repl::run(defaults)?;
        }

        Commands::Demo {
            output,
            users,
            seed,
        } => {
            let path = resolve_dataset_path(output.or(cli.dataset).as_deref());
            let dataset = synthetic::generate(users, seed)?;
            TrecWriter::write_to_file(&dataset, Path::new(&path))?;
            println!(
                "Wrote {path}: {} places, {} users, {} ratings",
                dataset.catalog.len(),
                dataset.users.len(),
                dataset.ratings.len()
            );
        }

        Commands::Recommend {
            user,
            threshold,
            top_n,
            seed,
        } => {
            let path = resolve_dataset_path(cli.dataset.as_deref());
            let mut session = TourismSessionManager::open(&path, defaults)?;
            let config = session.recommend_config(threshold, top_n)?;
            let rec = match user {
                Some(id) => session.recommend_for_user(id, &config)?,
                None => {
                    session.demo_ratings(Some(seed))?;
                    session.recommend_for_session(&config)?
                }
            };
            let out = recommendation_json(&rec, &session.dataset().catalog);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }

        Commands::Similar { place, k } => {
            let path = resolve_dataset_path(cli.dataset.as_deref());
            let session = TourismSessionManager::open(&path, defaults)?;
            let place = match place.parse::<u32>() {
                Ok(id) => PlaceRef::Id(id),
                Err(_) => PlaceRef::Name(place),
            };
            let k = k.unwrap_or(session.defaults().content_top_k);
            let (query, matches) = session.similar_places(&place, k)?;
            let out = matches_json(query, &matches, &session.dataset().catalog);
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }

    Ok(())
}

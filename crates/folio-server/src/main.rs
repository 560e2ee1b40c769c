//! Folio - personal portfolio web server

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use folio_core::config::Config;
use folio_server::{AppState, build_router};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "Personal portfolio web server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve(ServeArgs),

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Default)]
struct ServeArgs {
    /// Host to bind
    #[arg(long)]
    host: Option<String>,
    /// Port to bind
    #[arg(short, long)]
    port: Option<u16>,
    /// Directory served under /public/
    #[arg(long)]
    public_dir: Option<PathBuf>,
    /// Start with an empty project list
    #[arg(long)]
    no_seed: bool,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// List all settings
    List,
    /// Get a setting
    Get { key: String },
    /// Set a setting
    Set { key: String, value: String },
    /// Show the config file path
    Path,
    /// Reset to defaults
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("folio=info".parse()?)
                .add_directive("folio_server=info".parse()?)
                .add_directive("folio_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_serve(ServeArgs::default()).await,
        Some(Commands::Serve(args)) => cmd_serve(args).await,
        Some(Commands::Config { action }) => cmd_config(action, cli.format),
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(host) = args.host {
        config.set("server.host", &host)?;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(dir) = args.public_dir {
        config.server.public_dir = dir;
    }
    if args.no_seed {
        config.registry.seed_demo_projects = false;
    }
    config.validate()?;

    if !config.server.public_dir.is_dir() {
        warn!(
            public_dir = %config.server.public_dir.display(),
            "Public directory not found; static assets will return 404"
        );
    }

    let state = AppState::from_config(&config).context("Failed to load demo projects")?;
    let seeded = state.projects.len().await;
    let app = build_router(state);

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!(addr = %addr, projects = seeded, "Server running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn cmd_config(action: ConfigAction, format: OutputFormat) -> anyhow::Result<()> {
    match action {
        ConfigAction::List => {
            let config = Config::load()?;
            let entries = config.list()?;
            match format {
                OutputFormat::Text => {
                    for (key, value) in entries {
                        println!("{} = {}", key, value);
                    }
                }
                OutputFormat::Json => {
                    let map: serde_json::Map<String, serde_json::Value> = entries
                        .into_iter()
                        .map(|(k, v)| (k, serde_json::Value::String(v)))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&map)?);
                }
            }
        }
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            println!("{}", config.get(&key)?);
        }
        ConfigAction::Set { key, value } => {
            let path = Config::config_path()?;
            let mut config = Config::load_from(&path)?;
            config.set(&key, &value)?;
            config.save_to(&path)?;
            println!("Set {} = {}", key, config.get(&key)?);
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path()?.display());
        }
        ConfigAction::Reset => {
            Config::reset()?;
            println!("Configuration reset to defaults.");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_serve_args_parse() {
        let cli = Cli::parse_from(["folio", "serve", "--port", "8080", "--no-seed"]);
        match cli.command {
            Some(Commands::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.no_seed);
                assert!(args.host.is_none());
            }
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_no_subcommand_defaults_to_serve() {
        let cli = Cli::parse_from(["folio"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_set_parse() {
        let cli = Cli::parse_from(["folio", "config", "set", "server.port", "9000"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Set { .. }
            })
        ));
    }
}

//! airscan: Terminal listening client for radio-scanner feeds

use airscan::cli::{run_listen, ListenOptions};
use airscan::config;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "airscan")]
#[command(version)]
#[command(about = "Terminal listening client for radio-scanner feeds", long_about = None)]
#[command(after_help = "KEYS (while listening):
    s            start the live feed
    x            stop the live feed
    left/right   open and close the side panels (needs keyboard shortcuts
                 enabled in the scanner config)
    f, Tab       toggle fullscreen
    q, Esc       quit (asks for confirmation while the feed is on)

EXAMPLES:
    # Listen against the built-in demo source
    airscan listen

    # Use a specific config file
    airscan listen --config ./airscan.yaml")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `listen` subcommand
#[derive(Parser)]
struct ListenArgs {
    /// Disable the built-in demo source (the screen stays offline until a
    /// source is attached)
    #[arg(long)]
    no_demo: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the listening screen
    Listen(ListenArgs),

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .airscan.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    match cli.command {
        Commands::Listen(args) => {
            let (app_config, loaded_from) = config::load_or_default(cli.config.as_deref());
            if let Some(path) = &loaded_from {
                tracing::debug!("config loaded from {}", path.display());
            }
            run_listen(ListenOptions {
                config: app_config,
                demo: !args.no_demo,
            })
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (app_config, loaded_from) = config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml::to_string(&app_config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                if let Ok(cwd) = std::env::current_dir() {
                    eprintln!("  {}", cwd.display());
                }
                if let Some(dir) = dirs::config_dir() {
                    eprintln!("  {}", dir.join("airscan").display());
                }
                if let Some(home) = dirs::home_dir() {
                    eprintln!("  {}", home.display());
                }
                eprintln!();
                match config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".airscan.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, config::generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },

        Commands::ConfigSchema { output } => {
            let schema = config::generate_json_schema();
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "airscan", &mut io::stdout());
            Ok(())
        }
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pubpeer_check::app::App;
use pubpeer_check::checker::Checker;
use pubpeer_check::config::{find_config_file, get_config, load_config, Config, ConfigFile};
use pubpeer_check::sources::PubPeerSource;
use pubpeer_check::ui::{self, Status};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// PubPeer Check - look up DOI lists on PubPeer and write result reports
#[derive(Parser, Debug)]
#[command(name = "pubpeer-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check DOI lists for public commentary on PubPeer", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pause before each API request, in milliseconds
    #[arg(long, global = true)]
    delay_ms: Option<u64>,

    /// Search endpoint override
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Directory scanned for input files
    #[arg(long, global = true, default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check DOI files (all .txt files in --dir when none are given)
    #[command(alias = "c")]
    Check {
        /// Input files, one DOI per line
        files: Vec<PathBuf>,
    },

    /// Interactive menu (default when no command is given)
    Menu,

    /// Write a default configuration file
    InitConfig {
        /// Destination (default: ./pubpeer-check.toml)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Show recognized environment variables
    Env,
}

/// Print all available environment variables
fn print_env_vars() {
    println!("PubPeer Check - Environment Variables");
    println!();
    println!("Checker Settings:");
    println!("  PUBPEER_CHECK_CHECKER__DELAY_MS         Pause before each request in ms (default: 2000)");
    println!("  PUBPEER_CHECK_CHECKER__ENDPOINT         Search endpoint (default: https://pubpeer.com/api/search/)");
    println!("  PUBPEER_CHECK_CHECKER__TIMEOUT_SECS     Request timeout in seconds (default: 30)");
    println!("  PUBPEER_CHECK_CHECKER__INPUT_EXTENSION  Input file extension (default: .txt)");
    println!("  PUBPEER_CHECK_CHECKER__RESULT_SUFFIX    Report file suffix (default: \" result.txt\")");
    println!("  PUBPEER_CHECK_CHECKER__USER_AGENT       User agent override");
    println!();
    println!("Logging:");
    println!("  PUBPEER_CHECK_LOGGING__LEVEL            Log level when -v is not given (default: info)");
    println!("  RUST_LOG                                Full tracing filter, overrides everything else");
    println!();
    println!("Example:");
    println!("  export PUBPEER_CHECK_CHECKER__DELAY_MS=\"5000\"");
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(path) = &cli.config {
        load_config(path).with_context(|| format!("Failed to load {}", path.display()))?
    } else if let Some(path) = find_config_file() {
        load_config(&path).with_context(|| format!("Failed to load {}", path.display()))?
    } else {
        get_config().context("Failed to read configuration from environment")?
    };

    if let Some(delay_ms) = cli.delay_ms {
        config.checker.delay_ms = delay_ms;
    }
    if let Some(endpoint) = &cli.endpoint {
        config.checker.endpoint = endpoint.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.checker.timeout_secs = timeout;
    }

    Ok(config)
}

fn init_tracing(cli: &Cli, config: &Config) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("pubpeer_check={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Resolve configuration and start logging
fn setup(cli: &Cli) -> Result<Config> {
    let config = resolve_config(cli)?;
    init_tracing(cli, &config);

    if let Some(path) = &cli.config {
        tracing::debug!("Using config file: {}", path.display());
    }

    Ok(config)
}

fn build_checker(cli: &Cli, config: &Config) -> Result<Checker> {
    let source = PubPeerSource::from_config(&config.checker)?;
    Ok(Checker::from_config(Arc::new(source), &config.checker).with_progress(!cli.quiet))
}

/// Write the effective configuration to `path` (default: ./pubpeer-check.toml)
fn init_config_file(config: &Config, path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let path = path.unwrap_or_else(|| PathBuf::from(pubpeer_check::config::LOCAL_CONFIG_NAME));
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    ConfigFile::from(config).save(&path)?;
    Ok(path)
}

async fn run_check(cli: &Cli, checker: &Checker, files: Vec<PathBuf>) -> Result<()> {
    let files = if files.is_empty() {
        checker.discover(&cli.dir)
    } else {
        files
    };

    if files.is_empty() {
        if !cli.quiet {
            println!(
                "{}",
                ui::status_line(Status::Warning, "No input files found")
            );
        }
        return Ok(());
    }

    if !cli.quiet {
        println!("{}", ui::file_list(&files));
    }

    let summary = checker
        .process_files(&files)
        .await
        .context("DOI check aborted")?;

    if !cli.quiet {
        println!("{}", ui::run_summary(&summary));
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Env) => print_env_vars(),

        Some(Commands::InitConfig { path, force }) => {
            let config = setup(&cli)?;
            let path = init_config_file(&config, path.clone(), *force)?;
            println!(
                "{}",
                ui::status_line(Status::Success, &format!("Wrote {}", path.display()))
            );
        }

        Some(Commands::Check { files }) => {
            let config = setup(&cli)?;
            let checker = build_checker(&cli, &config)?;
            run_check(&cli, &checker, files.clone()).await?;
        }

        Some(Commands::Menu) | None => {
            let config = setup(&cli)?;
            let checker = build_checker(&cli, &config)?;
            let stdin = std::io::stdin();
            let mut app = App::new(checker, cli.dir.clone(), stdin.lock(), std::io::stdout());
            app.run().await?;
        }
    }

    Ok(())
}

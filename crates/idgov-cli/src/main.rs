/*
[INPUT]:  CLI arguments, YAML configuration file, IDGOV_* environment overrides
[OUTPUT]: Command results as JSON on stdout
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

use idgov_cli::{CliConfig, Command, execute, run_init};

#[derive(Parser, Debug)]
#[command(name = "idgov-cli", version, about = "Identity governance backend operator CLI")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Validate configuration and exit without calling the backend
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    if let Some(Command::Init { output }) = &args.command {
        return run_init(output);
    }

    let config = CliConfig::load(args.config_path.as_deref()).context("load config")?;
    let client = config.build_client()?;
    info!(
        base_url = %config.base_url,
        dry_run = args.dry_run,
        "configuration loaded"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let Some(command) = args.command else {
        bail!("no command given; see --help");
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&client, &command, &mut out).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}

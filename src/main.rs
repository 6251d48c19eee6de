use anyhow::Result;
use clap::{Parser, Subcommand};
use dockhand::cli::{self, ConfigAction, PortOptions, PsOptions};
use dockhand::infra::ProcessExecutor;
use dockhand::infra::config::{default_config_dir, expand_config_dir, load_app_config};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dockhand",
    about = "Inspeciona containers a partir da saída de `docker ps`"
)]
struct Cli {
    /// Diretório de configuração (default: ~/.config/dockhand)
    #[arg(long, env = "DOCKHAND_CONFIG_DIR", default_value_os_t = default_config_dir())]
    config_dir: PathBuf,

    /// Nível de log quando RUST_LOG não está definido
    #[arg(long, env = "DOCKHAND_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lista containers com portas, labels e status decodificados
    Ps(PsOptions),
    /// Mostra a porta do host publicada para uma porta do container
    Port(PortOptions),
    /// Configuração do dockhand
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&args.log_level))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config_dir = expand_config_dir(&args.config_dir);
    let config = load_app_config(&config_dir)?;
    let executor = Arc::new(ProcessExecutor::new());
    let mut out = io::stdout().lock();

    match &args.command {
        Commands::Ps(options) => cli::ps::run(options, &config, executor, &mut out),
        Commands::Port(options) => cli::port::run(options, &config, executor, &mut out),
        Commands::Config { action } => cli::config::run(action, &config, &mut out),
    }
}

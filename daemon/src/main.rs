//! Votechain daemon — entry point for running the election ledger node.

use std::path::PathBuf;

use clap::Parser;

use votechain_node::{NodeConfig, VoteNode};

#[derive(Parser)]
#[command(name = "votechain-daemon", about = "Votechain election ledger daemon")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings are
    /// used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address the RPC server binds to.
    #[arg(long, env = "VOTECHAIN_BIND")]
    bind: Option<String>,

    /// RPC server port.
    #[arg(long, env = "VOTECHAIN_RPC_PORT")]
    port: Option<u16>,

    /// Shared secret for admin-gated endpoints.
    #[arg(long, env = "VOTECHAIN_ADMIN_KEY")]
    admin_key: Option<String>,

    /// Required leading zero bits in block hashes.
    #[arg(long, env = "VOTECHAIN_DIFFICULTY_BITS")]
    difficulty_bits: Option<u8>,

    /// Candidate labels (comma-separated: "Candidate A,Candidate B").
    #[arg(long, env = "VOTECHAIN_CANDIDATES", value_delimiter = ',')]
    candidates: Vec<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VOTECHAIN_LOG_LEVEL")]
    log_level: String,

    /// Log format: "human" or "json".
    #[arg(long, default_value = "human", env = "VOTECHAIN_LOG_FORMAT")]
    log_format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    votechain_utils::init_tracing(&cli.log_level, &cli.log_format);

    let mut config = if let Some(ref config_path) = cli.config {
        match NodeConfig::from_toml_file(&config_path.display().to_string()) {
            Ok(cfg) => {
                tracing::info!("Loaded config from {}", config_path.display());
                cfg
            }
            Err(e) => {
                tracing::warn!("Failed to load config file: {e}, using defaults");
                NodeConfig::default()
            }
        }
    } else {
        NodeConfig::default()
    };

    if let Some(bind) = cli.bind {
        config.bind = bind;
    }
    if let Some(port) = cli.port {
        config.rpc_port = port;
    }
    if let Some(admin_key) = cli.admin_key {
        config.admin_key = admin_key;
    }
    if let Some(bits) = cli.difficulty_bits {
        config.params.difficulty_bits = bits;
    }
    if !cli.candidates.is_empty() {
        config.params.candidates = cli.candidates;
    }
    config.log_level = cli.log_level;
    config.log_format = cli.log_format;

    VoteNode::new(config).run().await?;

    tracing::info!("votechain daemon exited cleanly");
    Ok(())
}

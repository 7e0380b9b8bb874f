//! renbind CLI: inspect the bound contract ABIs and talk to deployed
//! contracts from the terminal.
//!
//! # Commands
//! ```text
//! renbind contracts
//! renbind abi        <contract>
//! renbind signatures <contract>
//! renbind call       <contract> <address> <method> [args...]
//! renbind logs       <contract> <address> <event> --from-block <n> [--to-block <n>]
//! renbind watch      <contract> <address> <event> [--from-block <n>]
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use renbind_core::{init_tracing, BindConfig};
use std::path::PathBuf;

mod cmd_abi;
mod cmd_call;
mod cmd_events;
mod format;

#[derive(Parser)]
#[command(
    name = "renbind",
    about = "Republic Protocol contract bindings: renbind CLI",
    long_about = "
renbind CLI: list the bound contracts, print their ABIs and selectors,
call read-only methods and follow contract events over JSON-RPC.

ENVIRONMENT VARIABLES:
  RENBIND_RPC_URL    JSON-RPC endpoint (overrides the config file)
  RUST_LOG           tracing filter (overrides --log-level)
",
    version
)]
struct Cli {
    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Log level: trace | debug | info | warn | error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the bound contracts
    Contracts,

    /// Print a contract's JSON ABI
    Abi {
        contract: String,
    },

    /// Print function selectors and event topics
    Signatures {
        contract: String,
    },

    /// Call a read-only method (eth_call)
    Call {
        contract: String,
        address: String,
        method: String,
        /// Arguments, coerced to the ABI input types
        args: Vec<String>,
        /// Block number to call against (default: latest)
        #[arg(long)]
        block: Option<u64>,
    },

    /// Print decoded historical events
    Logs {
        contract: String,
        address: String,
        event: String,
        #[arg(long, default_value_t = 0)]
        from_block: u64,
        /// Last block (default: current head)
        #[arg(long)]
        to_block: Option<u64>,
        /// Output as JSON lines
        #[arg(long)]
        json: bool,
    },

    /// Stream decoded events until Ctrl-C
    Watch {
        contract: String,
        address: String,
        event: String,
        /// First block (default: the next block)
        #[arg(long)]
        from_block: Option<u64>,
        #[arg(long)]
        json: bool,
    },
}

fn load_config(cli: &Cli) -> Result<BindConfig> {
    let mut config = match &cli.config {
        Some(path) => BindConfig::load(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => BindConfig::default(),
    };
    config.apply_env();
    if let Some(url) = &cli.rpc_url {
        config.rpc_url = url.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
    if cli.json_logs {
        config.log.json = true;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log);
    tracing::debug!(rpc_url = %config.rpc_url, "renbind starting");

    match cli.command {
        Commands::Contracts => cmd_abi::list(),

        Commands::Abi { contract } => cmd_abi::print_abi(&contract),

        Commands::Signatures { contract } => cmd_abi::signatures(&contract),

        Commands::Call { contract, address, method, args, block } => {
            cmd_call::run(&config, &contract, &address, &method, &args, block).await
        }

        Commands::Logs { contract, address, event, from_block, to_block, json } => {
            cmd_events::logs(&config, &contract, &address, &event, from_block, to_block, json).await
        }

        Commands::Watch { contract, address, event, from_block, json } => {
            cmd_events::watch(&config, &contract, &address, &event, from_block, json).await
        }
    }
}

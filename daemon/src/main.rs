//! forwardingd: build forwarding transactions and answer offline queries.
//!
//! Transaction subcommands are generate-only: they print the unsigned JSON
//! transaction for an external signer to complete and broadcast.

use anyhow::{bail, Context};
use clap::Parser;
use forwarding_crypto::{forwarding_address, Base32Codec};
use forwarding_keeper::GenesisState;
use forwarding_messages::{
    Msg, MsgClearAccount, MsgRegisterAccount, MsgSetAllowedDenoms, SignatureV2, Tx,
};
use forwarding_node::{init_logging, ForwardingConfig, LogFormat};
use forwarding_types::{AddressCodec, Coins, Credential, SignerlessKey};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "forwardingd", about = "Forwarding module command-line interface")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Human-readable address prefix.
    #[arg(long, env = "FORWARDING_ADDRESS_PREFIX")]
    address_prefix: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "FORWARDING_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "FORWARDING_LOG_FORMAT")]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate forwarding transactions.
    #[command(subcommand)]
    Tx(TxCommand),
    /// Query forwarding state.
    #[command(subcommand)]
    Query(QueryCommand),
    /// Genesis utilities.
    #[command(subcommand)]
    Genesis(GenesisCommand),
}

#[derive(clap::Subcommand)]
enum TxCommand {
    /// Register a forwarding account for a channel and recipient.
    RegisterAccount {
        /// Address signing the transaction.
        #[arg(long)]
        from: String,
        channel: String,
        recipient: String,
        fallback: Option<String>,
    },
    /// Register a funded forwarding account without a signer.
    RegisterAccountSignerlessly {
        channel: String,
        recipient: String,
        fallback: Option<String>,
    },
    /// Sweep a forwarding account, or hand its balance to the fallback.
    ClearAccount {
        #[arg(long)]
        from: String,
        address: String,
        #[arg(long)]
        fallback: bool,
    },
    /// Replace the allowed-denom set. Must be signed by the authority.
    SetAllowedDenoms {
        #[arg(long)]
        from: String,
        #[arg(required = true)]
        denoms: Vec<String>,
    },
}

#[derive(clap::Subcommand)]
enum QueryCommand {
    /// Derive the forwarding address for a channel, recipient and fallback.
    Address {
        channel: String,
        recipient: String,
        fallback: Option<String>,
    },
    /// Allowed denoms in an exported genesis file.
    Denoms {
        #[arg(long)]
        genesis: PathBuf,
    },
    /// Per-channel statistics in an exported genesis file.
    Stats {
        #[arg(long)]
        genesis: PathBuf,
        channel: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum GenesisCommand {
    /// Print the default genesis state.
    Default,
}

#[derive(Serialize)]
struct ChannelStats {
    chain_id: String,
    num_of_accounts: u64,
    num_of_forwards: u64,
    total_forwarded: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => ForwardingConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ForwardingConfig::default(),
    };
    if let Some(prefix) = cli.address_prefix {
        config.address_prefix = prefix;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    config.validate()?;

    let format: LogFormat = config.log_format()?;
    init_logging(format, &config.log_level)?;
    tracing::debug!(prefix = %config.address_prefix, "configuration loaded");

    let codec = Base32Codec::new(&config.address_prefix);
    match cli.command {
        Command::Tx(cmd) => print_json(&build_tx(cmd, &codec)?),
        Command::Query(cmd) => run_query(cmd, &codec),
        Command::Genesis(GenesisCommand::Default) => print_json(&GenesisState::default()),
    }
}

fn build_tx(cmd: TxCommand, codec: &dyn AddressCodec) -> anyhow::Result<Tx> {
    let (msg, signatures) = match cmd {
        TxCommand::RegisterAccount {
            from,
            channel,
            recipient,
            fallback,
        } => {
            codec.decode(&from).context("invalid --from address")?;
            let msg = MsgRegisterAccount {
                signer: from,
                recipient,
                channel,
                fallback: fallback.unwrap_or_default(),
            };
            (Msg::RegisterAccount(msg), Vec::new())
        }
        TxCommand::RegisterAccountSignerlessly {
            channel,
            recipient,
            fallback,
        } => {
            let fallback = fallback.unwrap_or_default();
            let address = forwarding_address(&channel, &recipient, &fallback);
            let msg = MsgRegisterAccount {
                signer: codec.encode(&address),
                recipient,
                channel,
                fallback,
            };
            let signature = SignatureV2 {
                credential: Credential::Signerless(SignerlessKey::new(address)),
                signature: Vec::new(),
                sequence: 0,
            };
            (Msg::RegisterAccount(msg), vec![signature])
        }
        TxCommand::ClearAccount {
            from,
            address,
            fallback,
        } => {
            codec.decode(&from).context("invalid --from address")?;
            codec.decode(&address).context("invalid account address")?;
            let msg = MsgClearAccount {
                signer: from,
                address,
                fallback,
            };
            (Msg::ClearAccount(msg), Vec::new())
        }
        TxCommand::SetAllowedDenoms { from, denoms } => {
            codec.decode(&from).context("invalid --from address")?;
            forwarding_types::validate_allowed_denoms(&denoms)?;
            (
                Msg::SetAllowedDenoms(MsgSetAllowedDenoms {
                    signer: from,
                    denoms,
                }),
                Vec::new(),
            )
        }
    };
    Ok(Tx {
        msgs: vec![msg],
        signatures,
        memo: String::new(),
    })
}

fn run_query(cmd: QueryCommand, codec: &dyn AddressCodec) -> anyhow::Result<()> {
    match cmd {
        QueryCommand::Address {
            channel,
            recipient,
            fallback,
        } => {
            let fallback = fallback.unwrap_or_default();
            if !fallback.is_empty() && codec.decode(&fallback).is_err() {
                bail!("invalid fallback address");
            }
            let address = forwarding_address(&channel, &recipient, &fallback);
            print_json(&serde_json::json!({ "address": codec.encode(&address) }))
        }
        QueryCommand::Denoms { genesis } => {
            let genesis = load_genesis(&genesis)?;
            print_json(&serde_json::json!({ "allowed_denoms": genesis.allowed_denoms }))
        }
        QueryCommand::Stats { genesis, channel } => {
            let genesis = load_genesis(&genesis)?;
            let mut stats = channel_stats(&genesis)?;
            match channel {
                Some(channel) => {
                    let entry = stats.remove(&channel).unwrap_or(ChannelStats {
                        chain_id: "UNKNOWN".into(),
                        num_of_accounts: 0,
                        num_of_forwards: 0,
                        total_forwarded: String::new(),
                    });
                    print_json(&entry)
                }
                None => print_json(&stats),
            }
        }
    }
}

fn load_genesis(path: &Path) -> anyhow::Result<GenesisState> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read genesis {}", path.display()))?;
    let genesis: GenesisState = serde_json::from_str(&raw).context("malformed genesis")?;
    genesis.validate()?;
    Ok(genesis)
}

/// Exported genesis carries no client state, so chain ids are unknown offline.
fn channel_stats(genesis: &GenesisState) -> anyhow::Result<BTreeMap<String, ChannelStats>> {
    let mut out = BTreeMap::new();
    for (channel, num_of_accounts) in &genesis.num_of_accounts {
        let total: Coins = genesis
            .total_forwarded
            .get(channel)
            .map(|raw| raw.parse())
            .transpose()?
            .unwrap_or_default();
        out.insert(
            channel.clone(),
            ChannelStats {
                chain_id: "UNKNOWN".into(),
                num_of_accounts: *num_of_accounts,
                num_of_forwards: genesis.num_of_forwards.get(channel).copied().unwrap_or(0),
                total_forwarded: total.to_string(),
            },
        );
    }
    Ok(out)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

use alloy_primitives::Address;
use anyhow::{format_err, Result};
use clap::Parser;
use labi_stake::config::ClientConfig;

mod commands;
use commands::index_commands::*;
use commands::stake_commands::*;

#[derive(Debug, Parser)]
pub struct Opts {
    /// Path of the client configuration file.
    #[arg(long, default_value = "client_config.ini")]
    pub config: String,
    #[clap(subcommand)]
    pub command: LabiCommands,
}

#[derive(Debug, Parser)]
pub enum LabiCommands {
    /// Protocol and account totals.
    Stats {},
    /// Token metadata and balance.
    Token {},
    /// Mint test tokens to yourself, or to `--to`.
    Mint {
        #[arg(long)]
        to: Option<Address>,
        #[arg(long)]
        amount: String,
    },
    /// Set the staking contract's allowance.
    Approve {
        #[arg(long)]
        amount: String,
    },
    /// Approve if needed, then stake.
    Stake {
        #[arg(long)]
        amount: String,
    },
    Withdraw {
        #[arg(long)]
        stake_id: u64,
    },
    /// Withdraw an unlocked stake with its rewards.
    NormalWithdraw {
        #[arg(long)]
        stake_id: u64,
    },
    /// Withdraw a locked stake, paying the penalty.
    EmergencyWithdraw {
        #[arg(long)]
        stake_id: u64,
    },
    Claim {},
    Positions {},
    Rewards {},
    /// Refresh stats every poll interval.
    Watch {
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// Index staking events into the local store.
    Index {
        #[arg(long)]
        from_block: Option<u64>,
        #[arg(long)]
        to_block: Option<u64>,
    },
    /// Indexed summary and records of one address.
    Summary {
        #[arg(long)]
        user: Address,
    },
    /// Latest transfers from the hosted indexer.
    Transfers {},
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let opts = Opts::parse();
    let config = ClientConfig::load(&opts.config)
        .map_err(|e| format_err!("failed to load {}: {}", opts.config, e))?;

    match opts.command {
        LabiCommands::Stats {} => StakeApp::connect(&config)?.stats(),
        LabiCommands::Token {} => StakeApp::connect(&config)?.token(),
        LabiCommands::Mint { to, amount } => StakeApp::connect(&config)?.mint(to, &amount),
        LabiCommands::Approve { amount } => StakeApp::connect(&config)?.approve(&amount),
        LabiCommands::Stake { amount } => StakeApp::connect(&config)?.stake(&amount),
        LabiCommands::Withdraw { stake_id } => StakeApp::connect(&config)?.withdraw(stake_id),
        LabiCommands::NormalWithdraw { stake_id } => {
            StakeApp::connect(&config)?.normal_withdraw(stake_id)
        }
        LabiCommands::EmergencyWithdraw { stake_id } => {
            StakeApp::connect(&config)?.emergency_withdraw(stake_id)
        }
        LabiCommands::Claim {} => StakeApp::connect(&config)?.claim(),
        LabiCommands::Positions {} => StakeApp::connect(&config)?.positions(),
        LabiCommands::Rewards {} => StakeApp::connect(&config)?.rewards(),
        LabiCommands::Watch { ticks } => StakeApp::connect(&config)?.watch(ticks),
        LabiCommands::Index {
            from_block,
            to_block,
        } => index(&config, from_block, to_block),
        LabiCommands::Summary { user } => summary(&config, user),
        LabiCommands::Transfers {} => transfers(&config),
    }
}

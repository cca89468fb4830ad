use crate::{
    error::{ErrorCode, Result},
    units, DEFAULT_EMERGENCY_PENALTY_BPS, DEFAULT_REWARD_RATE_BPS, DEFAULT_TOKEN_DECIMALS,
    MAXIMUM_STAKE_TOKENS, MINIMUM_STAKE_TOKENS, SEPOLIA_CHAIN_ID,
};
use alloy_primitives::{Address, U256};
use configparser::ini::Ini;
use std::{str::FromStr, time::Duration};

const SECTION: &str = "Global";

/// Everything the client needs to reach the deployment, read from the
/// `[Global]` section of `client_config.ini`.
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub http_url: String,
    pub chain_id: u64,
    pub staking_contract: Address,
    pub token_contract: Address,
    pub subgraph_url: Option<String>,
    pub subgraph_api_key: Option<String>,
    /// Interval of background refreshes and receipt polling.
    pub poll_interval: Duration,
    /// How long a cached contract read stays fresh.
    pub stale_time: Duration,
    /// Per-stake bounds in base units.
    pub min_stake: U256,
    pub max_stake: U256,
    /// Projection rate used when the contract rate cannot be read.
    pub reward_rate_bps: u64,
    pub emergency_penalty_bps: u64,
    pub index_store_path: String,
    pub index_start_block: u64,
    pub index_batch_size: u64,
}

impl ClientConfig {
    pub fn load(path: &str) -> Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(ErrorCode::ConfigLoad)?;
        Self::from_ini(&config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let mut config = Ini::new();
        config
            .read(contents.to_string())
            .map_err(ErrorCode::ConfigLoad)?;
        Self::from_ini(&config)
    }

    pub fn from_ini(config: &Ini) -> Result<Self> {
        let http_url = required(config, "http_url")?;
        let staking_contract =
            parse_value("staking_contract", &required(config, "staking_contract")?)?;
        let token_contract =
            parse_value("token_contract", &required(config, "token_contract")?)?;

        let min_tokens = optional_u64(config, "min_stake")?.unwrap_or(MINIMUM_STAKE_TOKENS);
        let max_tokens = optional_u64(config, "max_stake")?.unwrap_or(MAXIMUM_STAKE_TOKENS);
        if min_tokens > max_tokens {
            return Err(ErrorCode::InvalidConfig {
                key: "min_stake".to_string(),
                value: format!("{} > max_stake {}", min_tokens, max_tokens),
            });
        }

        Ok(Self {
            http_url,
            chain_id: optional_u64(config, "chain_id")?.unwrap_or(SEPOLIA_CHAIN_ID),
            staking_contract,
            token_contract,
            subgraph_url: optional(config, "subgraph_url"),
            subgraph_api_key: optional(config, "subgraph_api_key"),
            poll_interval: Duration::from_millis(
                optional_u64(config, "poll_interval_ms")?.unwrap_or(4_000),
            ),
            stale_time: Duration::from_secs(optional_u64(config, "stale_time_secs")?.unwrap_or(60)),
            min_stake: units::tokens(min_tokens, DEFAULT_TOKEN_DECIMALS),
            max_stake: units::tokens(max_tokens, DEFAULT_TOKEN_DECIMALS),
            reward_rate_bps: optional_u64(config, "reward_rate_bps")?
                .unwrap_or(DEFAULT_REWARD_RATE_BPS),
            emergency_penalty_bps: optional_u64(config, "emergency_penalty_bps")?
                .unwrap_or(DEFAULT_EMERGENCY_PENALTY_BPS),
            index_store_path: optional(config, "index_store_path")
                .unwrap_or_else(|| "labi_index.json".to_string()),
            index_start_block: optional_u64(config, "index_start_block")?.unwrap_or(0),
            index_batch_size: optional_u64(config, "index_batch_size")?
                .unwrap_or(2_000)
                .max(1),
        })
    }
}

fn optional(config: &Ini, key: &str) -> Option<String> {
    config
        .get(SECTION, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required(config: &Ini, key: &str) -> Result<String> {
    optional(config, key).ok_or_else(|| ErrorCode::MissingConfig(key.to_string()))
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| ErrorCode::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn optional_u64(config: &Ini, key: &str) -> Result<Option<u64>> {
    optional(config, key)
        .map(|value| parse_value(key, &value))
        .transpose()
}

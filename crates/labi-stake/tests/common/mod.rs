#![allow(dead_code)]

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_sol_types::SolCall;
use labi_stake::{
    interface::{IStakeToken, IStakingContract, IStakingContract::StakeInfo},
    rpc::{CallRequest, Provider},
    session::{Deployment, WalletSession},
    units::tokens,
    ErrorCode, Result, SEPOLIA_CHAIN_ID, SECONDS_PER_DAY,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

pub const USER: Address = Address::repeat_byte(0x11);
pub const TOKEN: Address = Address::repeat_byte(0x22);
pub const STAKING: Address = Address::repeat_byte(0x33);
pub const NOW: u64 = 1_700_000_000;

pub type Session = WalletSession<Arc<FakeChain>>;

pub struct ChainState {
    pub chain_id: u64,
    pub balance: U256,
    pub total_supply: U256,
    pub allowance: U256,
    pub stakes: Vec<StakeInfo>,
    pub pending_rewards: U256,
    pub reward_rate: U256,
    pub apr: U256,
    pub lock_period: U256,
    pub now: u64,
    /// Function names of submitted transactions, in order.
    pub sent: Vec<&'static str>,
    /// Number of `eth_call`s that reached the node.
    pub reads: usize,
    pub reject_next: bool,
    pub revert_next: bool,
    /// Receipt polls answered with `null` before a transaction is mined.
    pub pending_polls: u32,
    receipts: HashMap<B256, (bool, u32)>,
    nonce: u64,
}

/// In-process stand-in for a wallet-backed node serving both contracts.
pub struct FakeChain {
    state: Mutex<ChainState>,
}

impl FakeChain {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(ChainState {
                chain_id: SEPOLIA_CHAIN_ID,
                balance: tokens(100, 18),
                total_supply: tokens(1_000_000, 18),
                allowance: U256::ZERO,
                stakes: Vec::new(),
                pending_rewards: U256::ZERO,
                reward_rate: U256::from(100u64),
                apr: U256::from(1u64),
                lock_period: U256::from(30 * SECONDS_PER_DAY),
                now: NOW,
                sent: Vec::new(),
                reads: 0,
                reject_next: false,
                revert_next: false,
                pending_polls: 1,
                receipts: HashMap::new(),
                nonce: 0,
            }),
        })
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ChainState) -> R) -> R {
        f(&mut self.state.lock().unwrap())
    }

    pub fn sent(&self) -> Vec<&'static str> {
        self.with(|s| s.sent.clone())
    }

    pub fn reads(&self) -> usize {
        self.with(|s| s.reads)
    }
}

pub fn deployment() -> Deployment {
    Deployment {
        staking_contract: STAKING,
        token_contract: TOKEN,
    }
}

pub fn connect(chain: &Arc<FakeChain>) -> Arc<Session> {
    Arc::new(
        WalletSession::connect(
            chain.clone(),
            deployment(),
            SEPOLIA_CHAIN_ID,
            Duration::from_secs(60),
        )
        .unwrap(),
    )
}

pub fn stake_info(amount: U256, start: u64, unlock: u64, active: bool) -> StakeInfo {
    StakeInfo {
        amount,
        timestamp: U256::from(start),
        unlockTime: U256::from(unlock),
        rewardDebt: U256::ZERO,
        active,
    }
}

fn param<T: DeserializeOwned>(params: &Value, index: usize) -> Result<T> {
    serde_json::from_value(params.get(index).cloned().unwrap_or(Value::Null))
        .map_err(|e| ErrorCode::MalformedResponse(e.to_string()))
}

fn is<C: SolCall>(data: &[u8]) -> bool {
    data.starts_with(&C::SELECTOR)
}

fn reverted() -> ErrorCode {
    ErrorCode::from_rpc(-32000, "execution reverted".to_string())
}

impl ChainState {
    fn user_total(&self) -> U256 {
        self.stakes
            .iter()
            .filter(|s| s.active)
            .fold(U256::ZERO, |acc, s| acc + s.amount)
    }

    fn call(&mut self, tx: CallRequest) -> Result<Vec<u8>> {
        self.reads += 1;
        let data = tx.data.as_ref();
        if tx.to == TOKEN {
            return if is::<IStakeToken::nameCall>(data) {
                Ok(IStakeToken::nameCall::abi_encode_returns(&("Stake Token".to_string(),)))
            } else if is::<IStakeToken::symbolCall>(data) {
                Ok(IStakeToken::symbolCall::abi_encode_returns(&("STAKE".to_string(),)))
            } else if is::<IStakeToken::decimalsCall>(data) {
                Ok(IStakeToken::decimalsCall::abi_encode_returns(&(18u8,)))
            } else if is::<IStakeToken::totalSupplyCall>(data) {
                Ok(IStakeToken::totalSupplyCall::abi_encode_returns(&(self.total_supply,)))
            } else if is::<IStakeToken::balanceOfCall>(data) {
                let call = IStakeToken::balanceOfCall::abi_decode(data, true)?;
                let balance = if call.account == USER {
                    self.balance
                } else {
                    U256::ZERO
                };
                Ok(IStakeToken::balanceOfCall::abi_encode_returns(&(balance,)))
            } else if is::<IStakeToken::allowanceCall>(data) {
                Ok(IStakeToken::allowanceCall::abi_encode_returns(&(self.allowance,)))
            } else {
                Err(reverted())
            };
        }
        if tx.to != STAKING {
            return Err(reverted());
        }
        if is::<IStakingContract::getUserStakesCall>(data) {
            Ok(IStakingContract::getUserStakesCall::abi_encode_returns(&(self.stakes.clone(),)))
        } else if is::<IStakingContract::getUserStakeCountCall>(data) {
            Ok(IStakingContract::getUserStakeCountCall::abi_encode_returns(&(U256::from(
                self.stakes.len(),
            ),)))
        } else if is::<IStakingContract::getPendingRewardsCall>(data) {
            Ok(IStakingContract::getPendingRewardsCall::abi_encode_returns(&(
                self.pending_rewards,
            )))
        } else if is::<IStakingContract::calculateRewardsCall>(data) {
            Ok(IStakingContract::calculateRewardsCall::abi_encode_returns(&(self.pending_rewards,)))
        } else if is::<IStakingContract::getUserTotalStakedCall>(data) {
            Ok(IStakingContract::getUserTotalStakedCall::abi_encode_returns(&(self.user_total(),)))
        } else if is::<IStakingContract::getTotalStakedCall>(data) {
            Ok(IStakingContract::getTotalStakedCall::abi_encode_returns(&(self.user_total(),)))
        } else if is::<IStakingContract::getRewardRateCall>(data) {
            Ok(IStakingContract::getRewardRateCall::abi_encode_returns(&(self.reward_rate,)))
        } else if is::<IStakingContract::getAPRCall>(data) {
            Ok(IStakingContract::getAPRCall::abi_encode_returns(&(self.apr,)))
        } else if is::<IStakingContract::getLockPeriodCall>(data) {
            Ok(IStakingContract::getLockPeriodCall::abi_encode_returns(&(self.lock_period,)))
        } else if is::<IStakingContract::getContractBalanceCall>(data) {
            Ok(IStakingContract::getContractBalanceCall::abi_encode_returns(&(self.user_total(),)))
        } else if is::<IStakingContract::getStakingTokenCall>(data) {
            Ok(IStakingContract::getStakingTokenCall::abi_encode_returns(&(TOKEN,)))
        } else {
            Err(reverted())
        }
    }

    /// Applies the transaction's effects; returns its name and whether it
    /// succeeded.
    fn execute(&mut self, tx: &CallRequest) -> Result<(&'static str, bool)> {
        let data = tx.data.as_ref();
        let forced_revert = std::mem::take(&mut self.revert_next);

        let (name, ok) = if is::<IStakeToken::approveCall>(data) {
            let call = IStakeToken::approveCall::abi_decode(data, true)?;
            if !forced_revert {
                self.allowance = call.amount;
            }
            ("approve", true)
        } else if is::<IStakeToken::mintToSelfCall>(data) {
            let call = IStakeToken::mintToSelfCall::abi_decode(data, true)?;
            if !forced_revert {
                self.balance += call.amount;
                self.total_supply += call.amount;
            }
            ("mintToSelf", true)
        } else if is::<IStakingContract::stakeCall>(data) {
            let call = IStakingContract::stakeCall::abi_decode(data, true)?;
            let ok = self.allowance >= call.amount && self.balance >= call.amount;
            if ok && !forced_revert {
                self.allowance -= call.amount;
                self.balance -= call.amount;
                let unlock = self.now + self.lock_period.to::<u64>();
                self.stakes
                    .push(stake_info(call.amount, self.now, unlock, true));
            }
            ("stake", ok)
        } else if is::<IStakingContract::claimRewardsCall>(data) {
            let ok = !self.pending_rewards.is_zero();
            if ok && !forced_revert {
                self.balance += self.pending_rewards;
                self.pending_rewards = U256::ZERO;
            }
            ("claimRewards", ok)
        } else if is::<IStakingContract::emergencyWithdrawCall>(data) {
            let call = IStakingContract::emergencyWithdrawCall::abi_decode(data, true)?;
            let id = call.stakeId.to::<usize>();
            let ok = self.stakes.get(id).map_or(false, |s| s.active);
            if ok && !forced_revert {
                let stake = &mut self.stakes[id];
                stake.active = false;
                self.balance += stake.amount * U256::from(9u64) / U256::from(10u64);
            }
            ("emergencyWithdraw", ok)
        } else if is::<IStakingContract::normalWithdrawCall>(data) {
            let call = IStakingContract::normalWithdrawCall::abi_decode(data, true)?;
            let id = call.stakeId.to::<usize>();
            let now = U256::from(self.now);
            let ok = self
                .stakes
                .get(id)
                .map_or(false, |s| s.active && now >= s.unlockTime);
            if ok && !forced_revert {
                let stake = &mut self.stakes[id];
                stake.active = false;
                self.balance += stake.amount;
            }
            ("normalWithdraw", ok)
        } else {
            ("unknown", false)
        };
        Ok((name, ok && !forced_revert))
    }
}

impl Provider for FakeChain {
    fn request(&self, method: &str, params: Value) -> Result<Value> {
        let mut s = self.state.lock().unwrap();
        match method {
            "eth_chainId" => Ok(json!(format!("{:#x}", s.chain_id))),
            "eth_requestAccounts" | "eth_accounts" => Ok(json!([USER])),
            "eth_blockNumber" => Ok(json!("0x10")),
            "eth_call" => {
                let tx: CallRequest = param(&params, 0)?;
                let out = s.call(tx)?;
                Ok(json!(Bytes::from(out)))
            }
            "eth_sendTransaction" => {
                if std::mem::take(&mut s.reject_next) {
                    return Err(ErrorCode::from_rpc(
                        4001,
                        "User rejected the request.".to_string(),
                    ));
                }
                let tx: CallRequest = param(&params, 0)?;
                let (name, ok) = s.execute(&tx)?;
                s.sent.push(name);
                s.nonce += 1;
                let hash = B256::from(U256::from(s.nonce));
                let polls = s.pending_polls;
                s.receipts.insert(hash, (ok, polls));
                Ok(json!(hash))
            }
            "eth_getTransactionReceipt" => {
                let hash: B256 = param(&params, 0)?;
                match s.receipts.get_mut(&hash) {
                    None => Ok(Value::Null),
                    Some((_, polls)) if *polls > 0 => {
                        *polls -= 1;
                        Ok(Value::Null)
                    }
                    Some((ok, _)) => Ok(json!({
                        "transactionHash": hash,
                        "blockNumber": "0x10",
                        "status": if *ok { "0x1" } else { "0x0" },
                    })),
                }
            }
            other => Err(ErrorCode::from_rpc(
                -32601,
                format!("method {} not found", other),
            )),
        }
    }
}

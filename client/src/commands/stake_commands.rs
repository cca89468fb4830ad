use super::render::*;
use alloy_primitives::{Address, U256};
use anyhow::{format_err, Result};
use labi_stake::{
    clock::{Clock, SystemClock},
    config::ClientConfig,
    data::{StakingData, TokenData},
    flow::{StakeFlow, StakeFlowDriver, StakeLimits},
    rpc::HttpProvider,
    session::WalletSession,
    states::{StakingSnapshot, TokenSnapshot, TxState},
    tx::TxTracker,
    units,
    view::{
        Notice, PositionView, RewardsView, StakeFormView, StakePositionsView, StakingStatsView,
        TokenMintingView,
    },
};
use log::info;
use std::sync::Arc;

fn finish(state: &TxState, success: &str) -> Result<()> {
    match state {
        TxState::Confirmed(_) => {
            print_notice(&Notice::success(success));
            Ok(())
        }
        TxState::Failed(failure) => Err(format_err!("{}", failure)),
        _ => Ok(()),
    }
}

/// A connected wallet session plus the data handles every command uses.
pub struct StakeApp {
    config: ClientConfig,
    session: Arc<WalletSession<HttpProvider>>,
    token: TokenData<HttpProvider>,
    staking: StakingData<HttpProvider>,
    clock: SystemClock,
}

impl StakeApp {
    pub fn connect(config: &ClientConfig) -> Result<Self> {
        let provider = HttpProvider::new(config.http_url.clone());
        let session = Arc::new(WalletSession::from_config(provider, config)?);
        Ok(Self {
            config: config.clone(),
            token: TokenData::new(session.clone()),
            staking: StakingData::new(session.clone()),
            session,
            clock: SystemClock,
        })
    }

    fn tracker(&self) -> TxTracker<HttpProvider> {
        TxTracker::new(self.session.clone(), self.config.poll_interval)
            .with_observer(print_tx_state)
    }

    fn snapshots(&self) -> (TokenSnapshot, StakingSnapshot) {
        (self.token.fetch(), self.staking.fetch())
    }

    fn amount(&self, input: &str) -> Result<U256> {
        Ok(units::parse_amount(input, self.token.fetch().decimals())?)
    }

    fn position(&self, stake_id: u64) -> Result<PositionView> {
        let (token, staking) = self.snapshots();
        StakePositionsView::build(
            &token,
            &staking,
            &TxState::Idle,
            self.clock.now(),
            self.config.reward_rate_bps,
            self.config.emergency_penalty_bps,
        )
        .positions
        .into_iter()
        .find(|position| position.stake_id == stake_id)
        .ok_or_else(|| format_err!("no active stake #{}", stake_id))
    }

    pub fn stats(&self) -> Result<()> {
        let (token, staking) = self.snapshots();
        print_stats(&StakingStatsView::build(
            &token,
            &staking,
            self.config.reward_rate_bps,
            self.config.emergency_penalty_bps,
        ));
        Ok(())
    }

    pub fn token(&self) -> Result<()> {
        print_token(&TokenMintingView::build(&self.token.fetch(), &TxState::Idle));
        Ok(())
    }

    pub fn mint(&self, to: Option<Address>, amount: &str) -> Result<()> {
        let amount = self.amount(amount)?;
        let token = self.token.clone();
        let mut tracker = self.tracker();
        let state = tracker.execute("mint", |_| match to {
            Some(to) => token.mint(to, amount),
            None => token.mint_to_self(amount),
        })?;

        let view = TokenMintingView::build(&self.token.fetch(), state);
        match &view.notice {
            Some(notice) if !notice.is_error() => {
                print_notice(notice);
                print_token(&view);
                Ok(())
            }
            _ => match state {
                TxState::Failed(failure) => Err(format_err!("{}", failure)),
                _ => Ok(()),
            },
        }
    }

    pub fn approve(&self, amount: &str) -> Result<()> {
        let amount = self.amount(amount)?;
        let token = self.token.clone();
        let mut tracker = self.tracker();
        let state = tracker.execute("approve", |_| token.approve(amount))?;
        finish(state, "Approval confirmed!")
    }

    pub fn stake(&self, amount: &str) -> Result<()> {
        let mut flow = StakeFlow::new(StakeLimits {
            min: self.config.min_stake,
            max: self.config.max_stake,
        });
        flow.set_input(amount);

        let form = StakeFormView::build(&flow, &self.token.fetch(), &TxState::Idle);
        print_stake_form(&form);
        if let Some(message) = form.validation {
            return Err(format_err!("{}", message));
        }

        let mut driver =
            StakeFlowDriver::new(self.token.clone(), self.staking.clone(), self.tracker());
        let state = driver.run(&mut flow)?;
        match (&state, flow.notice()) {
            (TxState::Failed(failure), _) => Err(format_err!("{}", failure)),
            (_, Some(notice)) => {
                print_notice(notice);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn withdraw(&self, stake_id: u64) -> Result<()> {
        let position = self.position(stake_id)?;
        info!("withdrawing stake #{} ({})", stake_id, position.amount);
        let staking = self.staking.clone();
        let mut tracker = self.tracker();
        let state = tracker.execute("withdraw", |_| staking.withdraw(stake_id))?;
        finish(state, "Withdrawal confirmed!")
    }

    pub fn normal_withdraw(&self, stake_id: u64) -> Result<()> {
        let position = self.position(stake_id)?;
        if !position.normal_withdraw_enabled {
            return Err(format_err!(
                "stake #{} is {}",
                stake_id,
                position.normal_withdraw_label.to_lowercase()
            ));
        }
        let staking = self.staking.clone();
        let mut tracker = self.tracker();
        let state = tracker.execute("normal withdraw", |_| staking.normal_withdraw(stake_id))?;
        finish(state, "Withdrawal confirmed!")
    }

    pub fn emergency_withdraw(&self, stake_id: u64) -> Result<()> {
        let position = self.position(stake_id)?;
        print_notice(&Notice::info(format!(
            "Emergency withdrawal of {}: {}",
            position.amount, position.emergency_preview
        )));
        let staking = self.staking.clone();
        let mut tracker = self.tracker();
        let state =
            tracker.execute("emergency withdraw", |_| staking.emergency_withdraw(stake_id))?;
        finish(state, "Emergency withdrawal confirmed!")
    }

    pub fn claim(&self) -> Result<()> {
        let (token, staking) = self.snapshots();
        let view =
            RewardsView::build(&token, &staking, &TxState::Idle, self.config.reward_rate_bps);
        if !view.claim_enabled {
            return Err(format_err!("{}", view.claim_label));
        }
        let staking = self.staking.clone();
        let mut tracker = self.tracker();
        let state = tracker.execute("claim", |_| staking.claim_rewards())?;
        finish(state, "Rewards claimed successfully!")
    }

    pub fn positions(&self) -> Result<()> {
        let (token, staking) = self.snapshots();
        print_positions(&StakePositionsView::build(
            &token,
            &staking,
            &TxState::Idle,
            self.clock.now(),
            self.config.reward_rate_bps,
            self.config.emergency_penalty_bps,
        ));
        Ok(())
    }

    pub fn rewards(&self) -> Result<()> {
        let (token, staking) = self.snapshots();
        print_rewards(&RewardsView::build(
            &token,
            &staking,
            &TxState::Idle,
            self.config.reward_rate_bps,
        ));
        Ok(())
    }

    /// Prints stats and rewards on every refresh, `ticks` times or forever.
    pub fn watch(&self, ticks: Option<u64>) -> Result<()> {
        let token = self.token.clone();
        let staking = self.staking.clone();
        let updates = self
            .session
            .refresh(self.config.poll_interval, move || (token.fetch(), staking.fetch()));
        info!("refreshing every {:?}", self.config.poll_interval);

        let mut seen = 0;
        for (token, staking) in updates.iter() {
            print_stats(&StakingStatsView::build(
                &token,
                &staking,
                self.config.reward_rate_bps,
                self.config.emergency_penalty_bps,
            ));
            print_rewards(&RewardsView::build(
                &token,
                &staking,
                &TxState::Idle,
                self.config.reward_rate_bps,
            ));
            seen += 1;
            if ticks.map_or(false, |ticks| seen >= ticks) {
                break;
            }
        }
        self.session.disconnect();
        Ok(())
    }
}

//! Approve-then-stake sequencing.
//!
//! [`StakeFlow`] is the pure state machine behind the stake form: it decides
//! which transaction to submit next and reacts to outcomes. [`StakeFlowDriver`]
//! runs it against the chain: one approval (only if needed), then one stake,
//! the stake strictly after the approval's receipt.

use crate::{
    data::{StakingData, TokenData},
    error::{ErrorCode, Result},
    rpc::Provider,
    states::{TokenSnapshot, TxFailure, TxState},
    tx::TxTracker,
    units,
    view::Notice,
};
use alloy_primitives::U256;
use log::info;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlowStep {
    #[default]
    Input,
    Approve,
    Stake,
}

/// What the caller must submit next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAction {
    SubmitApproval(U256),
    SubmitStake(U256),
    Done,
}

/// Inclusive per-stake bounds in base units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakeLimits {
    pub min: U256,
    pub max: U256,
}

impl StakeLimits {
    pub fn contains(&self, amount: U256) -> bool {
        amount >= self.min && amount <= self.max
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeFlow {
    limits: StakeLimits,
    step: FlowStep,
    input: String,
    /// Amount locked in when the sequence started.
    amount: Option<U256>,
    notice: Option<Notice>,
}

impl StakeFlow {
    pub fn new(limits: StakeLimits) -> Self {
        Self {
            limits,
            step: FlowStep::Input,
            input: String::new(),
            amount: None,
            notice: None,
        }
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn limits(&self) -> StakeLimits {
        self.limits
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Editing the amount is only possible before a sequence starts.
    pub fn set_input(&mut self, input: &str) {
        if self.step == FlowStep::Input {
            self.input = input.trim().to_string();
        }
    }

    /// Checks the typed amount against the bounds and the balance.
    pub fn validate(&self, token: &TokenSnapshot) -> Result<U256> {
        let decimals = token.decimals();
        let amount = units::parse_amount(&self.input, decimals)?;
        if !self.limits.contains(amount) {
            return Err(ErrorCode::AmountOutOfRange {
                min: units::format_exact(self.limits.min, decimals),
                max: units::format_exact(self.limits.max, decimals),
            });
        }
        if token.has_insufficient_balance(amount) {
            return Err(ErrorCode::InsufficientBalance);
        }
        Ok(amount)
    }

    /// A user-initiated stake request.
    ///
    /// From `Input` the amount is validated and the sequence starts with an
    /// approval only if the allowance does not cover it. From `Approve` or
    /// `Stake` (after a failure) the pending step is resubmitted.
    pub fn submit(&mut self, token: &TokenSnapshot) -> Result<FlowAction> {
        match (self.step, self.amount) {
            (FlowStep::Approve, Some(amount)) => Ok(FlowAction::SubmitApproval(amount)),
            (FlowStep::Stake, Some(amount)) => Ok(FlowAction::SubmitStake(amount)),
            _ => {
                let amount = self.validate(token)?;
                self.amount = Some(amount);
                self.notice = None;
                if token.needs_approval(amount) {
                    self.step = FlowStep::Approve;
                    Ok(FlowAction::SubmitApproval(amount))
                } else {
                    self.step = FlowStep::Stake;
                    Ok(FlowAction::SubmitStake(amount))
                }
            }
        }
    }

    /// The transaction for the current step was mined successfully.
    pub fn on_confirmed(&mut self) -> FlowAction {
        match (self.step, self.amount) {
            (FlowStep::Approve, Some(amount)) => {
                self.step = FlowStep::Stake;
                self.notice = Some(Notice::info("Approval confirmed! Proceeding to stake..."));
                FlowAction::SubmitStake(amount)
            }
            (FlowStep::Stake, Some(_)) => {
                self.step = FlowStep::Input;
                self.amount = None;
                self.input.clear();
                self.notice = Some(Notice::success("Staking transaction confirmed!"));
                FlowAction::Done
            }
            _ => FlowAction::Done,
        }
    }

    /// The transaction for the current step was rejected or reverted. The step
    /// is kept so the user can retry it; nothing is retried automatically.
    pub fn on_failed(&mut self, failure: &TxFailure) {
        self.notice = Some(Notice::error(failure.to_string()));
    }

    /// Leaves a stalled sequence and returns to amount entry.
    pub fn abort(&mut self) {
        self.step = FlowStep::Input;
        self.amount = None;
    }
}

/// Executes a [`StakeFlow`] against the token and staking contracts.
pub struct StakeFlowDriver<P: Provider> {
    pub token: TokenData<P>,
    pub staking: StakingData<P>,
    pub tracker: TxTracker<P>,
}

impl<P: Provider> StakeFlowDriver<P> {
    pub fn new(token: TokenData<P>, staking: StakingData<P>, tracker: TxTracker<P>) -> Self {
        Self {
            token,
            staking,
            tracker,
        }
    }

    /// Runs the sequence until the stake confirms or a transaction fails.
    /// Validation errors are returned before anything is submitted.
    pub fn run(&mut self, flow: &mut StakeFlow) -> Result<TxState> {
        let snapshot = self.token.fetch();
        let mut action = flow.submit(&snapshot)?;

        loop {
            let state = match action {
                FlowAction::SubmitApproval(amount) => {
                    info!("approving {} for staking", amount);
                    let token = &self.token;
                    self.tracker
                        .execute("approve", |_| token.approve(amount))?
                        .clone()
                }
                FlowAction::SubmitStake(amount) => {
                    info!("staking {}", amount);
                    let staking = &self.staking;
                    self.tracker
                        .execute("stake", |_| staking.stake(amount))?
                        .clone()
                }
                FlowAction::Done => return Ok(self.tracker.state().clone()),
            };

            match &state {
                TxState::Confirmed(_) => action = flow.on_confirmed(),
                TxState::Failed(failure) => {
                    flow.on_failed(failure);
                    return Ok(state);
                }
                _ => return Ok(state),
            }
        }
    }
}

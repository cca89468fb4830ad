use super::{busy_label, Notice};
use crate::{
    error::ErrorCode,
    flow::{FlowStep, StakeFlow},
    states::{TokenSnapshot, TxState},
    units,
};

/// Stake form panel: amount entry, inline validation and the submit button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StakeFormView {
    pub symbol: String,
    pub balance: String,
    pub input: String,
    /// Bounds hint shown under the input.
    pub range_hint: String,
    /// Inline validation message; `None` for an empty or acceptable amount.
    pub validation: Option<String>,
    pub needs_approval: bool,
    pub button_label: String,
    pub submit_enabled: bool,
    pub notice: Option<Notice>,
}

impl StakeFormView {
    pub fn build(flow: &StakeFlow, token: &TokenSnapshot, tx: &TxState) -> Self {
        let decimals = token.decimals();
        let symbol = token.symbol().to_string();
        let limits = flow.limits();
        let input = flow.input().to_string();

        let validation = if input.is_empty() {
            None
        } else {
            match flow.validate(token) {
                Ok(_) => None,
                Err(ErrorCode::InsufficientBalance) => {
                    Some(format!("Insufficient {} balance", symbol))
                }
                Err(e) => Some(e.to_string()),
            }
        };
        let needs_approval = !input.is_empty() && token.needs_approval_for(&input);

        let button_label = match busy_label(tx) {
            Some(label) => label.to_string(),
            None => match flow.step() {
                FlowStep::Approve => "Approve & Stake".to_string(),
                FlowStep::Stake => format!("Stake {}", symbol),
                FlowStep::Input if needs_approval => format!("Approve {}", symbol),
                FlowStep::Input => format!("Stake {}", symbol),
            },
        };
        // a stalled sequence can always be resumed; fresh input must validate
        let submit_enabled = !tx.is_busy()
            && match flow.step() {
                FlowStep::Input => !input.is_empty() && validation.is_none(),
                _ => true,
            };

        Self {
            range_hint: format!(
                "Min: {} {} | Max: {} {}",
                units::format_exact(limits.min, decimals),
                symbol,
                units::format_exact(limits.max, decimals),
                symbol
            ),
            balance: units::format_amount(token.balance_or_zero(), decimals, 2),
            symbol,
            input,
            validation,
            needs_approval,
            button_label,
            submit_enabled,
            notice: flow.notice().cloned(),
        }
    }
}

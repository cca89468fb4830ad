use super::{busy_label, Notice};
use crate::{states::TokenSnapshot, states::TxState, units};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenMintingView {
    pub name: String,
    pub symbol: String,
    pub balance: String,
    pub total_supply: String,
    pub button_label: String,
    pub button_enabled: bool,
    pub notice: Option<Notice>,
}

impl TokenMintingView {
    pub fn build(token: &TokenSnapshot, tx: &TxState) -> Self {
        let decimals = token.decimals();
        let notice = match tx {
            TxState::Confirmed(_) => Some(Notice::success(
                "Tokens minted successfully! Check your balance.",
            )),
            TxState::Failed(failure) => Some(Notice::error(failure.to_string())),
            _ => None,
        };
        Self {
            name: token.name().to_string(),
            symbol: token.symbol().to_string(),
            balance: units::format_amount(token.balance_or_zero(), decimals, 2),
            total_supply: units::format_amount(token.total_supply_or_zero(), decimals, 0),
            button_label: busy_label(tx)
                .unwrap_or("Get Free Tokens from Faucet")
                .to_string(),
            button_enabled: !tx.is_busy(),
            notice,
        }
    }
}

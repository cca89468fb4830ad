use crate::{
    error::Result,
    interface::IStakeToken,
    rpc::Provider,
    session::WalletSession,
    states::TokenSnapshot,
};
use alloy_primitives::{Address, B256, U256};
use std::sync::Arc;

/// Reads and writes against the stake token for the session's account.
///
/// Reads never fail: a failed read leaves its field `None` and the predicates
/// on [`TokenSnapshot`] treat unknown values conservatively.
pub struct TokenData<P: Provider> {
    session: Arc<WalletSession<P>>,
}

impl<P: Provider> Clone for TokenData<P> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
        }
    }
}

impl<P: Provider> TokenData<P> {
    pub fn new(session: Arc<WalletSession<P>>) -> Self {
        Self { session }
    }

    fn token(&self) -> Address {
        self.session.deployment().token_contract
    }

    fn spender(&self) -> Address {
        self.session.deployment().staking_contract
    }

    pub fn fetch(&self) -> TokenSnapshot {
        let token = self.token();
        let account = self.session.account();
        let session = &self.session;

        TokenSnapshot {
            name: session
                .read_or_default(token, &IStakeToken::nameCall {})
                .map(|r| r._0),
            symbol: session
                .read_or_default(token, &IStakeToken::symbolCall {})
                .map(|r| r._0),
            decimals: session
                .read_or_default(token, &IStakeToken::decimalsCall {})
                .map(|r| r._0),
            total_supply: session
                .read_or_default(token, &IStakeToken::totalSupplyCall {})
                .map(|r| r._0),
            balance: session
                .read_or_default(token, &IStakeToken::balanceOfCall { account })
                .map(|r| r._0),
            allowance: session
                .read_or_default(
                    token,
                    &IStakeToken::allowanceCall {
                        owner: account,
                        spender: self.spender(),
                    },
                )
                .map(|r| r._0),
        }
    }

    /// Test faucet: mints `amount` to the connected account.
    pub fn mint_to_self(&self, amount: U256) -> Result<B256> {
        self.session
            .send(self.token(), &IStakeToken::mintToSelfCall { amount })
    }

    pub fn mint(&self, to: Address, amount: U256) -> Result<B256> {
        self.session
            .send(self.token(), &IStakeToken::mintCall { to, amount })
    }

    /// Sets the staking contract's allowance to exactly `amount`.
    pub fn approve(&self, amount: U256) -> Result<B256> {
        self.session.send(
            self.token(),
            &IStakeToken::approveCall {
                spender: self.spender(),
                amount,
            },
        )
    }

    pub fn increase_allowance(&self, added_value: U256) -> Result<B256> {
        self.session.send(
            self.token(),
            &IStakeToken::increaseAllowanceCall {
                spender: self.spender(),
                addedValue: added_value,
            },
        )
    }
}

//! Read-only view of the jetton currently shown to the user.
//!
//! The store itself lives outside the burn action; the action only reads a
//! [`JettonSnapshot`] and asks for a refresh after a successful burn.

use ethers::types::U256;

use crate::address::TonAddress;
use crate::utils;

/// TEP-64: jettons without a `decimals` metadata field use 9.
pub const DEFAULT_JETTON_DECIMALS: u8 = 9;

/// Source of jetton details for the connected wallet.
pub trait JettonStore: Send + Sync {
    fn snapshot(&self) -> JettonSnapshot;

    /// Re-fetch jetton details. Fire and forget: callers do not wait for it.
    fn refresh(&self);
}

/// Everything the store currently knows. Any field may still be missing
/// while data is loading.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JettonSnapshot {
    pub jetton_master: Option<TonAddress>,
    pub symbol: String,
    /// Holder balance in base units.
    pub balance: Option<U256>,
    pub decimals: Option<u8>,
    /// The holder's jetton wallet, the contract a burn is sent to.
    pub jetton_address: Option<TonAddress>,
    pub is_my_wallet: bool,
}

impl JettonSnapshot {
    /// Decide whether the burn action is offered at all.
    pub fn view(&self) -> JettonView {
        match self.balance {
            Some(balance) if self.is_my_wallet => JettonView::Visible(LoadedJetton {
                jetton_master: self.jetton_master,
                symbol: self.symbol.clone(),
                balance,
                decimals: self.decimals.unwrap_or(DEFAULT_JETTON_DECIMALS),
                jetton_address: self.jetton_address,
            }),
            _ => JettonView::Hidden,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum JettonView {
    /// Balance unknown or someone else's wallet: render nothing.
    Hidden,
    Visible(LoadedJetton),
}

impl JettonView {
    pub fn loaded(&self) -> Option<&LoadedJetton> {
        match self {
            JettonView::Hidden => None,
            JettonView::Visible(jetton) => Some(jetton),
        }
    }
}

/// A jetton the user holds and may burn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedJetton {
    pub jetton_master: Option<TonAddress>,
    pub symbol: String,
    pub balance: U256,
    pub decimals: u8,
    pub jetton_address: Option<TonAddress>,
}

impl LoadedJetton {
    /// Jetton wallet address, once both the master and the wallet are known.
    pub fn burn_target(&self) -> Option<TonAddress> {
        self.jetton_master.and(self.jetton_address)
    }

    pub fn display_balance(&self) -> String {
        utils::format_display_amount(self.balance, self.decimals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(byte: u8) -> TonAddress {
        TonAddress::new(0, [byte; 32])
    }

    fn full_snapshot() -> JettonSnapshot {
        JettonSnapshot {
            jetton_master: Some(addr(1)),
            symbol: "JET".to_string(),
            balance: Some(U256::from(100u64)),
            decimals: Some(2),
            jetton_address: Some(addr(2)),
            is_my_wallet: true,
        }
    }

    #[test]
    fn test_view_visible_when_owned_with_balance() {
        let view = full_snapshot().view();
        let jetton = view.loaded().expect("visible");
        assert_eq!(jetton.symbol, "JET");
        assert_eq!(jetton.decimals, 2);
        assert_eq!(jetton.burn_target(), Some(addr(2)));
    }

    #[test]
    fn test_view_hidden_without_balance() {
        let snapshot = JettonSnapshot { balance: None, ..full_snapshot() };
        assert_eq!(snapshot.view(), JettonView::Hidden);
    }

    #[test]
    fn test_view_hidden_for_foreign_wallet() {
        let snapshot = JettonSnapshot { is_my_wallet: false, ..full_snapshot() };
        assert_eq!(snapshot.view(), JettonView::Hidden);
    }

    #[test]
    fn test_zero_balance_is_still_visible() {
        let snapshot = JettonSnapshot { balance: Some(U256::zero()), ..full_snapshot() };
        assert!(snapshot.view().loaded().is_some());
    }

    #[test]
    fn test_missing_decimals_defaults_to_nine() {
        let snapshot = JettonSnapshot { decimals: None, ..full_snapshot() };
        assert_eq!(snapshot.view().loaded().unwrap().decimals, DEFAULT_JETTON_DECIMALS);
    }

    #[test]
    fn test_burn_target_requires_master() {
        let snapshot = JettonSnapshot { jetton_master: None, ..full_snapshot() };
        assert_eq!(snapshot.view().loaded().unwrap().burn_target(), None);
    }

    #[test]
    fn test_display_balance() {
        let snapshot = JettonSnapshot {
            balance: Some(U256::from(123_456_789u64)),
            ..full_snapshot()
        };
        assert_eq!(snapshot.view().loaded().unwrap().display_balance(), "1,234,567.89");
    }
}

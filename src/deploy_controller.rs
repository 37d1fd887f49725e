//! Submission of jetton burns to the network.

use async_trait::async_trait;
use ethers::types::U256;

use crate::address::TonAddress;
use crate::errors::BurnError;
use crate::wallet_connection::Connection;

/// TEP-74 `burn` operation code.
pub const JETTON_BURN_OP: u32 = 0x595f07bc;

/// Largest value representable as TL-B `Coins` (VarUInteger 16).
pub fn max_coins() -> U256 {
    (U256::one() << 120u32) - U256::one()
}

/// Sends burn transactions on behalf of the connected wallet.
#[async_trait]
pub trait DeployController: Send + Sync {
    /// Burn `amount` base units from the jetton wallet at `jetton_address`.
    ///
    /// Resolves once the wallet accepted the transaction, or fails with a
    /// [`BurnError`].
    async fn burn_jettons(
        &self,
        connection: &Connection,
        amount: U256,
        jetton_address: &TonAddress,
    ) -> Result<(), BurnError>;
}

/// Body of the internal message sent to a jetton wallet to burn tokens.
///
/// ```raw
/// burn#595f07bc query_id:uint64 amount:(VarUInteger 16)
///               response_destination:MsgAddress
///               custom_payload:(Maybe ^Cell)
///               = InternalMsgBody;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnMessage {
    pub query_id: u64,
    pub amount: U256,
    /// Receives the excess TON once the burn is processed.
    pub response_destination: TonAddress,
    /// TON attached to pay for processing, in nanotons.
    pub attached_nanoton: u64,
}

impl BurnMessage {
    pub fn new(
        amount: U256,
        response_destination: TonAddress,
        attached_nanoton: u64,
    ) -> Result<Self, BurnError> {
        if amount.is_zero() {
            return Err(BurnError::failed("Burn amount must be positive"));
        }
        if amount > max_coins() {
            return Err(BurnError::failed("Burn amount exceeds the jetton amount limit"));
        }
        Ok(Self {
            query_id: rand::random(),
            amount,
            response_destination,
            attached_nanoton,
        })
    }

    pub fn op(&self) -> u32 {
        JETTON_BURN_OP
    }

    /// One-line description for logs.
    pub fn describe(&self) -> String {
        format!(
            "burn#{:08x} query_id={} amount={} response_destination={} attached={} nanoton",
            self.op(),
            self.query_id,
            self.amount,
            self.response_destination,
            self.attached_nanoton
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> TonAddress {
        TonAddress::new(0, [9; 32])
    }

    #[test]
    fn test_max_coins() {
        assert_eq!(max_coins(), U256::from(2u8).pow(U256::from(120u8)) - U256::one());
    }

    #[test]
    fn test_burn_message_new() {
        let msg = BurnMessage::new(U256::from(5u64), owner(), 50_000_000).unwrap();
        assert_eq!(msg.op(), 0x595f07bc);
        assert_eq!(msg.amount, U256::from(5u64));
        assert_eq!(msg.response_destination, owner());
        assert_eq!(msg.attached_nanoton, 50_000_000);
    }

    #[test]
    fn test_burn_message_rejects_zero() {
        let err = BurnMessage::new(U256::zero(), owner(), 0).unwrap_err();
        assert!(err.message().unwrap().contains("positive"));
    }

    #[test]
    fn test_burn_message_rejects_above_coins_range() {
        let err = BurnMessage::new(max_coins() + U256::one(), owner(), 0).unwrap_err();
        assert!(err.message().unwrap().contains("limit"));
        assert!(BurnMessage::new(max_coins(), owner(), 0).is_ok());
    }

    #[test]
    fn test_describe_contains_op_and_amount() {
        let msg = BurnMessage::new(U256::from(42u64), owner(), 1).unwrap();
        let text = msg.describe();
        assert!(text.starts_with("burn#595f07bc"));
        assert!(text.contains("amount=42"));
    }
}

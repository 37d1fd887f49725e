use crate::address::TonAddress;
use crate::config::TonNetwork;

/// Handle to the active wallet session, passed along with every burn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    /// Address of the connected wallet (the jetton owner).
    pub wallet: TonAddress,
    pub network: TonNetwork,
}

/// Provides the active wallet session. The session is assumed to be
/// connected whenever the burn action is reachable.
pub trait WalletConnection: Send + Sync {
    fn connection(&self) -> Connection;
}

/// A wallet session that never changes, e.g. one restored from settings.
#[derive(Clone, Debug)]
pub struct StaticWallet {
    connection: Connection,
}

impl StaticWallet {
    pub fn new(wallet: TonAddress, network: TonNetwork) -> Self {
        Self {
            connection: Connection { wallet, network },
        }
    }
}

impl WalletConnection for StaticWallet {
    fn connection(&self) -> Connection {
        self.connection.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_wallet_returns_same_connection() {
        let wallet = StaticWallet::new(TonAddress::new(0, [7; 32]), TonNetwork::Testnet);
        let first = wallet.connection();
        assert_eq!(first, wallet.connection());
        assert_eq!(first.network, TonNetwork::Testnet);
        assert_eq!(first.wallet.hash, [7; 32]);
    }
}

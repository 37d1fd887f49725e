//! In-memory jetton wallet for running the burn flow without a network.
//!
//! Acts as store, wallet session and deploy controller at once. Burns are
//! applied to an "on-chain" balance after a simulated latency; the balance the
//! UI sees only changes once [`JettonStore::refresh`] publishes it, as with a
//! real indexer.

use async_trait::async_trait;
use ethers::types::U256;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;
use tracing::info;

use crate::address::TonAddress;
use crate::config::{Config, DryRunJetton, TonNetwork};
use crate::deploy_controller::{BurnMessage, DeployController};
use crate::errors::BurnError;
use crate::jetton_store::{JettonSnapshot, JettonStore};
use crate::wallet_connection::{Connection, WalletConnection};

#[derive(Debug)]
struct DryRunState {
    onchain_balance: U256,
    published: JettonSnapshot,
    abort_next: bool,
    fail_next: Option<String>,
    burns: Vec<BurnMessage>,
}

#[derive(Clone, Debug)]
pub struct DryRunWallet {
    state: Arc<RwLock<DryRunState>>,
    owner: TonAddress,
    network: TonNetwork,
    latency: Duration,
    attached_nanoton: u64,
}

impl DryRunWallet {
    pub fn new(jetton: &DryRunJetton, network: TonNetwork, attached_nanoton: u64) -> Self {
        let published = JettonSnapshot {
            jetton_master: Some(jetton.jetton_master),
            symbol: jetton.symbol.clone(),
            balance: Some(jetton.balance),
            decimals: Some(jetton.decimals),
            jetton_address: Some(jetton.jetton_wallet),
            is_my_wallet: true,
        };
        Self {
            state: Arc::new(RwLock::new(DryRunState {
                onchain_balance: jetton.balance,
                published,
                abort_next: false,
                fail_next: None,
                burns: Vec::new(),
            })),
            owner: jetton.owner,
            network,
            latency: jetton.latency,
            attached_nanoton,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.dry_run, config.network, config.burn_attached_nanoton)
    }

    fn read(&self) -> RwLockReadGuard<'_, DryRunState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DryRunState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Balance after all accepted burns, whether published or not.
    pub fn onchain_balance(&self) -> U256 {
        self.read().onchain_balance
    }

    /// Burn messages accepted so far.
    pub fn burns(&self) -> Vec<BurnMessage> {
        self.read().burns.clone()
    }

    /// Make the next burn end without a message, like a dismissed wallet
    /// prompt.
    pub fn abort_next_burn(&self) {
        self.write().abort_next = true;
    }

    /// Make the next burn fail with `message`.
    pub fn fail_next_burn(&self, message: impl Into<String>) {
        self.write().fail_next = Some(message.into());
    }
}

impl JettonStore for DryRunWallet {
    fn snapshot(&self) -> JettonSnapshot {
        self.read().published.clone()
    }

    fn refresh(&self) {
        let mut state = self.write();
        state.published.balance = Some(state.onchain_balance);
        tracing::debug!("Published dry-run balance {}", state.onchain_balance);
    }
}

impl WalletConnection for DryRunWallet {
    fn connection(&self) -> Connection {
        Connection {
            wallet: self.owner,
            network: self.network,
        }
    }
}

#[async_trait]
impl DeployController for DryRunWallet {
    async fn burn_jettons(
        &self,
        connection: &Connection,
        amount: U256,
        jetton_address: &TonAddress,
    ) -> Result<(), BurnError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut state = self.write();
        if std::mem::take(&mut state.abort_next) {
            return Err(BurnError::Aborted);
        }
        if let Some(message) = state.fail_next.take() {
            return Err(BurnError::Failed(message));
        }
        if connection.wallet != self.owner {
            return Err(BurnError::failed(format!(
                "Wallet {} does not own this jetton wallet",
                connection.wallet
            )));
        }
        if state.published.jetton_address != Some(*jetton_address) {
            return Err(BurnError::failed(format!("Unknown jetton wallet {}", jetton_address)));
        }
        if amount > state.onchain_balance {
            return Err(BurnError::failed("Insufficient jetton balance"));
        }

        let message = BurnMessage::new(amount, connection.wallet, self.attached_nanoton)?;
        info!("Dry-run {}", message.describe());
        state.onchain_balance -= amount;
        state.burns.push(message);
        Ok(())
    }
}

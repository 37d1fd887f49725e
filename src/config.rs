use anyhow::Result;
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use url::Url;

use crate::address::TonAddress;
use crate::jetton_store::DEFAULT_JETTON_DECIMALS;
use crate::utils;

/// TON network the wallet is connected to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TonNetwork {
    Mainnet,
    #[default]
    Testnet,
}

impl TonNetwork {
    pub fn info(&self) -> &'static TonNetworkInfo {
        match self {
            TonNetwork::Mainnet => &TON_NETWORKS[0],
            TonNetwork::Testnet => &TON_NETWORKS[1],
        }
    }

    pub fn is_testnet(&self) -> bool {
        matches!(self, TonNetwork::Testnet)
    }

    /// Parse the `JETTON_NETWORK` style value ("mainnet", "testnet").
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Some(TonNetwork::Mainnet),
            "testnet" | "test" => Some(TonNetwork::Testnet),
            _ => None,
        }
    }
}

/// A TON network with its label and public endpoints.
#[derive(Clone, Debug)]
pub struct TonNetworkInfo {
    pub label: &'static str,
    pub network: TonNetwork,
    pub explorer: &'static str,
}

pub const TON_NETWORKS: &[TonNetworkInfo] = &[
    TonNetworkInfo {
        label: "TON Mainnet",
        network: TonNetwork::Mainnet,
        explorer: "https://tonviewer.com",
    },
    TonNetworkInfo {
        label: "TON Testnet",
        network: TonNetwork::Testnet,
        explorer: "https://testnet.tonviewer.com",
    },
];

/// Get the full URL to view an address on the block explorer.
///
/// Addresses are rendered in the form the explorer expects for the network
/// (testnet-flagged on testnet).
pub fn get_address_explorer_url(network: TonNetwork, address: &TonAddress) -> Result<Url> {
    let base = Url::parse(network.info().explorer)?;
    let friendly = address.to_base64_url(true, network.is_testnet());
    Ok(base.join(&friendly)?)
}

/// Default TON attached to a burn message to pay for forwarding and the
/// excess refund (0.05 TON).
pub const DEFAULT_BURN_ATTACHED_NANOTON: u64 = 50_000_000;

/// Default simulated wallet round-trip for the dry-run backend.
pub const DEFAULT_DRY_RUN_LATENCY_MS: u64 = 1500;

/// Jetton served by the dry-run backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DryRunJetton {
    pub symbol: String,
    pub decimals: u8,
    /// Starting balance in base units.
    pub balance: U256,
    pub owner: TonAddress,
    pub jetton_master: TonAddress,
    pub jetton_wallet: TonAddress,
    pub latency: Duration,
}

impl Default for DryRunJetton {
    fn default() -> Self {
        Self {
            symbol: "DEMO".to_string(),
            decimals: DEFAULT_JETTON_DECIMALS,
            // 1,000 DEMO
            balance: U256::from(1_000_000_000_000u64),
            owner: TonAddress::new(0, [0x11; 32]),
            jetton_master: TonAddress::new(0, [0x22; 32]),
            jetton_wallet: TonAddress::new(0, [0x33; 32]),
            latency: Duration::from_millis(DEFAULT_DRY_RUN_LATENCY_MS),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub network: TonNetwork,
    /// Nanotons attached to every burn message for fees.
    pub burn_attached_nanoton: u64,
    pub dry_run: DryRunJetton,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: TonNetwork::default(),
            burn_attached_nanoton: DEFAULT_BURN_ATTACHED_NANOTON,
            dry_run: DryRunJetton::default(),
        }
    }
}

impl Config {
    /// Build the config from defaults overridden by environment variables.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("JETTON_NETWORK") {
            match TonNetwork::from_name(&v) {
                Some(network) => config.network = network,
                None => tracing::warn!("Ignoring unknown JETTON_NETWORK={}", v),
            }
        }
        if let Some(v) = lookup("BURN_ATTACHED_NANOTON") {
            match v.trim().parse() {
                Ok(n) => config.burn_attached_nanoton = n,
                Err(e) => tracing::warn!("Ignoring BURN_ATTACHED_NANOTON={}: {}", v, e),
            }
        }

        let dry_run = &mut config.dry_run;
        if let Some(v) = lookup("JETTON_SYMBOL") {
            if !v.trim().is_empty() {
                dry_run.symbol = v.trim().to_string();
            }
        }
        if let Some(v) = lookup("JETTON_DECIMALS") {
            match v.trim().parse() {
                Ok(d) => dry_run.decimals = d,
                Err(e) => tracing::warn!("Ignoring JETTON_DECIMALS={}: {}", v, e),
            }
        }
        // Balance is given in display units, so it is read after decimals.
        if let Some(v) = lookup("JETTON_BALANCE") {
            match utils::to_base_units(&v, dry_run.decimals) {
                Ok(balance) => dry_run.balance = balance,
                Err(e) => tracing::warn!("Ignoring JETTON_BALANCE={}: {}", v, e),
            }
        }
        for (key, slot) in [
            ("JETTON_OWNER", &mut dry_run.owner),
            ("JETTON_MASTER", &mut dry_run.jetton_master),
            ("JETTON_WALLET", &mut dry_run.jetton_wallet),
        ] {
            if let Some(v) = lookup(key) {
                match TonAddress::parse(&v) {
                    Ok(addr) => *slot = addr,
                    Err(e) => tracing::warn!("Ignoring {}={}: {}", key, v, e),
                }
            }
        }
        if let Some(v) = lookup("DRY_RUN_LATENCY_MS") {
            match v.trim().parse() {
                Ok(ms) => dry_run.latency = Duration::from_millis(ms),
                Err(e) => tracing::warn!("Ignoring DRY_RUN_LATENCY_MS={}: {}", v, e),
            }
        }

        config
    }

    pub fn network_label(&self) -> &'static str {
        self.network.info().label
    }
}

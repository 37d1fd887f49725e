//! The "burn jettons" action.
//!
//! Holds the dialog state, validates the entered amount against the cached
//! balance and drives a single burn through
//! `Idle -> Submitting -> (Burned | Failed) -> Idle`.
//!
//! Effects on success happen in a fixed order: close the dialog, notify,
//! refresh the store, clear loading. The GUI and the headless
//! [`BurnAction::burn`] share the same transitions; they only differ in how
//! the deploy controller call is awaited.

use ethers::types::U256;
use tracing::{debug, error, info, warn};

use crate::address::TonAddress;
use crate::deploy_controller::DeployController;
use crate::errors::{BurnError, BurnRejection};
use crate::jetton_store::{JettonStore, LoadedJetton};
use crate::notification::{Notification, Notifier};
use crate::utils;
use crate::wallet_connection::WalletConnection;

/// Check an entered amount and convert it to base units.
///
/// `None` or blank input counts as no amount.
pub fn validate_burn_amount(
    input: Option<&str>,
    jetton: &LoadedJetton,
) -> Result<U256, BurnRejection> {
    let minimum = || BurnRejection::MinimumAmount {
        symbol: jetton.symbol.clone(),
    };

    let Some(text) = input.map(str::trim).filter(|s| !s.is_empty()) else {
        return Err(minimum());
    };
    let amount = utils::to_base_units(text, jetton.decimals)?;
    if amount.is_zero() {
        return Err(minimum());
    }
    if amount > jetton.balance {
        return Err(BurnRejection::MaximumAmount {
            balance: jetton.display_balance(),
        });
    }
    Ok(amount)
}

/// A validated burn on its way to the deploy controller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurnRequest {
    /// Amount in base units.
    pub amount: U256,
    /// Jetton wallet the burn is sent to.
    pub jetton_address: TonAddress,
    pub symbol: String,
    pub decimals: u8,
}

impl BurnRequest {
    pub fn display_amount(&self) -> String {
        utils::format_display_amount(self.amount, self.decimals)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BurnPhase {
    Idle,
    Submitting(BurnRequest),
}

/// How a submitted burn ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BurnOutcome {
    Burned(BurnRequest),
    Failed {
        request: BurnRequest,
        error: BurnError,
    },
}

impl BurnOutcome {
    pub fn request(&self) -> &BurnRequest {
        match self {
            BurnOutcome::Burned(request) => request,
            BurnOutcome::Failed { request, .. } => request,
        }
    }
}

/// State of one burn action widget.
#[derive(Debug)]
pub struct BurnAction {
    /// Raw amount text; empty means no amount entered yet.
    amount: String,
    dialog_open: bool,
    phase: BurnPhase,
}

impl Default for BurnAction {
    fn default() -> Self {
        Self {
            amount: String::new(),
            dialog_open: false,
            phase: BurnPhase::Idle,
        }
    }
}

impl BurnAction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> Option<&str> {
        let trimmed = self.amount.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    /// Direct access for text inputs.
    pub fn amount_input_mut(&mut self) -> &mut String {
        &mut self.amount
    }

    pub fn phase(&self) -> &BurnPhase {
        &self.phase
    }

    /// True strictly while a burn is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, BurnPhase::Submitting(_))
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// The dialog is replaced by the loading overlay while submitting.
    pub fn is_dialog_visible(&self) -> bool {
        self.dialog_open && !self.is_loading()
    }

    pub fn open_dialog(&mut self) {
        self.dialog_open = true;
    }

    /// Close the dialog and reset the amount to 0.
    ///
    /// Returns false (and does nothing) while a burn is in flight.
    pub fn close_dialog(&mut self) -> bool {
        if self.is_loading() {
            debug!("Ignoring dialog close while a burn is in flight");
            return false;
        }
        self.amount = "0".to_string();
        self.dialog_open = false;
        true
    }

    /// Validate the entered amount and move to `Submitting`.
    ///
    /// Returns the request to hand to the deploy controller, or `None` when
    /// nothing should be sent (already submitting, jetton not ready, or the
    /// amount was rejected with a warning).
    pub fn submit<N>(&mut self, jetton: &LoadedJetton, notifier: &mut N) -> Option<BurnRequest>
    where
        N: Notifier + ?Sized,
    {
        if self.is_loading() {
            debug!("Burn already in flight, ignoring submit");
            return None;
        }
        let Some(jetton_address) = jetton.burn_target() else {
            debug!("Jetton master or wallet address not loaded yet, ignoring submit");
            return None;
        };

        match validate_burn_amount(self.amount(), jetton) {
            Err(rejection) => {
                warn!("Burn rejected: {}", rejection);
                notifier.show_notification(rejection.notification());
                None
            }
            Ok(amount) => {
                let request = BurnRequest {
                    amount,
                    jetton_address,
                    symbol: jetton.symbol.clone(),
                    decimals: jetton.decimals,
                };
                info!(
                    "Submitting burn of {} {} ({} base units) from {}",
                    request.display_amount(),
                    request.symbol,
                    request.amount,
                    request.jetton_address
                );
                self.phase = BurnPhase::Submitting(request.clone());
                Some(request)
            }
        }
    }

    /// Apply the deploy controller's result and return to `Idle`.
    ///
    /// Returns `None` if no burn was in flight.
    pub fn finish<N, S>(
        &mut self,
        result: Result<(), BurnError>,
        notifier: &mut N,
        store: &S,
    ) -> Option<BurnOutcome>
    where
        N: Notifier + ?Sized,
        S: JettonStore + ?Sized,
    {
        let request = match &self.phase {
            BurnPhase::Submitting(request) => request.clone(),
            BurnPhase::Idle => {
                warn!("Burn result arrived with no burn in flight");
                return None;
            }
        };

        let outcome = match result {
            Ok(()) => {
                self.dialog_open = false;
                info!("Burned {} {}", request.display_amount(), request.symbol);
                notifier.show_notification(Notification::success(format!(
                    "Successfully burned {} {}",
                    request.display_amount(),
                    request.symbol
                )));
                store.refresh();
                BurnOutcome::Burned(request)
            }
            Err(err) => {
                match err.message() {
                    Some(message) => {
                        error!("Burn failed: {}", message);
                        notifier.show_notification(Notification::error(message));
                    }
                    None => debug!("Burn aborted without a message"),
                }
                BurnOutcome::Failed {
                    request,
                    error: err,
                }
            }
        };

        self.phase = BurnPhase::Idle;
        Some(outcome)
    }

    /// Run a whole burn: validate, call the controller, apply the result.
    pub async fn burn<W, C, N, S>(
        &mut self,
        jetton: &LoadedJetton,
        wallet: &W,
        controller: &C,
        notifier: &mut N,
        store: &S,
    ) -> Option<BurnOutcome>
    where
        W: WalletConnection + ?Sized,
        C: DeployController + ?Sized,
        N: Notifier + ?Sized,
        S: JettonStore + ?Sized,
    {
        let request = self.submit(jetton, notifier)?;
        let connection = wallet.connection();
        let result = controller
            .burn_jettons(&connection, request.amount, &request.jetton_address)
            .await;
        self.finish(result, notifier, store)
    }
}

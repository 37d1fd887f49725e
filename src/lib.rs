//! Burn jettons held by the connected TON wallet.
//!
//! The burn flow itself ([`burn_action`]) only depends on three seams: a
//! [`jetton_store::JettonStore`], a [`wallet_connection::WalletConnection`]
//! and a [`deploy_controller::DeployController`]. [`dry_run`] implements all
//! three in memory; [`gui`] is the egui front-end.

pub mod address;
pub mod burn_action;
pub mod config;
pub mod deploy_controller;
pub mod dry_run;
pub mod errors;
pub mod gui;
pub mod jetton_store;
pub mod notification;
pub mod operation_log;
pub mod user_settings;
pub mod utils;
pub mod wallet_connection;

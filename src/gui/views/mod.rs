//! View modules for the GUI
//!
//! - `jetton` - Jetton panel (symbol, balance, addresses, refresh)
//! - `burn` - Burn trigger, burn dialog and loading overlay
//!
//! Views take `&mut GuiApp` and an `egui::Ui` and are called from
//! `App::update` in `app.rs`.

pub mod burn;
pub mod jetton;

pub use burn::view_burn_action;

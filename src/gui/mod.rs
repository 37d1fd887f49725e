//! GUI module for the jetton burner
//!
//! This module provides the graphical user interface built with egui/eframe.
//!
//! ## Module Structure
//!
//! - `app` - Main GuiApp struct, job polling and the frame loop
//! - `async_job` - Worker-thread jobs polled from the frame loop
//! - `theme` - Centralized theme and styling system (AppTheme)
//! - `notifications` - Toasts and notification history
//! - `views` - Jetton panel and burn action widget
//!
//! ## Usage
//!
//! ```no_run
//! use jetton_burner::config::Config;
//! use jetton_burner::gui;
//!
//! let config = Config::from_env();
//! gui::launch(config).expect("Failed to launch GUI");
//! ```

mod app;
pub mod async_job;
pub mod notifications;
pub mod theme;
pub mod views;

pub use app::{launch, GuiApp, Services};

pub use async_job::AsyncJob;
pub use notifications::{NotificationCenter, NotificationEntry};
pub use theme::{configure_style, AppTheme};

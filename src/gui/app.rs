//! Main GUI application module
//!
//! Contains the GuiApp struct, job polling and the frame loop.

use anyhow::{anyhow, Result};
use eframe::{egui, egui::RichText, App, Frame, NativeOptions};
use std::sync::Arc;
use std::time::Duration;

use crate::{
    address::TonAddress,
    burn_action::BurnAction,
    config::{self, Config, TonNetwork},
    deploy_controller::DeployController,
    dry_run::DryRunWallet,
    errors::BurnError,
    jetton_store::{JettonStore, LoadedJetton},
    notification::{Notification, Notifier},
    operation_log,
    user_settings::UserSettings,
    wallet_connection::WalletConnection,
};

use super::async_job::AsyncJob;
use super::notifications::NotificationCenter;
use super::theme::{configure_style, AppTheme};

const BURN_OPERATION: &str = "Jetton Burn";

/// The collaborators the burn action talks to.
#[derive(Clone)]
pub struct Services {
    pub store: Arc<dyn JettonStore>,
    pub wallet: Arc<dyn WalletConnection>,
    pub controller: Arc<dyn DeployController>,
    /// Set when running against the in-memory backend, for its test controls.
    pub dry_run: Option<Arc<DryRunWallet>>,
}

impl Services {
    pub fn dry_run(wallet: DryRunWallet) -> Self {
        let wallet = Arc::new(wallet);
        Self {
            store: wallet.clone(),
            wallet: wallet.clone(),
            controller: wallet.clone(),
            dry_run: Some(wallet),
        }
    }
}

pub struct GuiApp {
    pub(crate) theme: AppTheme,
    pub(crate) config: Config,
    pub(crate) user_settings: UserSettings,
    pub(crate) notifications: NotificationCenter,
    pub(crate) show_notifications_popup: bool,
    pub(crate) services: Services,
    pub(crate) burn: BurnAction,
    pub(crate) burn_job: Option<AsyncJob<Result<(), BurnError>>>,
    /// Append finished burns to the operation log
    pub(crate) record_operations: bool,
    pub(crate) show_operation_log: bool,
    pub(crate) operation_log_text: String,
}

impl GuiApp {
    pub fn new(
        config: Config,
        user_settings: UserSettings,
        services: Services,
        ctx: &egui::Context,
    ) -> Self {
        let theme = AppTheme::default();
        configure_style(ctx, &theme);

        Self {
            theme,
            notifications: NotificationCenter::from_settings(&user_settings),
            config,
            user_settings,
            show_notifications_popup: false,
            services,
            burn: BurnAction::new(),
            burn_job: None,
            record_operations: true,
            show_operation_log: false,
            operation_log_text: String::new(),
        }
    }

    /// Validate the dialog amount and hand the burn to a worker thread.
    pub(crate) fn start_burn(&mut self, jetton: &LoadedJetton) {
        let Some(request) = self.burn.submit(jetton, &mut self.notifications) else {
            return;
        };

        let connection = self.services.wallet.connection();
        let controller = Arc::clone(&self.services.controller);
        self.burn_job = Some(AsyncJob::spawn(move || async move {
            Ok(controller
                .burn_jettons(&connection, request.amount, &request.jetton_address)
                .await)
        }));
    }

    pub(crate) fn poll_jobs(&mut self) {
        let Some(job) = self.burn_job.as_mut() else {
            return;
        };
        let Some(result) = job.poll() else {
            return;
        };
        self.burn_job = None;

        // A worker that died is reported like any other failed burn.
        let result = result.unwrap_or_else(|e| Err(BurnError::failed(e.to_string())));
        let store = Arc::clone(&self.services.store);
        let Some(outcome) = self.burn.finish(result, &mut self.notifications, store.as_ref()) else {
            return;
        };

        if self.record_operations {
            let details = operation_log::describe_outcome(&outcome);
            let network = self.config.network;
            if let Err(e) = operation_log::append_log(BURN_OPERATION, network, details) {
                tracing::warn!("Failed to write operation log: {}", e);
            }
            if self.show_operation_log {
                self.refresh_operation_log();
            }
        }
    }

    pub(crate) fn refresh_operation_log(&mut self) {
        self.operation_log_text = match operation_log::read_log() {
            Ok(content) if content.trim().is_empty() => {
                "No logs yet. Burn some jettons to generate entries.".to_string()
            }
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read operation log: {}", e);
                format!("Failed to read operation log: {}", e)
            }
        };
    }

    fn toggle_operation_log(&mut self) {
        self.show_operation_log = !self.show_operation_log;
        if self.show_operation_log {
            self.refresh_operation_log();
        }
    }

    pub(crate) fn open_explorer(&mut self, address: &TonAddress) {
        let url = match config::get_address_explorer_url(self.config.network, address) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Failed to build explorer URL for {}: {}", address, e);
                return;
            }
        };
        if let Err(e) = open::that(url.as_str()) {
            tracing::warn!("Failed to open {}: {}", url, e);
            self.notifications
                .show_notification(Notification::error(format!("Could not open browser: {}", e)));
        }
    }

    fn select_network(&mut self, network: TonNetwork) {
        if self.user_settings.selected_network == Some(network) {
            return;
        }
        self.user_settings.selected_network = Some(network);
        match self.user_settings.save() {
            Ok(()) => self.notifications.show_notification(Notification::success(format!(
                "{} will be used after restart",
                network.info().label
            ))),
            Err(e) => self
                .notifications
                .show_notification(Notification::error(format!("Failed to save settings: {}", e))),
        }
    }

    fn render_top_bar(&mut self, ui: &mut egui::Ui) {
        ui.add_space(self.theme.spacing_sm);
        ui.horizontal(|ui| {
            ui.label(RichText::new("JETTON BURNER").size(18.0).strong().color(self.theme.primary));
            ui.label(
                RichText::new(format!("v{}", env!("CARGO_PKG_VERSION")))
                    .size(11.0)
                    .color(self.theme.text_secondary),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let count = self.notifications.len();
                let label = if count > 0 { format!("[!] {}", count) } else { "[!]".to_string() };
                if ui
                    .add(self.theme.button_small(&label))
                    .on_hover_text("Notification history")
                    .clicked()
                {
                    self.show_notifications_popup = !self.show_notifications_popup;
                }
                if ui
                    .add(self.theme.button_small("[L] Log"))
                    .on_hover_text("Operation log")
                    .clicked()
                {
                    self.toggle_operation_log();
                }

                let mut selected = self.user_settings.effective_network(self.config.network);
                egui::ComboBox::from_id_source("network_select")
                    .selected_text(selected.info().label)
                    .show_ui(ui, |ui| {
                        for info in config::TON_NETWORKS {
                            ui.selectable_value(&mut selected, info.network, info.label);
                        }
                    });
                if selected != self.user_settings.effective_network(self.config.network) {
                    self.select_network(selected);
                }

                ui.label(
                    RichText::new(format!("Connected: {}", self.config.network_label()))
                        .color(self.theme.text_secondary),
                );
            });
        });
        ui.add_space(self.theme.spacing_sm);
    }

    fn render_toasts(&self, ctx: &egui::Context) {
        let now = chrono::Local::now();
        egui::Area::new(egui::Id::new("toast_overlay"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-10.0, -10.0])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for entry in self.notifications.active_at(now) {
                    self.theme.frame_toast(entry.severity).show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.label(
                            RichText::new(&entry.message)
                                .size(13.0)
                                .color(self.theme.severity_color(entry.severity)),
                        );
                    });
                    ui.add_space(self.theme.spacing_xs);
                }
            });
    }

    fn render_notification_history(&mut self, ctx: &egui::Context) {
        let mut open = self.show_notifications_popup;
        let mut clear = false;
        egui::Window::new("[#] Notification History")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .default_height(320.0)
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 50.0])
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} notifications", self.notifications.len()))
                            .color(self.theme.text_secondary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.add(self.theme.button_small("[C] Clear")).clicked() {
                            clear = true;
                        }
                    });
                });
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .max_height(260.0)
                    .show(ui, |ui| {
                        if self.notifications.is_empty() {
                            ui.label(
                                RichText::new("No notifications yet.")
                                    .color(self.theme.text_secondary),
                            );
                        }
                        for entry in self.notifications.entries().rev() {
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(format!("[{}]", entry.time_ago()))
                                        .size(11.0)
                                        .color(self.theme.text_secondary),
                                );
                                ui.label(
                                    RichText::new(entry.severity.label())
                                        .size(11.0)
                                        .color(self.theme.severity_color(entry.severity)),
                                );
                                ui.label(RichText::new(&entry.message).size(12.0));
                            });
                            ui.add_space(3.0);
                        }
                    });
            });
        if clear {
            self.notifications.clear();
        }
        self.show_notifications_popup = open;
    }

    fn render_operation_log(&mut self, ctx: &egui::Context) {
        let mut open = self.show_operation_log;
        let mut refresh = false;
        egui::Window::new("[L] Operation Log")
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(520.0)
            .default_height(360.0)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Log file: {}", operation_log::log_file_path()))
                        .size(11.0)
                        .color(self.theme.text_secondary),
                );
                ui.label(
                    RichText::new(format!("Settings: {}", UserSettings::settings_path_display()))
                        .size(11.0)
                        .color(self.theme.text_secondary),
                );
                if ui.add(self.theme.button_small("Refresh")).clicked() {
                    refresh = true;
                }
                ui.separator();

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        ui.label(RichText::new(&self.operation_log_text).monospace().size(12.0));
                    });
            });
        if refresh {
            self.refresh_operation_log();
        }
        self.show_operation_log = open;
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_jobs();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| self.render_top_bar(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(self.theme.spacing_md);
            egui::ScrollArea::vertical().show(ui, |ui| self.view_jetton(ui));
        });

        self.render_toasts(ctx);
        if self.show_notifications_popup {
            self.render_notification_history(ctx);
        }
        if self.show_operation_log {
            self.render_operation_log(ctx);
        }

        // Keep polling the worker and expiring toasts without user input
        if self.burn.is_loading() || self.notifications.has_active() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

pub fn launch(mut config: Config) -> Result<()> {
    let user_settings = UserSettings::load();
    config.network = user_settings.effective_network(config.network);
    tracing::info!(
        "Starting on {} with dry-run jetton {}",
        config.network_label(),
        config.dry_run.symbol
    );

    let services = Services::dry_run(DryRunWallet::from_config(&config));

    let app_creator = move |cc: &eframe::CreationContext<'_>| {
        Box::new(GuiApp::new(config.clone(), user_settings.clone(), services.clone(), &cc.egui_ctx))
            as Box<dyn App>
    };

    let viewport = egui::ViewportBuilder::default().with_inner_size([760.0, 520.0]);
    let native_options = NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native("Jetton Burner", native_options, Box::new(app_creator))
        .map_err(|e| anyhow!("Failed to start GUI: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::Severity;
    use ethers::types::U256;
    use std::time::Instant;

    fn app(latency_ms: u64) -> GuiApp {
        let mut config = Config::default();
        config.dry_run.latency = Duration::from_millis(latency_ms);
        let services = Services::dry_run(DryRunWallet::from_config(&config));
        let ctx = egui::Context::default();
        let mut app = GuiApp::new(config, UserSettings::default(), services, &ctx);
        app.record_operations = false;
        app
    }

    fn loaded(app: &GuiApp) -> LoadedJetton {
        app.services.store.snapshot().view().loaded().cloned().unwrap()
    }

    fn wait_for_job(app: &mut GuiApp) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while app.burn_job.is_some() {
            app.poll_jobs();
            assert!(Instant::now() < deadline, "burn job did not finish");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_start_burn_runs_on_worker_and_refreshes_store() {
        let mut app = app(20);
        let jetton = loaded(&app);
        app.burn.open_dialog();
        app.burn.set_amount("250");

        app.start_burn(&jetton);
        assert!(app.burn.is_loading());
        assert!(app.burn_job.is_some());

        wait_for_job(&mut app);

        assert!(!app.burn.is_loading());
        assert!(!app.burn.is_dialog_open());
        let entry = app.notifications.entries().last().unwrap();
        assert_eq!(entry.severity, Severity::Success);
        assert_eq!(entry.message, "Successfully burned 250 DEMO");
        assert_eq!(loaded(&app).balance, U256::from(750_000_000_000u64));
    }

    #[test]
    fn test_rejected_amount_spawns_nothing() {
        let mut app = app(0);
        let jetton = loaded(&app);
        app.burn.set_amount("1000.5");

        app.start_burn(&jetton);

        assert!(app.burn_job.is_none());
        let entry = app.notifications.entries().last().unwrap();
        assert_eq!(entry.severity, Severity::Warning);
        assert_eq!(entry.message, "Maximum amount to burn is 1,000");
    }

    #[test]
    fn test_failed_burn_keeps_dialog_open() {
        let mut app = app(0);
        let jetton = loaded(&app);
        app.services.dry_run.as_ref().unwrap().fail_next_burn("Not enough TON to pay fees");
        app.burn.open_dialog();
        app.burn.set_amount("1");

        app.start_burn(&jetton);
        wait_for_job(&mut app);

        assert!(app.burn.is_dialog_open());
        let entry = app.notifications.entries().last().unwrap();
        assert_eq!(entry.severity, Severity::Error);
        assert_eq!(loaded(&app).balance, jetton.balance);
    }

    #[test]
    fn test_aborted_burn_is_silent() {
        let mut app = app(0);
        let jetton = loaded(&app);
        app.services.dry_run.as_ref().unwrap().abort_next_burn();
        app.burn.set_amount("1");

        app.start_burn(&jetton);
        wait_for_job(&mut app);

        assert!(!app.burn.is_loading());
        assert!(app.notifications.is_empty());
    }
}

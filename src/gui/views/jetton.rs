//! Jetton panel: what the connected wallet holds, plus the burn action.

use eframe::egui::{self, RichText};

use crate::address::TonAddress;
use crate::jetton_store::JettonView;
use crate::utils::format_display_amount;

use super::super::app::GuiApp;
use super::burn::view_burn_action;

impl GuiApp {
    pub(crate) fn view_jetton(&mut self, ui: &mut egui::Ui) {
        ui.label(RichText::new("[$] JETTON").size(16.0).strong().color(self.theme.primary));
        ui.add_space(self.theme.spacing_sm);

        let snapshot = self.services.store.snapshot();
        let jetton = match snapshot.view() {
            JettonView::Visible(jetton) => jetton,
            JettonView::Hidden => {
                ui.label(
                    RichText::new("No jetton balance for this wallet yet.")
                        .color(self.theme.text_secondary),
                );
                if ui.add(self.theme.button_small("Refresh")).clicked() {
                    self.services.store.refresh();
                }
                return;
            }
        };

        let owner = self.services.wallet.connection().wallet;
        let mut explore: Option<TonAddress> = None;

        self.theme.frame_panel().show(ui, |ui| {
            egui::Grid::new("jetton_grid")
                .num_columns(3)
                .spacing([self.theme.spacing_md, self.theme.spacing_sm])
                .show(ui, |ui| {
                    ui.label(RichText::new("Symbol").color(self.theme.text_secondary));
                    ui.label(RichText::new(&jetton.symbol).strong());
                    ui.end_row();

                    ui.label(RichText::new("Balance").color(self.theme.text_secondary));
                    ui.label(RichText::new(jetton.display_balance()).strong().size(16.0));
                    ui.end_row();

                    let rows = [
                        ("Owner", Some(owner)),
                        ("Jetton master", jetton.jetton_master),
                        ("Jetton wallet", jetton.jetton_address),
                    ];
                    for (label, address) in rows {
                        ui.label(RichText::new(label).color(self.theme.text_secondary));
                        match address {
                            Some(address) => {
                                ui.label(RichText::new(address.short()).monospace())
                                    .on_hover_text(address.to_string());
                                if ui.add(self.theme.button_small("Explorer")).clicked() {
                                    explore = Some(address);
                                }
                            }
                            None => {
                                ui.label(
                                    RichText::new("loading...").color(self.theme.text_secondary),
                                );
                            }
                        }
                        ui.end_row();
                    }
                });
        });

        if let Some(address) = explore {
            self.open_explorer(&address);
        }

        ui.add_space(self.theme.spacing_md);
        ui.horizontal(|ui| {
            view_burn_action(self, ui, &jetton);
            ui.add_space(self.theme.spacing_sm);
            if ui
                .add_enabled(!self.burn.is_loading(), self.theme.button_small("Refresh"))
                .clicked()
            {
                self.services.store.refresh();
            }
        });

        if let Some(dry_run) = self.services.dry_run.clone() {
            let unpublished = format_display_amount(dry_run.onchain_balance(), jetton.decimals);
            ui.add_space(self.theme.spacing_lg);
            egui::CollapsingHeader::new("Dry run").show(ui, |ui| {
                ui.label(
                    RichText::new(format!(
                        "Unpublished balance: {} {}",
                        unpublished, jetton.symbol
                    ))
                    .color(self.theme.text_secondary),
                );
                ui.label(
                    RichText::new(format!("Burn messages sent: {}", dry_run.burns().len()))
                        .color(self.theme.text_secondary),
                );
                ui.horizontal(|ui| {
                    if ui.add(self.theme.button_small("Fail next burn")).clicked() {
                        dry_run.fail_next_burn("Transaction was not confirmed by the wallet");
                    }
                    if ui.add(self.theme.button_small("Abort next burn")).clicked() {
                        dry_run.abort_next_burn();
                    }
                });
            });
        }
    }
}

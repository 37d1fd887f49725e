//! Burn action widget
//!
//! Trigger button, the modal burn dialog and the loading overlay shown in
//! its place while the burn is in flight.

use eframe::egui::{self, RichText};

use crate::jetton_store::LoadedJetton;
use crate::utils;

use super::super::app::GuiApp;

/// Renders the burn trigger inline and the dialog/overlay on top of the app.
pub fn view_burn_action(app: &mut GuiApp, ui: &mut egui::Ui, jetton: &LoadedJetton) {
    let theme = app.theme;

    let trigger = theme.button_transparent(&format!("Burn {}", jetton.symbol));
    if ui.add_enabled(!app.burn.is_loading(), trigger).clicked()
    {
        app.burn.open_dialog();
    }

    if app.burn.is_loading() {
        render_loading_overlay(app, ui.ctx());
        return;
    }
    if !app.burn.is_dialog_visible() {
        return;
    }

    let mut open = true;
    let mut submit = false;
    egui::Window::new(format!("Burn {}", jetton.symbol))
        .id(egui::Id::new("burn_dialog"))
        .open(&mut open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ui.ctx(), |ui| {
            ui.label(
                RichText::new(format!("Available: {} {}", jetton.display_balance(), jetton.symbol))
                    .color(theme.text_secondary),
            );
            ui.add_space(theme.spacing_sm);

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(app.burn.amount_input_mut())
                        .hint_text("0")
                        .desired_width(200.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submit = true;
                }
                if ui.add(theme.button_small("Max")).clicked() {
                    app.burn
                        .set_amount(utils::format_units_trimmed(jetton.balance, jetton.decimals));
                }
            });
            ui.label(RichText::new(&jetton.symbol).size(11.0).color(theme.text_secondary));

            ui.add_space(theme.spacing_md);
            if ui.add(theme.button_primary("Submit")).clicked() {
                submit = true;
            }
        });

    if submit {
        app.start_burn(jetton);
    } else if !open {
        app.burn.close_dialog();
    }
}

fn render_loading_overlay(app: &GuiApp, ctx: &egui::Context) {
    let theme = app.theme;
    egui::Area::new(egui::Id::new("burn_loading"))
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            theme.frame_panel().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.add(egui::Spinner::new().size(18.0).color(theme.accent));
                    ui.label(RichText::new("Burning...").strong().color(theme.text_primary));
                });
            });
        });
}

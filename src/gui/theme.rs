//! Theme and styling for the GUI
//!
//! Provides the AppTheme struct with colors, spacing, and styled widget factories.

use eframe::egui;

use crate::notification::Severity;

#[derive(Clone, Copy)]
pub struct AppTheme {
    // Base colors
    pub background: egui::Color32,
    pub surface: egui::Color32,
    pub surface_hover: egui::Color32,
    pub surface_active: egui::Color32,
    pub panel_fill: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,

    // Semantic colors
    pub primary: egui::Color32,
    pub secondary: egui::Color32,
    pub success: egui::Color32,
    pub warning: egui::Color32,
    pub error: egui::Color32,
    pub accent: egui::Color32,

    // Spacing
    pub spacing_xs: f32,
    pub spacing_sm: f32,
    pub spacing_md: f32,
    pub spacing_lg: f32,

    pub button_medium: egui::Vec2,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self {
            // Night blue background with TON blue accents
            background: egui::Color32::from_rgb(16, 20, 28),
            surface: egui::Color32::from_rgb(24, 30, 42),
            surface_hover: egui::Color32::from_rgb(32, 40, 56),
            surface_active: egui::Color32::from_rgb(40, 50, 70),
            panel_fill: egui::Color32::from_rgb(20, 25, 35),
            text_primary: egui::Color32::from_rgb(230, 236, 245),
            text_secondary: egui::Color32::from_rgb(140, 150, 170),

            primary: egui::Color32::from_rgb(0, 152, 234), // #0098ea
            secondary: egui::Color32::from_rgb(70, 80, 100),
            success: egui::Color32::from_rgb(57, 204, 131),
            warning: egui::Color32::from_rgb(255, 176, 32),
            error: egui::Color32::from_rgb(255, 90, 90),
            accent: egui::Color32::from_rgb(255, 120, 60), // burn orange

            spacing_xs: 4.0,
            spacing_sm: 8.0,
            spacing_md: 16.0,
            spacing_lg: 24.0,

            button_medium: egui::vec2(120.0, 32.0),
        }
    }
}

impl AppTheme {
    pub fn button_primary(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary).strong())
            .fill(self.primary)
            .min_size(self.button_medium)
    }

    /// Outlined button, used for the burn trigger
    pub fn button_transparent(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.accent).strong())
            .fill(egui::Color32::TRANSPARENT)
            .stroke(egui::Stroke::new(1.5, self.accent))
            .min_size(self.button_medium)
    }

    pub fn button_small(&self, text: &str) -> egui::Button<'_> {
        egui::Button::new(egui::RichText::new(text).color(self.text_primary))
            .fill(self.secondary)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }

    pub fn frame_panel(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.panel_fill)
            .rounding(8.0)
            .inner_margin(self.spacing_md)
            .stroke(egui::Stroke::new(1.0, self.surface_active))
    }

    pub fn severity_color(&self, severity: Severity) -> egui::Color32 {
        match severity {
            Severity::Success => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }

    /// Frame for a toast, bordered in the severity color
    pub fn frame_toast(&self, severity: Severity) -> egui::Frame {
        egui::Frame::none()
            .fill(self.surface)
            .rounding(6.0)
            .inner_margin(egui::Margin::symmetric(self.spacing_md, self.spacing_sm))
            .stroke(egui::Stroke::new(2.0, self.severity_color(severity)))
    }
}

/// Configure the egui context style with the given theme
pub fn configure_style(ctx: &egui::Context, theme: &AppTheme) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = theme.background;
    visuals.panel_fill = theme.panel_fill;
    visuals.override_text_color = Some(theme.text_primary);

    visuals.widgets.noninteractive.bg_fill = theme.surface;
    visuals.widgets.inactive.bg_fill = theme.surface;
    visuals.widgets.hovered.bg_fill = theme.surface_hover;
    visuals.widgets.active.bg_fill = theme.surface_active;
    visuals.widgets.open.bg_fill = theme.surface_active;

    // Keep the amount field visible against the dark window
    visuals.widgets.inactive.bg_stroke = egui::Stroke::new(1.0, theme.secondary);
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, theme.primary);
    visuals.widgets.active.bg_stroke = egui::Stroke::new(2.0, theme.primary);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(20.0, egui::FontFamily::Proportional),
    );
    style.text_styles.insert(
        egui::TextStyle::Body,
        egui::FontId::new(14.0, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}

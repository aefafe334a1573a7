//! UI helper components

use eframe::egui;

/// Solana brand purple, used for headings and primary actions.
const ACCENT: egui::Color32 = egui::Color32::from_rgb(153, 69, 255);

/// Block explorer URL for an address. Non-mainnet clusters are passed
/// through as the explorer's `cluster` query parameter.
pub fn get_explorer_address_url(cluster: &str, address: &str) -> String {
    let base = format!("https://explorer.solana.com/address/{}", address);
    match cluster {
        "mainnet-beta" | "" => base,
        other => format!("{}?cluster={}", base, other),
    }
}

/// Open URL in the default browser
pub fn open_url_new_tab(url: &str) {
    let _ = open::that(url);
}

/// Copy to clipboard
pub fn copy_to_clipboard(text: &str) {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.set_text(text);
    }
}

/// Styled heading with accent color
pub fn styled_heading(ui: &mut egui::Ui, text: &str) {
    ui.heading(egui::RichText::new(text).color(ACCENT));
}

/// Section header with separator
pub fn section_header(ui: &mut egui::Ui, text: &str) {
    ui.add_space(10.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(text).strong().size(14.0));
    });
    ui.separator();
}

/// Loading spinner
pub fn loading_spinner(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label("Loading...");
    });
}

/// Error message display
pub fn error_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("❌").size(16.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 80, 80)));
    });
}

/// Warning message display
pub fn warning_message(ui: &mut egui::Ui, message: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("⚠️").size(14.0));
        ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(220, 180, 50)));
    });
}

/// Display a monospace value with a copy button
pub fn copyable_value(ui: &mut egui::Ui, value: &str) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(value).monospace());
        if ui
            .small_button("📋")
            .on_hover_text("Copy to clipboard")
            .clicked()
        {
            copy_to_clipboard(value);
        }
    });
}

/// Create a styled text edit for message input
pub fn message_input(ui: &mut egui::Ui, value: &mut String) -> egui::Response {
    ui.add(
        egui::TextEdit::singleline(value)
            .hint_text("Enter message to sign")
            .desired_width(400.0),
    )
}

// =============================================================================
// STYLED BUTTONS
// =============================================================================

/// Primary action button - accent colored, prominent
pub fn primary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(ACCENT);
    ui.add(btn)
}

/// Primary button with enabled state
pub fn primary_button_enabled(ui: &mut egui::Ui, text: &str, enabled: bool) -> egui::Response {
    let btn = egui::Button::new(egui::RichText::new(text).size(14.0).color(egui::Color32::WHITE))
        .min_size(egui::vec2(130.0, 34.0))
        .fill(ACCENT);
    ui.add_enabled(enabled, btn)
}

/// Secondary action button - subdued
pub fn secondary_button(ui: &mut egui::Ui, text: &str) -> egui::Response {
    let btn =
        egui::Button::new(egui::RichText::new(text).size(14.0)).min_size(egui::vec2(90.0, 34.0));
    ui.add(btn)
}

/// Render content in a subtle card/frame
pub fn card(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, add_contents);
}

use eframe::egui::{RichText, Ui};

use crate::ui::config::UI_CONFIG;

/// Dashboard text styles, called directly on `egui::Ui`.
pub trait UiStyleExt {
    /// Small gray note, e.g. an indicator's chart multiplier or an error detail.
    fn note(&mut self, text: impl Into<String>);

    /// `Label: value` item of the status bar.
    fn status_item(&mut self, label: &str, value: &str);

    fn section_subheader(&mut self, text: impl Into<String>);

    fn error_text(&mut self, text: impl Into<String>);

    /// Worker progress message shown next to the spinner.
    fn busy_note(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn note(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn status_item(&mut self, label: &str, value: &str) {
        self.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            ui.note(label);
            ui.label(RichText::new(value).small().color(UI_CONFIG.colors.status_value));
        });
    }

    fn section_subheader(&mut self, text: impl Into<String>) {
        self.label(
            RichText::new(text)
                .strong()
                .size(17.0)
                .color(UI_CONFIG.colors.heading),
        );
    }

    fn error_text(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.error));
    }

    fn busy_note(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.busy));
    }
}

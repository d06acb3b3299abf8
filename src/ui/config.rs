use eframe::egui::Color32;

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub error: Color32,
    pub status_value: Color32,
    pub busy: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub side_panel_min_width: f32,
    /// Height of the raw data table before it scrolls
    pub table_max_height: f32,
    /// Decimals shown for indicator values in the table
    pub table_decimals: usize,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::GRAY,
        heading: Color32::from_rgb(235, 235, 235),
        subsection_heading: Color32::ORANGE,
        central_panel: Color32::from_rgb(27, 27, 30),
        side_panel: Color32::from_rgb(20, 20, 22),
        error: Color32::from_rgb(255, 100, 100),
        status_value: Color32::from_rgb(170, 200, 255),
        busy: Color32::from_rgb(255, 215, 0),
    },
    side_panel_min_width: 220.0,
    table_max_height: 320.0,
    table_decimals: 2,
};

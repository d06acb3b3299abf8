//! Plot visualization configuration

use eframe::egui::Color32;

pub struct PlotConfig {
    /// Gradient the indicator line colors are sampled from (one stop per indicator)
    pub indicator_gradient_colors: &'static [&'static str],
    /// Observed minimum wage in the forecast chart
    pub history_color: Color32,
    /// Model point predictions in the forecast chart
    pub prediction_color: Color32,
    /// Fill of the uncertainty band (drawn with low alpha)
    pub interval_color: Color32,
    /// Vertical marker at the last observed date
    pub forecast_start_color: Color32,
    pub line_width: f32,
    pub prediction_line_width: f32,
    /// Opacity of the uncertainty band (0.0 = invisible, 1.0 = fully opaque)
    pub interval_fill_opacity_pct: f32,
    /// Plot height as a fraction of the available central panel height
    pub plot_height_fraction: f32,
    pub min_plot_height: f32,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    indicator_gradient_colors: &[
        "#1f77b4", // Blue
        "#ff7f0e", // Orange
        "#2ca02c", // Green
    ],
    history_color: Color32::from_rgb(31, 119, 180), // Blue
    prediction_color: Color32::from_rgb(255, 165, 0), // Orange
    interval_color: Color32::from_rgb(255, 200, 120),
    forecast_start_color: Color32::from_gray(140),
    line_width: 2.0,
    prediction_line_width: 2.0,
    interval_fill_opacity_pct: 0.25,
    plot_height_fraction: 0.42,
    min_plot_height: 260.0,
};

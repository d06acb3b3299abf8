use colorgrad::Gradient;
use strum::IntoEnumIterator;

use eframe::egui::{self, Color32, RichText};
use egui_plot::{AxisHints, Plot, PlotPoint};

use crate::config::plot::PLOT_CONFIG;
use crate::domain::{Indicator, IndicatorSelection};
use crate::models::{ForecastInput, ForecastOutput, IndicatorTable};
use crate::ui::app::ForecastVisibility;
use crate::ui::ui_text::UI_TEXT;
use crate::ui::utils::{format_brl, format_decimal_br};
use crate::utils::time_utils::{date_to_plot_x, format_date, format_month, plot_x_to_date};

use crate::ui::plot_layers::{
    ChartSeries, ForecastContext, ForecastStartLayer, HistoricalContext, HistoryLayer,
    IndicatorLinesLayer, IntervalLayer, PlotLayer, PredictionLayer,
};

/// Chart series for the selected indicators, in selection order.
///
/// Values are `raw × multiplier`; missing observations stay `NaN`.
pub fn historical_series(
    table: &IndicatorTable,
    selection: &IndicatorSelection,
    palette: &[Color32],
) -> Vec<ChartSeries> {
    selection
        .iter()
        .map(|indicator| ChartSeries {
            label: indicator.legend_label(),
            color: palette
                .get(indicator.display_index())
                .copied()
                .unwrap_or(PLOT_CONFIG.history_color),
            points: table.scaled_series(indicator),
        })
        .collect()
}

/// One color per indicator, sampled evenly from the configured gradient.
pub fn indicator_palette() -> Vec<Color32> {
    let count = Indicator::iter().count();
    let grad = match colorgrad::GradientBuilder::new()
        .html_colors(PLOT_CONFIG.indicator_gradient_colors)
        .build::<colorgrad::LinearGradient>()
    {
        Ok(grad) => grad,
        Err(e) => {
            log::warn!("Invalid indicator gradient, using a single color: {}", e);
            return vec![PLOT_CONFIG.history_color; count];
        }
    };

    (0..count)
        .map(|i| {
            let t = if count > 1 {
                i as f32 / (count - 1) as f32
            } else {
                0.0
            };
            to_egui_color(grad.at(t))
        })
        .collect()
}

pub struct PlotView {
    palette: Vec<Color32>,
}

impl Default for PlotView {
    fn default() -> Self {
        Self::new()
    }
}

impl PlotView {
    pub fn new() -> Self {
        Self {
            palette: indicator_palette(),
        }
    }

    pub fn show_historical_chart(
        &self,
        ui: &mut egui::Ui,
        table: &IndicatorTable,
        selection: &IndicatorSelection,
    ) {
        let series = historical_series(table, selection, &self.palette);

        let legend: Vec<(String, Color32)> =
            series.iter().map(|s| (s.label.clone(), s.color)).collect();
        render_legend_row(ui, &legend);
        if series.is_empty() {
            ui.label(
                RichText::new(UI_TEXT.empty_selection_hint)
                    .small()
                    .color(Color32::GRAY),
            );
        }

        Plot::new("historical_chart")
            .height(plot_height(ui))
            .custom_x_axes(vec![date_x_axis(UI_TEXT.history_x_axis)])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.history_y_axis)
                    .formatter(|grid_mark, _range| format_decimal_br(grid_mark.value, 0)),
            ])
            .label_formatter(|name, value| hover_label(name, value, |v| format_decimal_br(v, 2)))
            .show(ui, |plot_ui| {
                let ctx = HistoricalContext { series: &series };
                IndicatorLinesLayer.render(plot_ui, &ctx);
            });
    }

    pub fn show_forecast_chart(
        &self,
        ui: &mut egui::Ui,
        input: &ForecastInput,
        forecast: &ForecastOutput,
        visibility: &ForecastVisibility,
    ) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(UI_TEXT.forecast_title).strong());
        });

        let mut legend = vec![
            (UI_TEXT.series_history.to_string(), PLOT_CONFIG.history_color),
            (UI_TEXT.series_prediction.to_string(), PLOT_CONFIG.prediction_color),
        ];
        if visibility.interval {
            legend.push((UI_TEXT.series_interval.to_string(), PLOT_CONFIG.interval_color));
        }
        render_legend_row(ui, &legend);

        let history = input.plot_points();
        let last_observed_x = forecast.last_observed_date().map(date_to_plot_x);

        Plot::new("forecast_chart")
            .height(plot_height(ui))
            .custom_x_axes(vec![date_x_axis(UI_TEXT.forecast_x_axis)])
            .custom_y_axes(vec![
                AxisHints::new_y()
                    .label(UI_TEXT.forecast_y_axis)
                    .formatter(|grid_mark, _range| format_decimal_br(grid_mark.value, 0)),
            ])
            .label_formatter(|name, value| {
                hover_label(name, value, format_brl)
            })
            .show(ui, |plot_ui| {
                let ctx = ForecastContext {
                    history: &history,
                    forecast,
                    last_observed_x,
                    visibility,
                };

                // Back to front
                let layers: Vec<Box<dyn PlotLayer<ForecastContext<'_>>>> = vec![
                    Box::new(IntervalLayer),
                    Box::new(ForecastStartLayer),
                    Box::new(PredictionLayer),
                    Box::new(HistoryLayer),
                ];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            });
    }
}

/// Horizontal legend drawn above the plot area.
fn render_legend_row(ui: &mut egui::Ui, entries: &[(String, Color32)]) {
    ui.horizontal_wrapped(|ui| {
        for (label, color) in entries {
            ui.label(RichText::new("━━").strong().color(*color));
            ui.label(label);
            ui.add_space(12.0);
        }
    });
}

fn plot_height(ui: &egui::Ui) -> f32 {
    (ui.ctx().available_rect().height() * PLOT_CONFIG.plot_height_fraction)
        .max(PLOT_CONFIG.min_plot_height)
}

fn hover_label(name: &str, value: &PlotPoint, fmt_value: impl Fn(f64) -> String) -> String {
    let date = plot_x_to_date(value.x)
        .map(format_date)
        .unwrap_or_default();
    if name.is_empty() {
        format!("{}\n{}", date, fmt_value(value.y))
    } else {
        format!("{}\n{}\n{}", name, date, fmt_value(value.y))
    }
}

fn date_x_axis(label: &'static str) -> AxisHints<'static> {
    AxisHints::new_x()
        .label(label)
        .formatter(|grid_mark, _range| {
            plot_x_to_date(grid_mark.value)
                .map(format_month)
                .unwrap_or_default()
        })
}

fn to_egui_color(colorgrad_color: colorgrad::Color) -> Color32 {
    let rgba8 = colorgrad_color.to_rgba8();
    Color32::from_rgba_unmultiplied(rgba8[0], rgba8[1], rgba8[2], 255)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IndicatorRow;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn table() -> IndicatorTable {
        IndicatorTable::new(vec![
            IndicatorRow::new(ymd(2024, 1, 1), 1412.0, 0.42, 48.1),
            IndicatorRow::new(ymd(2024, 2, 1), 1412.0, f64::NAN, 48.3),
        ])
    }

    #[test]
    fn no_selection_gives_no_series() {
        let series = historical_series(&table(), &IndicatorSelection::empty(), &indicator_palette());
        assert!(series.is_empty());
    }

    #[test]
    fn full_selection_gives_three_labeled_series() {
        let series = historical_series(&table(), &IndicatorSelection::all(), &indicator_palette());
        let labels: Vec<&str> = series.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Salario_Minimo (x1)", "IPCA (x100)", "Endividamento (x10)"]
        );
    }

    #[test]
    fn plotted_values_are_raw_times_multiplier() {
        let selection: IndicatorSelection =
            [Indicator::HouseholdDebt, Indicator::Inflation].into_iter().collect();
        let series = historical_series(&table(), &selection, &indicator_palette());

        assert_eq!(series[0].label, "Endividamento (x10)");
        assert_eq!(series[0].points[0][1], 48.1 * 10.0);
        assert_eq!(series[1].points[0][1], 0.42 * 100.0);
        assert!(series[1].points[1][1].is_nan());
        assert_eq!(series[0].points[1][0], date_to_plot_x(ymd(2024, 2, 1)));
    }

    #[test]
    fn palette_has_one_distinct_color_per_indicator() {
        let palette = indicator_palette();
        assert_eq!(palette.len(), 3);
        assert_ne!(palette[0], palette[1]);
        assert_ne!(palette[1], palette[2]);
    }

    #[test]
    fn series_keep_their_indicator_color_regardless_of_order() {
        let palette = indicator_palette();
        let selection: IndicatorSelection = [Indicator::HouseholdDebt].into_iter().collect();
        let series = historical_series(&table(), &selection, &palette);
        assert_eq!(series[0].color, palette[2]);
    }
}

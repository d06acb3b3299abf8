use eframe::egui::{Color32, Stroke};
use egui_plot::{Line, LineStyle, PlotPoints, PlotUi, Polygon, VLine};

use crate::config::plot::PLOT_CONFIG;
use crate::models::ForecastOutput;
use crate::ui::app::ForecastVisibility;
use crate::ui::ui_text::UI_TEXT;

/// One named, colored line of a chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

/// Context for the historical indicators chart.
pub struct HistoricalContext<'a> {
    pub series: &'a [ChartSeries],
}

/// Context for the minimum-wage forecast chart.
pub struct ForecastContext<'a> {
    /// Observed `(x, y)` points; `NaN` values break the line
    pub history: &'a [[f64; 2]],
    pub forecast: &'a ForecastOutput,
    pub last_observed_x: Option<f64>,
    pub visibility: &'a ForecastVisibility,
}

impl ForecastContext<'_> {
    /// Where the dashed forecast-start marker goes, if it is shown at all.
    pub fn forecast_start_x(&self) -> Option<f64> {
        self.last_observed_x
            .filter(|_| self.visibility.forecast_start)
    }
}

/// A standardized layer in the plot stack.
pub trait PlotLayer<C> {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &C);
}

/// Split a series into runs of finite points so gaps are not drawn.
pub fn finite_segments(points: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
    let mut segments = Vec::new();
    let mut current = Vec::new();
    for point in points {
        if point[0].is_finite() && point[1].is_finite() {
            current.push(*point);
        } else if !current.is_empty() {
            segments.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}

fn draw_segmented_line(plot_ui: &mut PlotUi, label: &str, points: &[[f64; 2]], color: Color32, width: f32) {
    for segment in finite_segments(points) {
        plot_ui.line(
            Line::new(label, PlotPoints::new(segment))
                .color(color)
                .width(width),
        );
    }
}

// ============================================================================
// HISTORICAL CHART
// ============================================================================
pub struct IndicatorLinesLayer;

impl PlotLayer<HistoricalContext<'_>> for IndicatorLinesLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &HistoricalContext<'_>) {
        for series in ctx.series {
            draw_segmented_line(
                plot_ui,
                &series.label,
                &series.points,
                series.color,
                PLOT_CONFIG.line_width,
            );
        }
    }
}

// ============================================================================
// FORECAST CHART (back to front)
// ============================================================================
pub struct IntervalLayer;

impl PlotLayer<ForecastContext<'_>> for IntervalLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &ForecastContext<'_>) {
        if !ctx.visibility.interval {
            return;
        }
        let fill = PLOT_CONFIG
            .interval_color
            .linear_multiply(PLOT_CONFIG.interval_fill_opacity_pct);

        // One convex quad per step; egui only fills convex polygons reliably
        for band in ctx.forecast.interval_bands() {
            plot_ui.polygon(
                Polygon::new(UI_TEXT.series_interval, PlotPoints::new(band.to_vec()))
                    .fill_color(fill)
                    .stroke(Stroke::NONE),
            );
        }
    }
}

pub struct PredictionLayer;

impl PlotLayer<ForecastContext<'_>> for PredictionLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &ForecastContext<'_>) {
        draw_segmented_line(
            plot_ui,
            UI_TEXT.series_prediction,
            &ctx.forecast.yhat_points(),
            PLOT_CONFIG.prediction_color,
            PLOT_CONFIG.prediction_line_width,
        );
    }
}

pub struct HistoryLayer;

impl PlotLayer<ForecastContext<'_>> for HistoryLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &ForecastContext<'_>) {
        draw_segmented_line(
            plot_ui,
            UI_TEXT.series_history,
            ctx.history,
            PLOT_CONFIG.history_color,
            PLOT_CONFIG.line_width,
        );
    }
}

pub struct ForecastStartLayer;

impl PlotLayer<ForecastContext<'_>> for ForecastStartLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &ForecastContext<'_>) {
        if let Some(x) = ctx.forecast_start_x() {
            plot_ui.vline(
                VLine::new(UI_TEXT.series_forecast_start, x)
                    .color(PLOT_CONFIG.forecast_start_color)
                    .width(1.0)
                    .style(LineStyle::dashed_loose()),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_break_at_missing_values() {
        let points = [
            [0.0, 1.0],
            [1.0, 2.0],
            [2.0, f64::NAN],
            [3.0, 4.0],
            [4.0, f64::NAN],
            [5.0, f64::NAN],
        ];
        let segments = finite_segments(&points);
        assert_eq!(segments, vec![vec![[0.0, 1.0], [1.0, 2.0]], vec![[3.0, 4.0]]]);
    }

    #[test]
    fn forecast_start_marker_follows_visibility() {
        let forecast = ForecastOutput::default();
        let mut visibility = ForecastVisibility::default();
        let shown = ForecastContext {
            history: &[],
            forecast: &forecast,
            last_observed_x: Some(20_058.0),
            visibility: &visibility,
        };
        assert_eq!(shown.forecast_start_x(), Some(20_058.0));

        visibility.forecast_start = false;
        let hidden = ForecastContext {
            history: &[],
            forecast: &forecast,
            last_observed_x: Some(20_058.0),
            visibility: &visibility,
        };
        assert_eq!(hidden.forecast_start_x(), None);
    }

    #[test]
    fn all_missing_gives_no_segments() {
        assert!(finite_segments(&[[0.0, f64::NAN]]).is_empty());
        assert!(finite_segments(&[]).is_empty());
    }
}

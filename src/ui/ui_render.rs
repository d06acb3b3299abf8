use eframe::egui::{
    CentralPanel, CollapsingHeader, Context, Frame, Grid, Margin, RichText, ScrollArea,
    SidePanel, TopBottomPanel, Ui,
};
use strum::IntoEnumIterator;

use crate::domain::Indicator;
use crate::engine::DashboardSnapshot;
use crate::models::IndicatorTable;
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{ForecastViewPanel, IndicatorSelectorPanel, Panel};
use crate::ui::utils::{format_decimal_br, spaced_separator};
use crate::utils::time_utils::{format_date, months_between};

use super::app::IndicatorDashboardApp;

impl IndicatorDashboardApp {
    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("left_panel")
            .min_width(UI_CONFIG.side_panel_min_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let busy = self.engine.is_busy();
                let selector_events =
                    IndicatorSelectorPanel::new(&self.selection, busy).render(ui);

                let view_events = ForecastViewPanel::new(self.forecast_visibility).render(ui);
                if let Some(visibility) = view_events.into_iter().last() {
                    self.forecast_visibility = visibility;
                }

                self.handle_selector_events(selector_events);
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(12));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("page")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        render_header(ui);

                        // A failed reload replaces the body; the side panel stays usable
                        if let Some(error) = self.engine.last_error() {
                            render_load_error(ui, &error.to_string());
                        } else if let Some(snapshot) = self.engine.snapshot().cloned() {
                            self.render_body(ui, &snapshot);
                        } else {
                            ui.vertical_centered(|ui| {
                                ui.add_space(40.0);
                                ui.spinner();
                                ui.add_space(12.0);
                                ui.heading(UI_TEXT.loading);
                            });
                        }
                    });
            });
    }

    fn render_body(&self, ui: &mut Ui, snapshot: &DashboardSnapshot) {
        // 1. Historical chart
        ui.section_subheader(UI_TEXT.history_subheader);
        ui.add_space(4.0);
        self.plot_view
            .show_historical_chart(ui, &snapshot.table, &self.selection);

        spaced_separator(ui);

        // 2. Forecast (failure stays local to this section)
        ui.section_subheader(UI_TEXT.forecast_subheader);
        ui.add_space(4.0);
        match &snapshot.forecast {
            Ok(forecast) => self.plot_view.show_forecast_chart(
                ui,
                &snapshot.forecast_input,
                forecast,
                &self.forecast_visibility,
            ),
            Err(error) => {
                ui.group(|ui| {
                    ui.error_text(UI_TEXT.forecast_error_heading);
                    ui.note(error.to_string());
                });
            }
        }

        spaced_separator(ui);

        // 3. Raw table
        render_raw_table(ui, &snapshot.table);
        ui.add_space(20.0);
    }

    pub(super) fn render_status_panel(&mut self, ctx: &Context) {
        let status_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::symmetric(8, 4));
        TopBottomPanel::bottom("status_panel")
            .frame(status_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let source = self
                        .engine
                        .data_path()
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_else(|| self.engine.data_path().display().to_string());
                    ui.status_item(UI_TEXT.status_file, &source);
                    ui.separator();

                    if let Some(snapshot) = self.engine.snapshot() {
                        ui.status_item(UI_TEXT.status_rows, &snapshot.table.len().to_string());
                        ui.separator();

                        if let Some((first, last)) = snapshot.table.date_range() {
                            ui.status_item(
                                UI_TEXT.status_range,
                                &format!(
                                    "{} → {} ({} meses)",
                                    format_date(first),
                                    format_date(last),
                                    months_between(first, last) + 1
                                ),
                            );
                            ui.separator();
                        }

                        ui.status_item(UI_TEXT.status_last_run, &format!("{:.0?}", snapshot.elapsed));
                    }

                    if let Some(error) = self.engine.last_error() {
                        ui.separator();
                        ui.error_text(error.to_string());
                    }

                    if let Some(msg) = self.engine.get_worker_status_msg() {
                        ui.separator();
                        ui.spinner();
                        ui.busy_note(msg);
                    }
                });
            });
    }
}

fn render_header(ui: &mut Ui) {
    ui.heading(
        RichText::new(UI_TEXT.page_title)
            .size(26.0)
            .strong()
            .color(UI_CONFIG.colors.heading),
    );
    ui.add_space(4.0);
    ui.label(UI_TEXT.page_description);
    spaced_separator(ui);
}

fn render_load_error(ui: &mut Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(UI_TEXT.load_error_heading);
        ui.add_space(10.0);
        ui.error_text(message);
        ui.add_space(20.0);
        ui.label(UI_TEXT.load_error_hint);
    });
}

/// Full table, collapsed by default. Raw values, no multipliers.
fn render_raw_table(ui: &mut Ui, table: &IndicatorTable) {
    CollapsingHeader::new(UI_TEXT.table_expander)
        .default_open(false)
        .show(ui, |ui| {
            ScrollArea::both()
                .id_salt("raw_table")
                .max_height(UI_CONFIG.table_max_height)
                .show(ui, |ui| {
                    Grid::new("raw_table_grid")
                        .striped(true)
                        .num_columns(1 + Indicator::iter().count())
                        .spacing([24.0, 4.0])
                        .show(ui, |ui| {
                            ui.strong(UI_TEXT.table_date_column);
                            for indicator in Indicator::iter() {
                                ui.strong(indicator.column_name());
                            }
                            ui.end_row();

                            for row in table.rows() {
                                ui.monospace(format_date(row.date));
                                for indicator in Indicator::iter() {
                                    ui.monospace(format_decimal_br(
                                        row.value(indicator),
                                        UI_CONFIG.table_decimals,
                                    ));
                                }
                                ui.end_row();
                            }
                        });
                });
        });
}

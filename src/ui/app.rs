use std::time::Duration;

use eframe::egui;
use eframe::Frame;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::IndicatorSelection;
use crate::engine::{DashboardEngine, RunReason};
use crate::ui::ui_panels::{SelectorEvent, apply_selector_event};
use crate::ui::ui_plot_view::PlotView;
use crate::ui::utils::setup_custom_visuals;

/// Forecast chart layers the user can switch off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastVisibility {
    pub interval: bool,
    pub forecast_start: bool,
}

impl Default for ForecastVisibility {
    fn default() -> Self {
        Self {
            interval: true,
            forecast_start: true,
        }
    }
}

pub struct IndicatorDashboardApp {
    pub(super) engine: DashboardEngine,
    pub(super) selection: IndicatorSelection,
    pub(super) forecast_visibility: ForecastVisibility,
    pub(super) plot_view: PlotView,
}

impl IndicatorDashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, engine: DashboardEngine) -> Self {
        setup_custom_visuals(&cc.egui_ctx);
        Self {
            engine,
            selection: IndicatorSelection::default(),
            forecast_visibility: ForecastVisibility::default(),
            plot_view: PlotView::new(),
        }
    }

    /// Every interaction reruns the whole pipeline (reload + refit).
    pub(super) fn handle_selector_events(&mut self, events: Vec<SelectorEvent>) {
        let mut reason = None;
        for event in events {
            if event == SelectorEvent::Reload {
                reason = Some(RunReason::ReloadRequested);
            } else if apply_selector_event(&mut self.selection, event) {
                reason.get_or_insert(RunReason::SelectionChanged);
            }
        }

        if let Some(reason) = reason {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_ui_interactions {
                log::info!(
                    "Rerun requested ({}), selection: {:?}",
                    reason,
                    self.selection.iter().collect::<Vec<_>>()
                );
            }
            self.engine.request_run(reason);
        }
    }
}

impl eframe::App for IndicatorDashboardApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!(
                "Application shutdown complete ({} runs).",
                self.engine.state.runs_completed
            );
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let busy = self.engine.update();

        self.render_side_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        if busy {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }
}

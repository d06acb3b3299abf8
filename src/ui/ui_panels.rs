use eframe::egui::{RichText, Ui};
use strum::IntoEnumIterator;

use crate::domain::{Indicator, IndicatorSelection};
use crate::ui::app::ForecastVisibility;
use crate::ui::config::UI_TEXT;
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{colored_subsection_heading, section_heading, spaced_separator};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
    Toggled(Indicator, bool),
    SelectAll,
    Clear,
    Reload,
}

/// Multi-select over the fixed indicator set, plus the reload shortcut.
pub struct IndicatorSelectorPanel<'a> {
    selection: &'a IndicatorSelection,
    busy: bool,
}

impl<'a> IndicatorSelectorPanel<'a> {
    pub fn new(selection: &'a IndicatorSelection, busy: bool) -> Self {
        Self { selection, busy }
    }

    fn render_checkboxes(&mut self, ui: &mut Ui) -> Vec<SelectorEvent> {
        let mut events = Vec::new();
        ui.label(colored_subsection_heading(UI_TEXT.selector_label));
        ui.add_space(4.0);

        for indicator in Indicator::iter() {
            let mut checked = self.selection.contains(indicator);
            ui.horizontal(|ui| {
                if ui.checkbox(&mut checked, indicator.to_string()).changed() {
                    #[cfg(debug_assertions)]
                    if DEBUG_FLAGS.print_ui_interactions {
                        log::info!("Indicator {} toggled to {}", indicator, checked);
                    }
                    events.push(SelectorEvent::Toggled(indicator, checked));
                }
                ui.note(format!("x{}", indicator.multiplier()));
            });
        }
        events
    }
}

impl<'a> Panel for IndicatorSelectorPanel<'a> {
    type Event = SelectorEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        section_heading(ui, UI_TEXT.sidebar_heading);

        let mut events = self.render_checkboxes(ui);

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.small_button(UI_TEXT.select_all).clicked() {
                events.push(SelectorEvent::SelectAll);
            }
            if ui.small_button(UI_TEXT.clear_selection).clicked() {
                events.push(SelectorEvent::Clear);
            }
        });

        spaced_separator(ui);

        ui.horizontal(|ui| {
            if ui.button(UI_TEXT.reload_button).clicked() {
                events.push(SelectorEvent::Reload);
            }
            if self.busy {
                ui.spinner();
            }
        });
        events
    }
}

/// Display toggles for the forecast chart. Pure view state; never triggers a run.
pub struct ForecastViewPanel {
    visibility: ForecastVisibility,
}

impl ForecastViewPanel {
    pub fn new(visibility: ForecastVisibility) -> Self {
        Self { visibility }
    }
}

impl Panel for ForecastViewPanel {
    type Event = ForecastVisibility;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        spaced_separator(ui);
        let interval = ui.checkbox(
            &mut self.visibility.interval,
            RichText::new(UI_TEXT.show_interval).small(),
        );
        let marker = ui.checkbox(
            &mut self.visibility.forecast_start,
            RichText::new(UI_TEXT.show_forecast_start).small(),
        );
        if interval.changed() || marker.changed() {
            events.push(self.visibility);
        }
        events
    }
}

/// Apply a selector event. Returns `true` if the selection changed.
pub fn apply_selector_event(selection: &mut IndicatorSelection, event: SelectorEvent) -> bool {
    match event {
        SelectorEvent::Toggled(indicator, selected) => selection.set(indicator, selected),
        SelectorEvent::SelectAll => {
            let mut changed = false;
            for indicator in Indicator::iter() {
                changed |= selection.insert(indicator);
            }
            changed
        }
        SelectorEvent::Clear => {
            let changed = !selection.is_empty();
            *selection = IndicatorSelection::empty();
            changed
        }
        SelectorEvent::Reload => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_updates_selection_in_order() {
        let mut selection = IndicatorSelection::empty();
        assert!(apply_selector_event(
            &mut selection,
            SelectorEvent::Toggled(Indicator::Inflation, true)
        ));
        assert!(apply_selector_event(
            &mut selection,
            SelectorEvent::Toggled(Indicator::MinimumWage, true)
        ));
        let order: Vec<Indicator> = selection.iter().collect();
        assert_eq!(order, vec![Indicator::Inflation, Indicator::MinimumWage]);

        assert!(apply_selector_event(
            &mut selection,
            SelectorEvent::Toggled(Indicator::Inflation, false)
        ));
        assert_eq!(selection.len(), 1);
    }

    #[test]
    fn select_all_appends_missing_only() {
        let mut selection: IndicatorSelection = [Indicator::HouseholdDebt].into_iter().collect();
        assert!(apply_selector_event(&mut selection, SelectorEvent::SelectAll));
        assert_eq!(selection.iter().next(), Some(Indicator::HouseholdDebt));
        assert_eq!(selection.len(), 3);
        assert!(!apply_selector_event(&mut selection, SelectorEvent::SelectAll));
    }

    #[test]
    fn clear_and_reload() {
        let mut selection = IndicatorSelection::default();
        assert!(!apply_selector_event(&mut selection, SelectorEvent::Reload));
        assert!(apply_selector_event(&mut selection, SelectorEvent::Clear));
        assert!(selection.is_empty());
        assert!(!apply_selector_event(&mut selection, SelectorEvent::Clear));
    }
}

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::DATA;

/// One of the tracked economic series.
///
/// The `Display`/`FromStr` forms are the spreadsheet column names, which are
/// also what the user sees in the selector and chart legends.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Display, EnumIter, EnumString)]
pub enum Indicator {
    #[strum(serialize = "Salario_Minimo")]
    MinimumWage,
    #[strum(serialize = "IPCA")]
    Inflation,
    #[strum(serialize = "Endividamento")]
    HouseholdDebt,
}

impl Indicator {
    /// Fixed chart-scale factor. Display only: the underlying data is never rescaled.
    pub const fn multiplier(self) -> u32 {
        match self {
            Indicator::MinimumWage => 1,
            Indicator::Inflation => 100,
            Indicator::HouseholdDebt => 10,
        }
    }

    pub fn column_name(self) -> &'static str {
        match self {
            Indicator::MinimumWage => DATA.columns.minimum_wage,
            Indicator::Inflation => DATA.columns.inflation,
            Indicator::HouseholdDebt => DATA.columns.household_debt,
        }
    }

    /// Legend text, e.g. `IPCA (x100)`.
    pub fn legend_label(self) -> String {
        format!("{} (x{})", self, self.multiplier())
    }

    /// Apply the display multiplier to a raw observation.
    pub fn scale(self, raw_value: f64) -> f64 {
        raw_value * f64::from(self.multiplier())
    }

    /// Position in the fixed display order.
    pub fn display_index(self) -> usize {
        Indicator::iter().position(|i| i == self).unwrap_or(0)
    }
}

/// Ordered set of indicators currently plotted.
///
/// Keeps insertion order: an indicator ticked later is drawn (and listed in
/// the legend) after the ones already selected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndicatorSelection {
    selected: Vec<Indicator>,
}

impl Default for IndicatorSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl IndicatorSelection {
    pub fn all() -> Self {
        Self {
            selected: Indicator::iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            selected: Vec::new(),
        }
    }

    pub fn contains(&self, indicator: Indicator) -> bool {
        self.selected.contains(&indicator)
    }

    /// Returns `true` if the selection changed.
    pub fn insert(&mut self, indicator: Indicator) -> bool {
        if self.contains(indicator) {
            return false;
        }
        self.selected.push(indicator);
        true
    }

    /// Returns `true` if the selection changed.
    pub fn remove(&mut self, indicator: Indicator) -> bool {
        let before = self.selected.len();
        self.selected.retain(|&i| i != indicator);
        before != self.selected.len()
    }

    pub fn set(&mut self, indicator: Indicator, selected: bool) -> bool {
        if selected {
            self.insert(indicator)
        } else {
            self.remove(indicator)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Indicator> + '_ {
        self.selected.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

impl FromIterator<Indicator> for IndicatorSelection {
    fn from_iter<T: IntoIterator<Item = Indicator>>(iter: T) -> Self {
        let mut selection = Self::empty();
        for indicator in iter {
            selection.insert(indicator);
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn multipliers_are_fixed() {
        assert_eq!(Indicator::MinimumWage.multiplier(), 1);
        assert_eq!(Indicator::Inflation.multiplier(), 100);
        assert_eq!(Indicator::HouseholdDebt.multiplier(), 10);
    }

    #[test]
    fn names_match_spreadsheet_columns() {
        let names: Vec<String> = Indicator::iter().map(|i| i.to_string()).collect();
        assert_eq!(names, vec!["Salario_Minimo", "IPCA", "Endividamento"]);
        assert_eq!(Indicator::from_str("IPCA").ok(), Some(Indicator::Inflation));
        for indicator in Indicator::iter() {
            assert_eq!(indicator.column_name(), indicator.to_string());
        }
    }

    #[test]
    fn legend_label_includes_multiplier() {
        assert_eq!(Indicator::Inflation.legend_label(), "IPCA (x100)");
        assert_eq!(Indicator::HouseholdDebt.legend_label(), "Endividamento (x10)");
        assert_eq!(Indicator::MinimumWage.legend_label(), "Salario_Minimo (x1)");
    }

    #[test]
    fn scale_is_exact_product() {
        assert_eq!(Indicator::Inflation.scale(0.46), 0.46 * 100.0);
        assert_eq!(Indicator::HouseholdDebt.scale(48.7), 48.7 * 10.0);
        assert_eq!(Indicator::MinimumWage.scale(1412.0), 1412.0);
    }

    #[test]
    fn default_selection_is_all_in_display_order() {
        let selection = IndicatorSelection::default();
        let order: Vec<Indicator> = selection.iter().collect();
        assert_eq!(
            order,
            vec![
                Indicator::MinimumWage,
                Indicator::Inflation,
                Indicator::HouseholdDebt
            ]
        );
    }

    #[test]
    fn selection_keeps_insertion_order() {
        let mut selection = IndicatorSelection::empty();
        assert!(selection.insert(Indicator::HouseholdDebt));
        assert!(selection.insert(Indicator::MinimumWage));
        assert!(!selection.insert(Indicator::HouseholdDebt));
        let order: Vec<Indicator> = selection.iter().collect();
        assert_eq!(order, vec![Indicator::HouseholdDebt, Indicator::MinimumWage]);

        assert!(selection.remove(Indicator::HouseholdDebt));
        assert!(!selection.remove(Indicator::Inflation));
        assert!(selection.set(Indicator::Inflation, true));
        let order: Vec<Indicator> = selection.iter().collect();
        assert_eq!(order, vec![Indicator::MinimumWage, Indicator::Inflation]);
    }
}

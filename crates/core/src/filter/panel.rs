//! Collapsible filter panel above the run list.
//!
//! The panel offers two date styles (a single day built from dropdowns, or
//! a free-text range), a run number range, a type dropdown and the category
//! cascade. `applied_filters` reproduces the summary of active filters the
//! list header shows.

use super::cascade::CategoryCascade;
use super::dates::{date_string, is_valid_date, DateSelect};

// ---------------------------------------------------------------------------
// Panel state
// ---------------------------------------------------------------------------

/// Which of the two date filter styles is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DateMode {
    #[default]
    Day,
    Range,
}

/// State of every control in the filter panel.
#[derive(Debug, Clone, Default)]
pub struct FilterPanel {
    pub date_mode: DateMode,
    pub day: DateSelect,
    pub range_from: String,
    pub range_to: String,
    pub runs_from: String,
    pub runs_to: String,
    pub run_type: String,
    pub cascade: CategoryCascade,
}

impl FilterPanel {
    /// Switch to single-day filtering, discarding any range input.
    pub fn set_day_mode(&mut self) {
        self.date_mode = DateMode::Day;
        self.range_from.clear();
        self.range_to.clear();
    }

    /// Switch to range filtering, resetting the day dropdowns.
    pub fn set_range_mode(&mut self) {
        self.date_mode = DateMode::Range;
        self.day.clear();
    }

    /// Reset every control to its blank state.
    pub fn clear_all(&mut self) {
        self.day.clear();
        self.range_from.clear();
        self.range_to.clear();
        self.runs_from.clear();
        self.runs_to.clear();
        self.run_type.clear();
        self.cascade.clear();
    }

    /// The filters a submitted query actually applies, in display order.
    ///
    /// Blank and `0` placeholder values are skipped, range bounds must be
    /// real calendar dates, and a fully selected day triple collapses into
    /// a single zero-padded `date` entry.
    pub fn applied_filters(&self) -> Vec<(&'static str, String)> {
        let category = self
            .cascade
            .category
            .map(|id| id.to_string())
            .unwrap_or_default();

        let candidates = [
            ("category", category.as_str()),
            ("subcategory", self.cascade.subcategory.selected.as_str()),
            ("subsubcategory", self.cascade.subsubcategory.selected.as_str()),
            ("date_range_0", self.range_from.as_str()),
            ("date_range_1", self.range_to.as_str()),
            ("runs_0", self.runs_from.as_str()),
            ("runs_1", self.runs_to.as_str()),
            ("type", self.run_type.as_str()),
        ];

        let mut applied: Vec<(&'static str, String)> = candidates
            .into_iter()
            .filter(|(name, value)| {
                if value.is_empty() || *value == "0" {
                    return false;
                }
                if name.starts_with("date_range") {
                    return is_valid_date(value);
                }
                true
            })
            .map(|(name, value)| (name, value.to_string()))
            .collect();

        let date = date_string(self.day.year, self.day.month, self.day.day);
        if !date.is_empty() {
            applied.push(("date", date));
        }

        applied
    }
}

// ---------------------------------------------------------------------------
// Initial state from the query string
// ---------------------------------------------------------------------------

/// Whether the panel should start expanded for this query string.
pub fn should_expand(query: &str) -> bool {
    query.contains("runs") || query.contains("type") || query.contains("category")
}

/// The date style a query string was submitted with.
pub fn initial_date_mode(query: &str) -> DateMode {
    if query.contains("date_range") {
        DateMode::Range
    } else {
        DateMode::Day
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn filled_panel() -> FilterPanel {
        let mut panel = FilterPanel::default();
        panel.cascade.select_category(Some(4));
        panel.cascade.subcategory.selected = "7".to_string();
        panel.runs_from = "300000".to_string();
        panel.runs_to = "300500".to_string();
        panel.run_type = "3".to_string();
        panel
            .day
            .set(NaiveDate::from_ymd_opt(2018, 7, 2).unwrap());
        panel
    }

    // -- mode switching -------------------------------------------------------

    #[test]
    fn day_mode_discards_range_input() {
        let mut panel = FilterPanel::default();
        panel.range_from = "2018-07-02".to_string();
        panel.range_to = "2018-07-08".to_string();
        panel.set_day_mode();
        assert_eq!(panel.date_mode, DateMode::Day);
        assert!(panel.range_from.is_empty());
        assert!(panel.range_to.is_empty());
    }

    #[test]
    fn range_mode_resets_the_day_dropdowns() {
        let mut panel = filled_panel();
        panel.set_range_mode();
        assert_eq!(panel.date_mode, DateMode::Range);
        assert!(!panel.day.is_set());
    }

    #[test]
    fn clear_all_blanks_everything() {
        let mut panel = filled_panel();
        panel.clear_all();
        assert!(panel.applied_filters().is_empty());
        assert_eq!(panel.cascade.category, None);
    }

    // -- applied_filters ------------------------------------------------------

    #[test]
    fn applied_filters_lists_active_controls_in_order() {
        let panel = filled_panel();
        assert_eq!(
            panel.applied_filters(),
            vec![
                ("category", "4".to_string()),
                ("subcategory", "7".to_string()),
                ("runs_0", "300000".to_string()),
                ("runs_1", "300500".to_string()),
                ("type", "3".to_string()),
                ("date", "2018-07-02".to_string()),
            ]
        );
    }

    #[test]
    fn placeholder_values_are_skipped() {
        let mut panel = FilterPanel::default();
        panel.run_type = "0".to_string();
        panel.runs_from = "".to_string();
        assert!(panel.applied_filters().is_empty());
    }

    #[test]
    fn range_bounds_must_be_real_dates() {
        let mut panel = FilterPanel::default();
        panel.range_from = "2018-02-30".to_string();
        panel.range_to = "2018-07-08".to_string();
        assert_eq!(
            panel.applied_filters(),
            vec![("date_range_1", "2018-07-08".to_string())]
        );
    }

    #[test]
    fn incomplete_day_triple_yields_no_date_filter() {
        let mut panel = FilterPanel::default();
        panel.day.year = 2018;
        panel.day.month = 7;
        assert!(panel.applied_filters().is_empty());
    }

    // -- query string probes --------------------------------------------------

    #[test]
    fn panel_expands_when_non_date_filters_are_active() {
        assert!(should_expand("runs_0=300000&runs_1="));
        assert!(should_expand("type=3"));
        assert!(should_expand("subcategory=7"));
        assert!(!should_expand("date_range_0=2018-07-02"));
        assert!(!should_expand(""));
    }

    #[test]
    fn date_mode_follows_the_query_style() {
        assert_eq!(initial_date_mode("date_range_0=2018-07-02"), DateMode::Range);
        assert_eq!(initial_date_mode("date_year=2018&date_month=7"), DateMode::Day);
        assert_eq!(initial_date_mode(""), DateMode::Day);
    }
}

//! Two-click date range picker.
//!
//! The picker is an explicit state machine over [`RangeSelection`]:
//!
//! ```text
//! Empty          --select(d)--> StartPicked(d)
//! StartPicked(s) --select(d)--> RangeComplete(min(s, d), max(s, d))
//! RangeComplete  --select(d)--> StartPicked(d)
//! ```
//!
//! `hover` only moves the preview endpoint while a start is picked, `cancel`
//! drops everything without emitting, and `confirm` emits the ordered range and
//! closes the picker. State values are never mutated in place; [`RangeSelector::apply`]
//! returns the next state.

use chrono::{Datelike, NaiveDate};
use shared::{
    CellHighlight, DateRange, HighlightedCell, RangeAction, RangePickerState, RangeSelection,
};

use crate::domain::calendar::CalendarService;

/// Outcome of applying one action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeTransition {
    pub state: RangePickerState,
    /// Set only when a confirm committed a range
    pub emitted: Option<DateRange>,
}

#[derive(Clone, Default)]
pub struct RangeSelector {
    calendar: CalendarService,
}

impl RangeSelector {
    pub fn new(calendar: CalendarService) -> Self {
        Self { calendar }
    }

    /// Closed picker showing the month of `today`
    pub fn initial_state(&self, today: NaiveDate) -> RangePickerState {
        RangePickerState {
            open: false,
            visible_year: today.year(),
            visible_month: today.month(),
            selection: RangeSelection::Empty,
            hover: None,
        }
    }

    /// Single update function for every picker event
    pub fn apply(&self, state: &RangePickerState, action: RangeAction) -> RangeTransition {
        let mut next = state.clone();
        let mut emitted = None;

        match action {
            RangeAction::Open { today } => {
                next = RangePickerState {
                    open: true,
                    ..self.initial_state(today)
                };
            }
            RangeAction::Select { date } => {
                next.selection = select(state.selection, date);
                if !matches!(next.selection, RangeSelection::StartPicked { .. }) {
                    next.hover = None;
                }
            }
            RangeAction::Hover { date } => {
                if matches!(state.selection, RangeSelection::StartPicked { .. }) {
                    next.hover = date;
                }
            }
            RangeAction::Clear => {
                next.selection = RangeSelection::Empty;
                next.hover = None;
            }
            RangeAction::Cancel => {
                next.open = false;
                next.selection = RangeSelection::Empty;
                next.hover = None;
            }
            RangeAction::Confirm => {
                if let RangeSelection::RangeComplete { start, end } = state.selection {
                    log::info!("📅 RANGE: Confirmed period {} .. {}", start, end);
                    emitted = Some(DateRange::new(start, end));
                    next.open = false;
                    next.hover = None;
                }
            }
            RangeAction::PreviousMonth => {
                match self.calendar.previous_month(state.visible_month, state.visible_year) {
                    Ok((month, year)) => {
                        next.visible_month = month;
                        next.visible_year = year;
                    }
                    Err(e) => log::warn!("📅 RANGE: Staying on the visible month: {}", e),
                }
            }
            RangeAction::NextMonth => match self.calendar.next_month(state.visible_month, state.visible_year) {
                Ok((month, year)) => {
                    next.visible_month = month;
                    next.visible_year = year;
                }
                Err(e) => log::warn!("📅 RANGE: Staying on the visible month: {}", e),
            },
        }

        RangeTransition { state: next, emitted }
    }

    /// Styling flags for one date, using the hover date as a stand-in end
    pub fn highlight(&self, state: &RangePickerState, date: NaiveDate) -> CellHighlight {
        let (start, end) = match state.selection {
            RangeSelection::Empty => return CellHighlight::default(),
            RangeSelection::StartPicked { start } => (start, None),
            RangeSelection::RangeComplete { start, end } => (start, Some(end)),
        };

        let in_range = match end.or(state.hover) {
            Some(other) => {
                let (low, high) = if start <= other { (start, other) } else { (other, start) };
                date > low && date < high
            }
            None => false,
        };

        CellHighlight {
            is_start: date == start,
            is_end: end == Some(date),
            in_range,
        }
    }

    /// Cells of the visible month with their styling flags
    pub fn highlighted_cells(&self, state: &RangePickerState) -> Vec<HighlightedCell> {
        let grid = match self.calendar.build_grid_for(state.visible_month, state.visible_year) {
            Ok(grid) => grid,
            Err(e) => {
                log::warn!("📅 RANGE: Cannot build grid for picker state: {}", e);
                return Vec::new();
            }
        };

        grid.cells
            .into_iter()
            .map(|cell| HighlightedCell {
                highlight: self.highlight(state, cell.date),
                cell,
            })
            .collect()
    }

    pub fn month_label(&self, state: &RangePickerState) -> String {
        self.calendar.month_year_label(state.visible_month, state.visible_year)
    }
}

fn select(selection: RangeSelection, date: NaiveDate) -> RangeSelection {
    match selection {
        RangeSelection::Empty | RangeSelection::RangeComplete { .. } => RangeSelection::StartPicked { start: date },
        RangeSelection::StartPicked { start } => RangeSelection::RangeComplete {
            start: start.min(date),
            end: start.max(date),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn opened(selector: &RangeSelector) -> RangePickerState {
        let closed = selector.initial_state(date(2025, 10, 16));
        selector.apply(&closed, RangeAction::Open { today: date(2025, 10, 16) }).state
    }

    fn run(selector: &RangeSelector, state: RangePickerState, actions: &[RangeAction]) -> RangeTransition {
        let mut transition = RangeTransition { state, emitted: None };
        for action in actions {
            transition = selector.apply(&transition.state, *action);
        }
        transition
    }

    #[test]
    fn test_open_resets_to_empty_and_current_month() {
        let selector = RangeSelector::default();
        let mut state = opened(&selector);
        state.selection = RangeSelection::StartPicked { start: date(2024, 1, 1) };
        state.visible_month = 3;

        let reopened = selector.apply(&state, RangeAction::Open { today: date(2025, 10, 16) }).state;
        assert!(reopened.open);
        assert_eq!(reopened.selection, RangeSelection::Empty);
        assert_eq!(reopened.visible_month, 10);
        assert_eq!(reopened.visible_year, 2025);
    }

    #[test]
    fn test_two_clicks_commit_ordered_range_in_either_order() {
        let selector = RangeSelector::default();
        let early = date(2025, 10, 3);
        let late = date(2025, 10, 20);

        for (first, second) in [(early, late), (late, early), (early, early)] {
            let t = run(
                &selector,
                opened(&selector),
                &[RangeAction::Select { date: first }, RangeAction::Select { date: second }],
            );
            match t.state.selection {
                RangeSelection::RangeComplete { start, end } => {
                    assert!(start <= end);
                    assert_eq!(start, first.min(second));
                    assert_eq!(end, first.max(second));
                }
                other => panic!("expected complete range, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_third_click_restarts_range() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[
                RangeAction::Select { date: date(2025, 10, 3) },
                RangeAction::Select { date: date(2025, 10, 9) },
                RangeAction::Select { date: date(2025, 10, 25) },
            ],
        );
        assert_eq!(t.state.selection, RangeSelection::StartPicked { start: date(2025, 10, 25) });
    }

    #[test]
    fn test_confirm_emits_and_closes() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[
                RangeAction::Select { date: date(2025, 10, 20) },
                RangeAction::Select { date: date(2025, 10, 2) },
                RangeAction::Confirm,
            ],
        );
        assert!(!t.state.open);
        assert_eq!(t.emitted, Some(DateRange::new(date(2025, 10, 2), date(2025, 10, 20))));
    }

    #[test]
    fn test_confirm_without_complete_range_is_noop() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[RangeAction::Select { date: date(2025, 10, 2) }, RangeAction::Confirm],
        );
        assert!(t.state.open);
        assert_eq!(t.emitted, None);
    }

    #[test]
    fn test_cancel_resets_without_emitting() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[
                RangeAction::Select { date: date(2025, 10, 2) },
                RangeAction::Select { date: date(2025, 10, 5) },
                RangeAction::Cancel,
            ],
        );
        assert!(!t.state.open);
        assert_eq!(t.state.selection, RangeSelection::Empty);
        assert_eq!(t.emitted, None);
    }

    #[test]
    fn test_hover_only_applies_while_start_picked() {
        let selector = RangeSelector::default();
        let state = opened(&selector);

        let t = selector.apply(&state, RangeAction::Hover { date: Some(date(2025, 10, 9)) });
        assert_eq!(t.state.hover, None);

        let t = run(
            &selector,
            state,
            &[
                RangeAction::Select { date: date(2025, 10, 12) },
                RangeAction::Hover { date: Some(date(2025, 10, 8)) },
            ],
        );
        assert_eq!(t.state.hover, Some(date(2025, 10, 8)));
        assert_eq!(t.state.selection, RangeSelection::StartPicked { start: date(2025, 10, 12) });
    }

    #[test]
    fn test_hover_preview_highlights_between_endpoints() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[
                RangeAction::Select { date: date(2025, 10, 12) },
                RangeAction::Hover { date: Some(date(2025, 10, 8)) },
            ],
        );

        let state = &t.state;
        assert!(selector.highlight(state, date(2025, 10, 12)).is_start);
        assert!(!selector.highlight(state, date(2025, 10, 12)).in_range);
        assert!(selector.highlight(state, date(2025, 10, 10)).in_range);
        assert!(!selector.highlight(state, date(2025, 10, 8)).in_range);
        assert!(!selector.highlight(state, date(2025, 10, 13)).in_range);
    }

    #[test]
    fn test_complete_range_highlights() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[
                RangeAction::Select { date: date(2025, 10, 5) },
                RangeAction::Select { date: date(2025, 10, 7) },
            ],
        );

        let cells = selector.highlighted_cells(&t.state);
        let flagged: Vec<_> = cells.iter().filter(|c| c.highlight.in_range).collect();
        assert_eq!(flagged.len(), 1);
        assert_eq!(flagged[0].cell.date, date(2025, 10, 6));

        let end = cells.iter().find(|c| c.cell.date == date(2025, 10, 7)).unwrap();
        assert!(end.highlight.is_end);
    }

    #[test]
    fn test_month_navigation_rolls_years() {
        let selector = RangeSelector::default();
        let mut state = opened(&selector);
        state.visible_month = 1;

        let t = selector.apply(&state, RangeAction::PreviousMonth);
        assert_eq!((t.state.visible_month, t.state.visible_year), (12, 2024));
        let t = selector.apply(&t.state, RangeAction::NextMonth);
        assert_eq!((t.state.visible_month, t.state.visible_year), (1, 2025));
        assert_eq!(selector.month_label(&t.state), "janeiro de 2025");
    }

    #[test]
    fn test_navigation_stops_at_the_last_year() {
        let selector = RangeSelector::default();
        let mut state = opened(&selector);
        state.visible_month = 12;
        state.visible_year = i32::MAX;

        let t = selector.apply(&state, RangeAction::NextMonth);
        assert_eq!((t.state.visible_month, t.state.visible_year), (12, i32::MAX));
        assert!(selector.highlighted_cells(&t.state).is_empty());
    }

    #[test]
    fn test_clear_keeps_picker_open() {
        let selector = RangeSelector::default();
        let t = run(
            &selector,
            opened(&selector),
            &[RangeAction::Select { date: date(2025, 10, 5) }, RangeAction::Clear],
        );
        assert!(t.state.open);
        assert_eq!(t.state.selection, RangeSelection::Empty);
    }
}

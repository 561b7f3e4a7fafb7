//! Calendar domain logic for the range picker.
//!
//! Builds the Sunday-first month grid shown by the picker on the dashboard,
//! transactions and report screens, plus the month arithmetic used to page
//! through it. Everything here is a pure function of (year, month); the UI
//! only renders the cells it is handed.

use chrono::{Datelike, Days, NaiveDate};
use shared::{CalendarCell, CalendarMonthGrid};

use crate::error::{DashboardError, DashboardResult};

/// Calendar service that handles all grid and month-navigation logic
#[derive(Clone, Default)]
pub struct CalendarService;

impl CalendarService {
    pub fn new() -> Self {
        Self
    }

    /// Build the grid for the month containing `reference`.
    ///
    /// Emits the tail of the previous month up to the first weekday, every day
    /// of the month, then days of the next month until the length is a
    /// multiple of 7. Fails only for the first and last months chrono can
    /// represent, where the padding would fall outside the date range.
    pub fn build_month_grid(&self, reference: NaiveDate) -> DashboardResult<CalendarMonthGrid> {
        let first = reference - Days::new(u64::from(reference.day0()));
        let year = first.year();
        let month = first.month();
        let out_of_range = || DashboardError::InvalidMonth { month, year };
        let lead = first.weekday().num_days_from_sunday();
        let days_in_month = self.days_in_month(month, year);

        log::debug!(
            "🗓️ CALENDAR: Building grid for {}/{} ({} days, {} lead cells)",
            month, year, days_in_month, lead
        );

        let month_cells = (lead + days_in_month) as usize;
        let total = month_cells.div_ceil(7) * 7;
        let grid_start = first
            .checked_sub_days(Days::new(u64::from(lead)))
            .ok_or_else(out_of_range)?;
        grid_start
            .checked_add_days(Days::new(total as u64 - 1))
            .ok_or_else(out_of_range)?;

        let cells: Vec<CalendarCell> = grid_start
            .iter_days()
            .take(total)
            .map(|date| CalendarCell {
                day: date.day(),
                in_current_month: date.month() == month && date.year() == year,
                date,
            })
            .collect();

        log::debug!("🗓️ CALENDAR: Grid for {}/{} has {} cells", month, year, cells.len());

        Ok(CalendarMonthGrid {
            year,
            month,
            cells,
            first_day_of_week: lead,
        })
    }

    /// Grid for an explicit month number (1-12)
    pub fn build_grid_for(&self, month: u32, year: i32) -> DashboardResult<CalendarMonthGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or(DashboardError::InvalidMonth { month, year })?;
        self.build_month_grid(first)
    }

    /// Get the number of days in a given month and year
    pub fn days_in_month(&self, month: u32, year: i32) -> u32 {
        match month {
            2 => {
                if self.is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn is_leap_year(&self, year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    pub fn previous_month(&self, month: u32, year: i32) -> DashboardResult<(u32, i32)> {
        let invalid = DashboardError::InvalidMonth { month, year };
        match month {
            1 => year.checked_sub(1).map(|previous| (12, previous)).ok_or(invalid),
            2..=12 => Ok((month - 1, year)),
            _ => Err(invalid),
        }
    }

    pub fn next_month(&self, month: u32, year: i32) -> DashboardResult<(u32, i32)> {
        let invalid = DashboardError::InvalidMonth { month, year };
        match month {
            12 => year.checked_add(1).map(|next| (1, next)).ok_or(invalid),
            1..=11 => Ok((month + 1, year)),
            _ => Err(invalid),
        }
    }

    /// Full pt-BR month name, lowercase as the locale writes it
    pub fn month_name(&self, month: u32) -> &'static str {
        match month {
            1 => "janeiro", 2 => "fevereiro", 3 => "março", 4 => "abril",
            5 => "maio", 6 => "junho", 7 => "julho", 8 => "agosto",
            9 => "setembro", 10 => "outubro", 11 => "novembro", 12 => "dezembro",
            _ => "mês inválido",
        }
    }

    /// Three-letter pt-BR abbreviation used on chart axes
    pub fn month_abbreviation(&self, month: u32) -> &'static str {
        match month {
            1 => "Jan", 2 => "Fev", 3 => "Mar", 4 => "Abr",
            5 => "Mai", 6 => "Jun", 7 => "Jul", 8 => "Ago",
            9 => "Set", 10 => "Out", 11 => "Nov", 12 => "Dez",
            _ => "???",
        }
    }

    /// Header shown above the grid, e.g. "outubro de 2025"
    pub fn month_year_label(&self, month: u32, year: i32) -> String {
        format!("{} de {}", self.month_name(month), year)
    }

    /// Parse a strict `YYYY-MM-DD` date
    pub fn parse_iso_date(&self, value: &str) -> DashboardResult<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| DashboardError::InvalidDate {
            value: value.to_string(),
        })
    }

    /// Format a date for display as `dd/mm/yyyy`
    pub fn format_date_for_display(&self, date: NaiveDate) -> String {
        date.format("%d/%m/%Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_in_month() {
        let service = CalendarService::new();

        assert_eq!(service.days_in_month(1, 2025), 31);
        assert_eq!(service.days_in_month(4, 2025), 30);
        assert_eq!(service.days_in_month(2, 2025), 28);
        assert_eq!(service.days_in_month(2, 2024), 29);
    }

    #[test]
    fn test_is_leap_year() {
        let service = CalendarService::new();

        assert!(!service.is_leap_year(2025));
        assert!(service.is_leap_year(2024));
        assert!(!service.is_leap_year(1900));
        assert!(service.is_leap_year(2000));
    }

    #[test]
    fn test_october_2025_grid() {
        let service = CalendarService::new();
        // 1 Oct 2025 is a Wednesday
        let grid = service.build_month_grid(date(2025, 10, 17)).unwrap();

        assert_eq!(grid.year, 2025);
        assert_eq!(grid.month, 10);
        assert_eq!(grid.first_day_of_week, 3);
        assert_eq!(grid.cells.len(), 35);

        assert_eq!(grid.cells[0].date, date(2025, 9, 28));
        assert!(!grid.cells[0].in_current_month);
        assert_eq!(grid.cells[3].date, date(2025, 10, 1));
        assert!(grid.cells[3].in_current_month);
        assert_eq!(grid.cells[33].date, date(2025, 10, 31));
        assert_eq!(grid.cells[34].date, date(2025, 11, 1));
        assert_eq!(grid.cells[34].day, 1);
        assert!(!grid.cells[34].in_current_month);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_lead() {
        let service = CalendarService::new();
        // 1 Jun 2025 is a Sunday
        let grid = service.build_month_grid(date(2025, 6, 1)).unwrap();

        assert_eq!(grid.first_day_of_week, 0);
        assert_eq!(grid.cells[0].date, date(2025, 6, 1));
        assert_eq!(grid.cells.len(), 35);
    }

    #[test]
    fn test_february_exact_four_weeks() {
        let service = CalendarService::new();
        // Feb 2015 starts on Sunday and has 28 days
        let grid = service.build_month_grid(date(2015, 2, 10)).unwrap();

        assert_eq!(grid.cells.len(), 28);
        assert!(grid.cells.iter().all(|c| c.in_current_month));
    }

    #[test]
    fn test_six_week_month() {
        let service = CalendarService::new();
        // Aug 2025 starts on Friday with 31 days -> 5 lead + 31 = 36 -> 42
        let grid = service.build_month_grid(date(2025, 8, 1)).unwrap();
        assert_eq!(grid.cells.len(), 42);
        assert_eq!(grid.cells[41].date, date(2025, 9, 6));
    }

    #[test]
    fn test_grid_properties_for_many_months() {
        let service = CalendarService::new();

        for year in [1999, 2000, 2024, 2025, 2100] {
            for month in 1..=12 {
                let grid = service.build_grid_for(month, year).unwrap();
                assert!(!grid.cells.is_empty());
                assert_eq!(grid.cells.len() % 7, 0, "{}/{} not full weeks", month, year);
                assert!(grid.cells.windows(2).all(|w| w[0].date < w[1].date));
                assert_eq!(grid.cells[0].date.weekday().num_days_from_sunday(), 0);

                let in_month = grid.cells.iter().filter(|c| c.in_current_month).count() as u32;
                assert_eq!(in_month, service.days_in_month(month, year));
            }
        }
    }

    #[test]
    fn test_build_grid_for_rejects_bad_month() {
        let service = CalendarService::new();
        assert!(matches!(
            service.build_grid_for(13, 2025),
            Err(DashboardError::InvalidMonth { month: 13, year: 2025 })
        ));
    }

    #[test]
    fn test_navigation() {
        let service = CalendarService::new();

        assert_eq!(service.previous_month(6, 2025).unwrap(), (5, 2025));
        assert_eq!(service.previous_month(1, 2025).unwrap(), (12, 2024));
        assert_eq!(service.next_month(6, 2025).unwrap(), (7, 2025));
        assert_eq!(service.next_month(12, 2025).unwrap(), (1, 2026));
        assert!(service.next_month(13, 2025).is_err());
    }

    #[test]
    fn test_navigation_at_year_limits() {
        let service = CalendarService::new();

        assert!(matches!(
            service.next_month(12, i32::MAX),
            Err(DashboardError::InvalidMonth { month: 12, year: i32::MAX })
        ));
        assert!(matches!(
            service.previous_month(1, i32::MIN),
            Err(DashboardError::InvalidMonth { month: 1, year: i32::MIN })
        ));
    }

    #[test]
    fn test_grid_at_date_range_edges() {
        let service = CalendarService::new();

        let first_month = service.build_grid_for(1, NaiveDate::MIN.year());
        assert!(matches!(first_month, Err(DashboardError::InvalidMonth { month: 1, .. })));

        let last_month = service.build_grid_for(12, NaiveDate::MAX.year());
        assert!(matches!(last_month, Err(DashboardError::InvalidMonth { month: 12, .. })));

        // One month in from either edge still has room for its padding
        let second = service.build_grid_for(2, NaiveDate::MIN.year()).unwrap();
        assert_eq!(second.cells.len() % 7, 0);
        let penultimate = service.build_grid_for(11, NaiveDate::MAX.year()).unwrap();
        assert_eq!(penultimate.cells.len() % 7, 0);
    }

    #[test]
    fn test_labels() {
        let service = CalendarService::new();

        assert_eq!(service.month_year_label(10, 2025), "outubro de 2025");
        assert_eq!(service.month_abbreviation(2), "Fev");
        assert_eq!(service.month_name(13), "mês inválido");
    }

    #[test]
    fn test_parse_and_format_dates() {
        let service = CalendarService::new();

        assert_eq!(service.parse_iso_date("2025-10-05").unwrap(), date(2025, 10, 5));
        assert!(service.parse_iso_date("05/10/2025").is_err());
        assert_eq!(service.format_date_for_display(date(2025, 10, 5)), "05/10/2025");
    }
}

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single cell of the month grid shown by the range picker.
/// `date` travels as an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarCell {
    pub day: u32,
    pub in_current_month: bool,
    pub date: NaiveDate,
}

/// A full Sunday-first month grid (length is always a multiple of 7)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
    /// 0 = Sunday, 1 = Monday, etc.
    pub first_day_of_week: u32,
}

/// Start/end pair chosen with the range picker.
/// A range handed to consumers always satisfies `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => date >= start && date <= end,
            _ => false,
        }
    }
}

/// Selection state of the two-click range picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RangeSelection {
    #[default]
    Empty,
    StartPicked { start: NaiveDate },
    /// Endpoints are stored already ordered
    RangeComplete { start: NaiveDate, end: NaiveDate },
}

/// Complete state of a range picker instance, including the visible month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangePickerState {
    pub open: bool,
    pub visible_year: i32,
    pub visible_month: u32,
    pub selection: RangeSelection,
    /// Transient preview endpoint, only meaningful while a start is picked
    pub hover: Option<NaiveDate>,
}

/// User interactions accepted by the range picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RangeAction {
    Open { today: NaiveDate },
    Select { date: NaiveDate },
    Hover { date: Option<NaiveDate> },
    Clear,
    Cancel,
    Confirm,
    PreviousMonth,
    NextMonth,
}

/// Styling flags for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CellHighlight {
    pub is_start: bool,
    pub is_end: bool,
    pub in_range: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightedCell {
    #[serde(flatten)]
    pub cell: CalendarCell,
    #[serde(flatten)]
    pub highlight: CellHighlight,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTransitionRequest {
    pub state: RangePickerState,
    pub action: RangeAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTransitionResponse {
    pub state: RangePickerState,
    /// Present only when a confirm committed a range
    pub emitted: Option<DateRange>,
    pub month_label: String,
    pub cells: Vec<HighlightedCell>,
}

/// Granularity used to bucket financial data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Month,
    Quarter,
    Year,
}

impl PeriodType {
    /// Cycle used by the period toggle: month -> quarter -> year -> month
    pub fn next(self) -> Self {
        match self {
            PeriodType::Month => PeriodType::Quarter,
            PeriodType::Quarter => PeriodType::Year,
            PeriodType::Year => PeriodType::Month,
        }
    }
}

/// Identifier of a calendar bucket. String forms: `2025-10`, `2025-Q4`, `2025`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year(i32),
}

impl PeriodKey {
    /// Derive the key containing `date` for the given period type
    pub fn from_date(period_type: PeriodType, date: NaiveDate) -> Self {
        match period_type {
            PeriodType::Month => PeriodKey::Month {
                year: date.year(),
                month: date.month(),
            },
            PeriodType::Quarter => PeriodKey::Quarter {
                year: date.year(),
                quarter: (date.month() - 1) / 3 + 1,
            },
            PeriodType::Year => PeriodKey::Year(date.year()),
        }
    }

    pub fn period_type(&self) -> PeriodType {
        match self {
            PeriodKey::Month { .. } => PeriodType::Month,
            PeriodKey::Quarter { .. } => PeriodType::Quarter,
            PeriodKey::Year(_) => PeriodType::Year,
        }
    }

    pub fn year(&self) -> i32 {
        match *self {
            PeriodKey::Month { year, .. } | PeriodKey::Quarter { year, .. } | PeriodKey::Year(year) => year,
        }
    }

    /// First calendar day covered by this key
    pub fn first_day(&self) -> Option<NaiveDate> {
        match *self {
            PeriodKey::Month { year, month } => NaiveDate::from_ymd_opt(year, month, 1),
            PeriodKey::Quarter { year, quarter } => NaiveDate::from_ymd_opt(year, (quarter - 1) * 3 + 1, 1),
            PeriodKey::Year(year) => NaiveDate::from_ymd_opt(year, 1, 1),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKey::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
            PeriodKey::Quarter { year, quarter } => write!(f, "{:04}-Q{}", year, quarter),
            PeriodKey::Year(year) => write!(f, "{:04}", year),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PeriodKeyError {
    #[error("malformed period key: {0:?}")]
    Malformed(String),
    #[error("month out of range in period key: {0:?}")]
    MonthOutOfRange(String),
    #[error("quarter out of range in period key: {0:?}")]
    QuarterOutOfRange(String),
}

impl FromStr for PeriodKey {
    type Err = PeriodKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let malformed = || PeriodKeyError::Malformed(raw.to_string());

        let (year_part, rest) = match raw.split_once('-') {
            Some((year, rest)) => (year, Some(rest)),
            None => (raw, None),
        };
        if year_part.len() != 4 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(malformed());
        }
        let year: i32 = year_part.parse().map_err(|_| malformed())?;

        match rest {
            None => Ok(PeriodKey::Year(year)),
            Some(rest) => {
                if let Some(quarter) = rest.strip_prefix('Q').or_else(|| rest.strip_prefix('q')) {
                    let quarter: u32 = quarter.parse().map_err(|_| malformed())?;
                    if !(1..=4).contains(&quarter) {
                        return Err(PeriodKeyError::QuarterOutOfRange(raw.to_string()));
                    }
                    Ok(PeriodKey::Quarter { year, quarter })
                } else {
                    if rest.len() != 2 {
                        return Err(malformed());
                    }
                    let month: u32 = rest.parse().map_err(|_| malformed())?;
                    if !(1..=12).contains(&month) {
                        return Err(PeriodKeyError::MonthOutOfRange(raw.to_string()));
                    }
                    Ok(PeriodKey::Month { year, month })
                }
            }
        }
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = PeriodKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyValue {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotIndicators {
    /// Revenue growth over the previous bucket, in percent
    pub revenue_growth: f64,
    pub efficiency: f64,
    pub satisfaction: f64,
    pub productivity: f64,
}

/// Aggregate figures for one period key. Read-only once selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    pub revenue: f64,
    pub expense: f64,
    pub profit: f64,
    /// Net margin in percent
    pub net_margin: f64,
    pub active_contracts: u32,
    pub pending_contracts: u32,
    pub overdue_contracts: u32,
    pub revenue_by_month: Vec<MonthlyValue>,
    pub expense_by_category: Vec<CategoryValue>,
    pub indicators: SnapshotIndicators,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractAverages {
    pub average_contract_value: f64,
    pub average_recurring_value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostAverages {
    pub fixed: f64,
    pub variable: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChurnMetrics {
    /// Percent of contracts lost in the period
    pub rate: f64,
    pub lost_contracts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LtvMetrics {
    pub value: f64,
    pub average_lifetime_months: f64,
}

/// Overdue and unpaid receivables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelinquencyMetrics {
    pub amount: f64,
    /// Percent of expected receivables
    pub rate: f64,
}

/// Figures that live in their own tables but share the snapshot's key
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    pub contract_averages: ContractAverages,
    pub cost_averages: CostAverages,
    pub churn: ChurnMetrics,
    pub ltv: LtvMetrics,
    pub delinquency: DelinquencyMetrics,
}

/// Profit health bucket derived from the net margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfitStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Chart x-axis granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartPeriod {
    DailyWithinMonth,
    MonthlyWithinYear,
}

impl ChartPeriod {
    pub fn toggled(self) -> Self {
        match self {
            ChartPeriod::DailyWithinMonth => ChartPeriod::MonthlyWithinYear,
            ChartPeriod::MonthlyWithinYear => ChartPeriod::DailyWithinMonth,
        }
    }
}

/// Raw per-bucket values before alignment to chart labels
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CategorySeries {
    pub revenue: Vec<f64>,
    pub renegotiated: Vec<f64>,
    pub expense: Vec<f64>,
}

/// Everything the external charting surface needs to draw one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub period: ChartPeriod,
    pub labels: Vec<String>,
    pub revenue: Vec<f64>,
    pub renegotiated: Vec<f64>,
    pub expense: Vec<f64>,
    /// Running balance as rendered (never below zero)
    pub projected_balance: Vec<f64>,
    /// Final accumulated value of the running balance
    pub period_end_balance: f64,
}

/// Snapshot, metrics and chart series for one key, swapped as a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodView {
    pub key: PeriodKey,
    pub snapshot: FinancialSnapshot,
    pub metrics: PeriodMetrics,
    pub profit_status: ProfitStatus,
    pub series: ChartSeries,
}

/// The single active dashboard state. Replaced, never mutated, on each event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardState {
    pub mounted: bool,
    /// Fallback anchor when no range has been confirmed
    pub today: NaiveDate,
    pub period_type: PeriodType,
    pub selected_range: DateRange,
    pub picker: RangePickerState,
    pub selected_key: PeriodKey,
    /// Last view whose key matched `selected_key` when it arrived
    pub view: Option<PeriodView>,
    pub loading: bool,
}

/// Everything that can happen to the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DashboardEvent {
    Mounted { today: NaiveDate },
    Unmounted,
    Picker { action: RangeAction },
    PeriodTypeToggled,
    PeriodTypeSelected { period_type: PeriodType },
    ChartPeriodToggled,
    ViewLoaded { view: PeriodView },
    LoadFailed { key: PeriodKey, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Revenue,
    Expense,
}

/// A cash movement as listed on the transactions screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: String,
    pub kind: TransactionKind,
    pub due_date: NaiveDate,
    pub settlement_date: Option<NaiveDate>,
    pub counterparty: String,
    pub description: String,
    pub category: String,
    pub account: String,
    /// Always non-negative; the direction comes from `kind`
    pub amount: f64,
}

impl TransactionRecord {
    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Revenue => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Conjunction of optional predicates over transaction records
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransactionFilter {
    pub category: Option<String>,
    pub account: Option<String>,
    pub kind: Option<TransactionKind>,
    /// Case-insensitive substring over counterparty and description
    pub text: Option<String>,
    /// Confirmed range from the picker, matched against the due date
    pub due_between: Option<DateRange>,
}

impl TransactionFilter {
    pub fn is_empty(&self) -> bool {
        self.category.is_none()
            && self.account.is_none()
            && self.kind.is_none()
            && self.text.is_none()
            && self.due_between.is_none()
    }
}

/// Loosely typed transaction as it arrives from seed files or the upstream
/// backend. Converted into [`TransactionRecord`] at the boundary.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub id: Option<String>,
    #[serde(alias = "tipo")]
    pub kind: Option<String>,
    #[serde(alias = "dataVencimento")]
    pub due_date: Option<String>,
    #[serde(alias = "dataPagamento")]
    pub settlement_date: Option<String>,
    #[serde(alias = "contraparte")]
    pub counterparty: Option<String>,
    #[serde(alias = "descricao")]
    pub description: Option<String>,
    #[serde(alias = "categoria")]
    pub category: Option<String>,
    #[serde(alias = "conta")]
    pub account: Option<String>,
    /// Number or pt-BR formatted string
    #[serde(alias = "valor")]
    pub amount: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionTotals {
    pub revenue: f64,
    pub expense: f64,
    pub net_balance: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// `"<field>,<asc|desc>"`
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: 10,
            sort: Some("dueDate,desc".to_string()),
        }
    }
}

/// Paginated payload in the upstream backend's wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    pub number: u32,
    pub first: bool,
    pub last: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPageResponse {
    #[serde(flatten)]
    pub page: PageResponse<TransactionRecord>,
    pub totals: TransactionTotals,
}

/// Type of transaction amount for styling and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmountType {
    Positive,
    Negative,
    Zero,
}

/// A transaction row formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedTransaction {
    pub id: String,
    pub formatted_due_date: String,
    pub formatted_settlement_date: Option<String>,
    pub counterparty: String,
    pub description: String,
    pub category: String,
    pub account: String,
    pub formatted_amount: String,
    pub amount_type: AmountType,
    pub raw_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    pub filename: String,
    pub record_count: usize,
}

/// A short-lived message shown by the notification area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotification {
    pub id: Uuid,
    pub message: String,
    pub code: String,
    pub status: Option<u16>,
    pub created_at: DateTime<Utc>,
}

/// A failed call to the upstream backend. `status` is `None` when the request
/// never got a response (network or client-side failure).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BackendFailure {
    pub status: Option<u16>,
    /// Message supplied by the backend body, if any
    pub message: Option<String>,
}

/// What the host UI must do about a backend failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "notification", rename_all = "snake_case")]
pub enum FailureAction {
    /// Session is gone: clear credentials and go to login
    ForceLogout(ErrorNotification),
    ForbiddenRedirect(ErrorNotification),
    Notify(ErrorNotification),
}

impl FailureAction {
    pub fn notification(&self) -> &ErrorNotification {
        match self {
            FailureAction::ForceLogout(n) | FailureAction::ForbiddenRedirect(n) | FailureAction::Notify(n) => n,
        }
    }
}

/// Inline validation failures on local forms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormFieldError {
    RequiredFieldMissing(String),
    InvalidEmail(String),
    PasswordTooShort(usize),
    PasswordMismatch,
    PasswordUnchanged,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidationResult {
    pub is_valid: bool,
    pub errors: Vec<FormFieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_key_display() {
        assert_eq!(PeriodKey::Month { year: 2025, month: 10 }.to_string(), "2025-10");
        assert_eq!(PeriodKey::Month { year: 2025, month: 3 }.to_string(), "2025-03");
        assert_eq!(PeriodKey::Quarter { year: 2025, quarter: 4 }.to_string(), "2025-Q4");
        assert_eq!(PeriodKey::Year(2025).to_string(), "2025");
    }

    #[test]
    fn test_period_key_parse() {
        assert_eq!("2025-10".parse::<PeriodKey>().unwrap(), PeriodKey::Month { year: 2025, month: 10 });
        assert_eq!("2025-Q4".parse::<PeriodKey>().unwrap(), PeriodKey::Quarter { year: 2025, quarter: 4 });
        assert_eq!(" 2024 ".parse::<PeriodKey>().unwrap(), PeriodKey::Year(2024));

        assert!(matches!("2025-13".parse::<PeriodKey>(), Err(PeriodKeyError::MonthOutOfRange(_))));
        assert!(matches!("2025-Q5".parse::<PeriodKey>(), Err(PeriodKeyError::QuarterOutOfRange(_))));
        assert!(matches!("25-10".parse::<PeriodKey>(), Err(PeriodKeyError::Malformed(_))));
        assert!(matches!("2025-1".parse::<PeriodKey>(), Err(PeriodKeyError::Malformed(_))));
        assert!(matches!("".parse::<PeriodKey>(), Err(PeriodKeyError::Malformed(_))));
    }

    #[test]
    fn test_period_key_from_date() {
        let d = date(2025, 10, 15);
        assert_eq!(PeriodKey::from_date(PeriodType::Month, d).to_string(), "2025-10");
        assert_eq!(PeriodKey::from_date(PeriodType::Quarter, d).to_string(), "2025-Q4");
        assert_eq!(PeriodKey::from_date(PeriodType::Year, d).to_string(), "2025");
        assert_eq!(PeriodKey::from_date(PeriodType::Quarter, date(2025, 3, 31)).to_string(), "2025-Q1");
        assert_eq!(PeriodKey::from_date(PeriodType::Quarter, date(2025, 4, 1)).to_string(), "2025-Q2");
    }

    #[test]
    fn test_period_key_first_day() {
        assert_eq!(PeriodKey::Quarter { year: 2025, quarter: 3 }.first_day(), Some(date(2025, 7, 1)));
        assert_eq!(PeriodKey::Year(2024).first_day(), Some(date(2024, 1, 1)));
    }

    #[test]
    fn test_period_key_serde_uses_string_form() {
        let json = serde_json::to_string(&PeriodKey::Quarter { year: 2025, quarter: 2 }).unwrap();
        assert_eq!(json, "\"2025-Q2\"");
        let back: PeriodKey = serde_json::from_str("\"2025-07\"").unwrap();
        assert_eq!(back, PeriodKey::Month { year: 2025, month: 7 });
        assert!(serde_json::from_str::<PeriodKey>("\"july\"").is_err());
    }

    #[test]
    fn test_period_type_cycle() {
        assert_eq!(PeriodType::Month.next(), PeriodType::Quarter);
        assert_eq!(PeriodType::Quarter.next(), PeriodType::Year);
        assert_eq!(PeriodType::Year.next(), PeriodType::Month);
    }

    #[test]
    fn test_date_range_orders_endpoints() {
        let range = DateRange::new(date(2025, 10, 20), date(2025, 10, 3));
        assert_eq!(range.start, Some(date(2025, 10, 3)));
        assert_eq!(range.end, Some(date(2025, 10, 20)));
        assert!(range.contains(date(2025, 10, 3)));
        assert!(!range.contains(date(2025, 10, 21)));
        assert!(!DateRange::default().is_complete());
    }

    #[test]
    fn test_range_selection_wire_format() {
        let selection = RangeSelection::StartPicked { start: date(2025, 10, 5) };
        let json = serde_json::to_value(selection).unwrap();
        assert_eq!(json["state"], "start_picked");
        assert_eq!(json["start"], "2025-10-05");
    }

    #[test]
    fn test_page_response_wire_format() {
        let page: PageResponse<u32> = PageResponse {
            content: vec![1, 2],
            total_elements: 2,
            total_pages: 1,
            size: 10,
            number: 0,
            first: true,
            last: true,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 2);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["number"], 0);
    }

    #[test]
    fn test_signed_amount() {
        let mut record = TransactionRecord {
            id: "1".to_string(),
            kind: TransactionKind::Expense,
            due_date: date(2025, 10, 1),
            settlement_date: None,
            counterparty: "ACME".to_string(),
            description: "Rent".to_string(),
            category: "Aluguel".to_string(),
            account: "Itaú".to_string(),
            amount: 120.0,
        };
        assert_eq!(record.signed_amount(), -120.0);
        record.kind = TransactionKind::Revenue;
        assert_eq!(record.signed_amount(), 120.0);
    }

    #[test]
    fn test_chart_period_wire_format() {
        assert_eq!(serde_json::to_string(&ChartPeriod::DailyWithinMonth).unwrap(), "\"daily-within-month\"");
        assert_eq!(ChartPeriod::MonthlyWithinYear.toggled(), ChartPeriod::DailyWithinMonth);
    }
}

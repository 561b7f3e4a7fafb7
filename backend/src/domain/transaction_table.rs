//! Transaction table formatting.
//!
//! Turns [`TransactionRecord`]s into display rows for the transactions screen:
//! pt-BR currency (`R$ 1.234,56`), `dd/mm/yyyy` dates and a sign
//! classification the UI uses for styling. Also parses amounts typed in the
//! same locale.

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use shared::{AmountType, FormattedTransaction, TransactionRecord};

use crate::domain::calendar::CalendarService;

pub const CURRENCY_PREFIX: &str = "R$";

/// Configuration for transaction table display
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionTableConfig {
    pub show_currency_symbol: bool,
    pub date_format: DateFormat,
    pub amount_format: AmountFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    ShortDate, // "16/10/2025"
    LongDate,  // "16 de outubro de 2025"
    Iso,       // "2025-10-16"
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountFormat {
    PlusMinusSign,  // "+R$ 10,00" / "-R$ 5,00"
    ParenthesesNeg, // "R$ 10,00" / "(R$ 5,00)"
    ColorOnly,      // "R$ 10,00" (styled with color)
}

impl Default for TransactionTableConfig {
    fn default() -> Self {
        Self {
            show_currency_symbol: true,
            date_format: DateFormat::ShortDate,
            amount_format: AmountFormat::PlusMinusSign,
        }
    }
}

/// Transaction table service that handles all row formatting
#[derive(Clone, Default)]
pub struct TransactionTableService {
    config: TransactionTableConfig,
    calendar: CalendarService,
}

impl TransactionTableService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TransactionTableConfig) -> Self {
        Self {
            config,
            calendar: CalendarService::new(),
        }
    }

    pub fn config(&self) -> &TransactionTableConfig {
        &self.config
    }

    pub fn format_transactions_for_table(&self, records: &[TransactionRecord]) -> Vec<FormattedTransaction> {
        records.iter().map(|record| self.format_single_transaction(record)).collect()
    }

    pub fn format_single_transaction(&self, record: &TransactionRecord) -> FormattedTransaction {
        let signed = record.signed_amount();
        FormattedTransaction {
            id: record.id.clone(),
            formatted_due_date: self.format_date(record.due_date),
            formatted_settlement_date: record.settlement_date.map(|date| self.format_date(date)),
            counterparty: record.counterparty.clone(),
            description: record.description.clone(),
            category: record.category.clone(),
            account: record.account.clone(),
            formatted_amount: self.format_amount(signed),
            amount_type: self.classify_amount(signed),
            raw_amount: signed,
        }
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.config.date_format {
            DateFormat::ShortDate => self.calendar.format_date_for_display(date),
            DateFormat::LongDate => format!(
                "{} de {} de {}",
                date.day(),
                self.calendar.month_name(date.month()),
                date.year()
            ),
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }

    /// Signed amount formatted according to the configured style
    pub fn format_amount(&self, amount: f64) -> String {
        let magnitude = if self.config.show_currency_symbol {
            format_brl(amount.abs())
        } else {
            group_decimal(amount.abs())
        };

        match self.config.amount_format {
            AmountFormat::PlusMinusSign => {
                if amount >= 0.0 {
                    format!("+{}", magnitude)
                } else {
                    format!("-{}", magnitude)
                }
            }
            AmountFormat::ParenthesesNeg => {
                if amount >= 0.0 {
                    magnitude
                } else {
                    format!("({})", magnitude)
                }
            }
            AmountFormat::ColorOnly => magnitude,
        }
    }

    pub fn classify_amount(&self, amount: f64) -> AmountType {
        if amount > 0.0 {
            AmountType::Positive
        } else if amount < 0.0 {
            AmountType::Negative
        } else {
            AmountType::Zero
        }
    }
}

/// `R$ 1.234,56`; negative values keep a leading minus
pub fn format_brl(amount: f64) -> String {
    if amount < 0.0 {
        format!("-{} {}", CURRENCY_PREFIX, group_decimal(-amount))
    } else {
        format!("{} {}", CURRENCY_PREFIX, group_decimal(amount))
    }
}

/// `1234.5` -> `1.234,50`
fn group_decimal(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let digits = (cents / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    format!("{},{:02}", grouped, cents % 100)
}

/// Parse an amount typed in pt-BR (`R$ 1.234,56`, `1234,56`, `-50`). Without a
/// comma, a single dot followed by one or two digits is read as the decimal
/// point (`1500.50`).
pub fn parse_brl(input: &str) -> Option<f64> {
    let compact: String = input
        .trim()
        .replace(CURRENCY_PREFIX, "")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let normalized = if compact.contains(',') {
        compact.replace('.', "").replace(',', ".")
    } else if has_dot_decimal(&compact) {
        compact
    } else {
        compact.replace('.', "")
    };

    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn has_dot_decimal(value: &str) -> bool {
    match value.split_once('.') {
        Some((_, fraction)) => !fraction.contains('.') && (1..=2).contains(&fraction.len()),
        None => false,
    }
}

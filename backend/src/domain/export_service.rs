//! CSV export of the filtered transaction set.
//!
//! Produces the file body and a suggested filename; handing the bytes to the
//! browser is the host UI's job.

use chrono::{NaiveDate, Utc};
use csv::Writer;
use log::info;
use shared::{ExportDataResponse, TransactionKind, TransactionRecord};

use crate::domain::transaction_table::format_brl;
use crate::error::{DashboardError, DashboardResult};

const HEADER: [&str; 8] = [
    "Vencimento",
    "Liquidação",
    "Tipo",
    "Contraparte",
    "Descrição",
    "Categoria",
    "Conta",
    "Valor",
];

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Export using today's date in the filename
    pub fn export_transactions_csv(&self, records: &[TransactionRecord]) -> DashboardResult<ExportDataResponse> {
        self.export_transactions_csv_on(records, Utc::now().date_naive())
    }

    pub fn export_transactions_csv_on(
        &self,
        records: &[TransactionRecord],
        today: NaiveDate,
    ) -> DashboardResult<ExportDataResponse> {
        info!("📄 EXPORT: Exporting {} transactions as CSV", records.len());

        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(HEADER)?;

        for record in records {
            let settlement = record
                .settlement_date
                .map(|date| date.format("%d/%m/%Y").to_string())
                .unwrap_or_default();
            let kind = match record.kind {
                TransactionKind::Revenue => "Receita",
                TransactionKind::Expense => "Despesa",
            };
            writer.write_record([
                record.due_date.format("%d/%m/%Y").to_string().as_str(),
                settlement.as_str(),
                kind,
                record.counterparty.as_str(),
                record.description.as_str(),
                record.category.as_str(),
                record.account.as_str(),
                format_brl(record.signed_amount()).as_str(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| DashboardError::Export(csv::Error::from(e.into_error())))?;
        let csv_content = String::from_utf8_lossy(&bytes).into_owned();
        let filename = format!("transacoes_{}.csv", today.format("%Y%m%d"));

        info!(
            "✅ EXPORT: Generated {} bytes of CSV as {}",
            csv_content.len(),
            filename
        );

        Ok(ExportDataResponse {
            csv_content,
            filename,
            record_count: records.len(),
        })
    }
}

use std::sync::Arc;

use anyhow::Result;
use calamine::Data;
use tracing::{error, info, warn};

use vbpl_core::domain::{DocStatus, DocType, DocumentRecord};
use vbpl_core::storage::Datastore;

use crate::pipeline::agencies::AgencyResolver;
use crate::pipeline::columns::locate_columns;
use crate::pipeline::normalize::normalize_row;
use crate::sheets::{SheetSpec, SHEET_MAP};
use crate::workbook::{header_texts, SheetSource};

/// Records per bulk-insert call.
pub const BATCH_SIZE: usize = 50;

/// Outcome of one sheet.
#[derive(Debug, Clone)]
pub struct SheetReport {
    pub sheet_name: String,
    pub doc_type: DocType,
    pub status: DocStatus,
    pub parsed: usize,
    pub inserted: usize,
}

/// Outcome of a whole run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub sheets: Vec<SheetReport>,
}

impl RunSummary {
    pub fn total_parsed(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.parsed).sum()
    }

    pub fn total_inserted(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.inserted).sum()
    }
}

/// Drives the import: reads each mapped sheet, normalizes its rows, resolves
/// drafting agencies and loads the records in batches.
///
/// A failed batch is logged and dropped; the run carries on with the next
/// batch so one bad payload cannot sink a whole workbook.
pub struct Importer {
    store: Arc<dyn Datastore>,
    agencies: AgencyResolver,
    year: i32,
    batch_size: usize,
}

impl Importer {
    pub fn new(store: Arc<dyn Datastore>, year: i32) -> Self {
        let agencies = AgencyResolver::new(store.clone());
        Self {
            store,
            agencies,
            year,
            batch_size: BATCH_SIZE,
        }
    }

    /// Overrides the insert batch size, floored at 1.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Imports every mapped sheet present in the source. Sheets missing
    /// from the file are skipped with a warning.
    pub async fn run(&mut self, source: &mut dyn SheetSource) -> Result<RunSummary> {
        let available = source.sheet_names();
        let mut summary = RunSummary::default();

        for spec in SHEET_MAP.iter() {
            if !available.iter().any(|name| name == spec.sheet_name) {
                warn!("Sheet not found, skipping: {}", spec.sheet_name);
                continue;
            }

            info!(
                "Importing sheet [{}] as {} / {}",
                spec.sheet_name, spec.doc_type, spec.status
            );
            let rows = source.sheet_rows(spec.sheet_name)?;
            let report = self.import_rows(&rows, spec).await?;
            summary.sheets.push(report);
        }

        Ok(summary)
    }

    /// Imports the rows of one sheet. The first row carries the headers, the
    /// second the count sub-headers; data starts at the third.
    pub async fn import_rows(&mut self, rows: &[Vec<Data>], spec: &SheetSpec) -> Result<SheetReport> {
        let mut report = SheetReport {
            sheet_name: spec.sheet_name.to_string(),
            doc_type: spec.doc_type,
            status: spec.status,
            parsed: 0,
            inserted: 0,
        };

        if rows.len() < 3 {
            warn!("Sheet [{}] has no data rows", spec.sheet_name);
            return Ok(report);
        }

        let headers = header_texts(&rows[0]);
        let columns = locate_columns(&headers);

        let mut records: Vec<DocumentRecord> = Vec::new();
        let mut seq = 0i64;
        for row in &rows[2..] {
            let parsed = match normalize_row(row, &columns, spec.doc_type, spec.status, &mut seq, self.year) {
                Some(parsed) => parsed,
                None => continue,
            };

            let mut record = parsed.record;
            if let Some(name) = parsed.agency_name.as_deref() {
                record.agency_id = self.agencies.resolve(name).await?;
            }
            records.push(record);
        }
        report.parsed = records.len();
        info!("Sheet [{}]: {} document groups parsed", spec.sheet_name, report.parsed);

        for (index, batch) in records.chunks(self.batch_size).enumerate() {
            let start = index * self.batch_size;
            match self.store.bulk_insert_documents(batch).await {
                Ok(inserted) => report.inserted += inserted.len(),
                Err(e) => {
                    error!(
                        "Batch {}-{} failed on sheet [{}]: {}",
                        start,
                        start + batch.len(),
                        spec.sheet_name,
                        e
                    );
                }
            }
        }

        info!("Sheet [{}]: {} records inserted", spec.sheet_name, report.inserted);
        Ok(report)
    }
}

//! Workbook access and the cell coercions the tracking sheets need.
//!
//! The sheets are hand-maintained, so cells arrive as whatever Excel decided
//! they were that day: counts as text, ordinals as floats, dates as either
//! serials or strings. Everything funnels through the helpers here.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};

pub struct Workbook {
    inner: Xlsx<BufReader<File>>,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let inner: Xlsx<_> = open_workbook(path)
            .with_context(|| format!("Failed to open workbook: {}", path.display()))?;
        Ok(Self { inner })
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    /// All rows of the named sheet as owned cells.
    pub fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<Data>>> {
        let range = self
            .inner
            .worksheet_range(name)
            .with_context(|| format!("Failed to read sheet: {}", name))?;
        Ok(range.rows().map(|row| row.to_vec()).collect())
    }
}

/// Where an import run reads its sheets from.
///
/// Production reads a [`Workbook`]; tests run against in-memory sheet tables.
pub trait SheetSource {
    /// Names of every sheet in the source.
    fn sheet_names(&self) -> Vec<String>;

    /// All rows of the named sheet as owned cells.
    fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<Data>>>;
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        Workbook::sheet_names(self)
    }

    fn sheet_rows(&mut self, name: &str) -> Result<Vec<Vec<Data>>> {
        Workbook::sheet_rows(self, name)
    }
}

/// Header row rendered as trimmed strings, empty cells as `""`.
pub fn header_texts(row: &[Data]) -> Vec<String> {
    row.iter().map(header_text).collect()
}

pub fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Text form of a cell, trimmed. Blank cells and the literal "None" left
/// behind by earlier tooling both normalize to `None`. Whole floats render
/// without the decimal point and date cells as `YYYY-MM-DD HH:MM:SS`.
pub fn cell_text(row: &[Data], col: Option<usize>) -> Option<String> {
    let raw = match row.get(col?)? {
        Data::Empty | Data::Error(_) => return None,
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "None" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Numeric cell floored at zero. Malformed and missing values coerce to 0 so
/// a stray annotation in a count column never sinks the row.
pub fn cell_count(row: &[Data], col: usize) -> i64 {
    let parsed = match row.get(col) {
        Some(Data::Int(i)) => Some(*i),
        Some(Data::Float(f)) => Some(*f as i64),
        Some(Data::String(s)) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    };
    parsed.unwrap_or(0).max(0)
}

/// The cell as an ordinal if it parses as a number (decimal text accepted,
/// truncated), `None` otherwise.
pub fn cell_ordinal(row: &[Data], col: Option<usize>) -> Option<i64> {
    match row.get(col?)? {
        Data::Int(i) => Some(*i),
        Data::Float(f) => Some(*f as i64),
        Data::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

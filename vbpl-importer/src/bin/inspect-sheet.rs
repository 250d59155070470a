use std::path::PathBuf;

use calamine::Data;
use clap::Parser;

use vbpl_importer::sheets::DEFAULT_WORKBOOK;
use vbpl_importer::workbook::{header_text, Workbook};

/// Dumps one sheet cell by cell: both header rows, then the leading data
/// rows with their raw cell values.
#[derive(Parser)]
#[command(name = "inspect-sheet")]
struct Args {
    /// Path to the tracking workbook (.xlsx)
    #[arg(long, default_value = DEFAULT_WORKBOOK)]
    file: PathBuf,
    /// Sheet to inspect
    #[arg(long, default_value = "NQ can xu ly")]
    sheet: String,
    /// Number of data rows to show
    #[arg(long, default_value_t = 4)]
    rows: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut workbook = Workbook::open(&args.file)?;
    let rows = workbook.sheet_rows(&args.sheet)?;

    println!("=== SHEET: {} ===", args.sheet);
    println!("Total rows: {}", rows.len());

    if let Some(row) = rows.first() {
        println!("\nHEADER ROW 1:");
        print_text_cells(row);
    }
    if let Some(row) = rows.get(1) {
        println!("\nHEADER ROW 2 (sub-header):");
        print_text_cells(row);
    }

    for (offset, row) in rows.iter().skip(2).take(args.rows).enumerate() {
        println!("\nDATA ROW {}:", offset + 3);
        for (index, cell) in row.iter().enumerate() {
            println!("  col[{}] = {}", index, truncate(&format!("{:?}", cell), 100));
        }
    }

    Ok(())
}

fn print_text_cells(row: &[Data]) {
    for (index, cell) in row.iter().enumerate() {
        let value = header_text(cell);
        if !value.is_empty() {
            println!("  col[{}] = {}", index, truncate(&value, 100));
        }
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

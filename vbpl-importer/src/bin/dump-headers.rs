use std::path::PathBuf;

use clap::Parser;

use vbpl_importer::sheets::DEFAULT_WORKBOOK;
use vbpl_importer::workbook::{header_text, Workbook};

/// Prints every sheet's header rows so the column keywords can be checked
/// against the real workbook.
#[derive(Parser)]
#[command(name = "dump-headers")]
struct Args {
    /// Path to the tracking workbook (.xlsx)
    #[arg(long, default_value = DEFAULT_WORKBOOK)]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut workbook = Workbook::open(&args.file)?;

    println!("Sheets: {:?}", workbook.sheet_names());

    for name in workbook.sheet_names() {
        let rows = workbook.sheet_rows(&name)?;
        println!("\n=== {} ===", name);

        if let Some(row) = rows.first() {
            for (index, cell) in row.iter().enumerate() {
                let value = header_text(cell);
                if !value.is_empty() {
                    println!("  R1-C{}: {:?}", index, truncate(&value, 80));
                }
            }
        }
        if let Some(row) = rows.get(1) {
            println!("  -- Row2 sub-headers --");
            for (index, cell) in row.iter().enumerate() {
                let value = header_text(cell);
                if !value.is_empty() {
                    println!("  R2-C{}: {:?}", index, truncate(&value, 80));
                }
            }
        }
    }

    Ok(())
}

fn truncate(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::info;

use vbpl_core::storage::SupabaseStore;
use vbpl_importer::observability::logging::init_logging;
use vbpl_importer::pipeline::driver::BATCH_SIZE;
use vbpl_importer::pipeline::Importer;
use vbpl_importer::sheets::{DEFAULT_WORKBOOK, DEFAULT_YEAR};
use vbpl_importer::workbook::Workbook;

#[derive(Parser)]
#[command(name = "vbpl-importer")]
#[command(about = "Imports the VBQPPL tracking workbook into Supabase")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import the tracking workbook into the datastore
    Import {
        /// Path to the tracking workbook (.xlsx)
        #[arg(long, default_value = DEFAULT_WORKBOOK)]
        file: PathBuf,
        /// Tracking year stamped on every record
        #[arg(long, default_value_t = DEFAULT_YEAR)]
        year: i32,
        /// Records per bulk-insert call
        #[arg(long, default_value_t = BATCH_SIZE)]
        batch_size: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env.local carries the Supabase credentials; .env is the fallback
    dotenv::from_filename(".env.local").ok();
    dotenv::dotenv().ok();

    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Import { file, year, batch_size } => {
            let store = Arc::new(SupabaseStore::from_env()?);
            info!("Starting import of {} for year {}", file.display(), year);

            let mut workbook = Workbook::open(&file)?;
            println!("📖 Workbook: {}", file.display());
            println!("   Sheets: {}", workbook.sheet_names().join(", "));

            let mut importer = Importer::new(store, year).with_batch_size(batch_size);
            let summary = importer.run(&mut workbook).await?;

            println!("\n📊 Import results:");
            for report in &summary.sheets {
                println!(
                    "   [{}] {} / {}: {} parsed, {} inserted",
                    report.sheet_name, report.doc_type, report.status, report.parsed, report.inserted
                );
            }
            println!(
                "\n✅ Imported {} of {} document groups",
                summary.total_inserted(),
                summary.total_parsed()
            );
        }
    }

    Ok(())
}

//! sheetsplit CLI - Convert cloud-stored CSV reports to multi-sheet workbooks
//!
//! # Main Commands
//!
//! ```bash
//! sheetsplit serve                  # Start HTTP server (port 3000)
//! sheetsplit process                # Run one batch against the bucket
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! sheetsplit convert input.csv      # Convert a local file, no storage needed
//! ```

use clap::{Parser, Subcommand};
use sheetsplit::{
    config::DEFAULT_GROUP_COLUMN, convert_file, run_batch, AppConfig, BlobStore,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetsplit")]
#[command(about = "Convert CSV reports into grouped multi-sheet Excel workbooks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides SHEETSPLIT_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Run one batch against the configured bucket and exit
    Process,

    /// Convert a local CSV file to a local xlsx file
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// Output xlsx file (default: input with .xlsx extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grouping column (default: the configured column)
        #[arg(short, long)]
        group_column: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,

        Commands::Process => cmd_process().await,

        Commands::Convert {
            input,
            output,
            group_column,
        } => cmd_convert(&input, output, group_column.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

async fn cmd_serve(port: Option<u16>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = port {
        config.port = port;
    }
    sheetsplit::server::start_server(config).await
}

async fn cmd_process() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    eprintln!(
        "📦 Processing bucket '{}': '{}' -> '{}'",
        config.bucket, config.input_prefix, config.output_prefix
    );

    let store = BlobStore::connect(config.bucket.as_str()).await?;
    let summary = run_batch(&store, &config.batch_options()).await?;

    eprintln!("\n✨ Done! {} file(s) converted", summary.files.len());
    for file in &summary.files {
        eprintln!(
            "   {} -> {} ({} sheets, {} rows)",
            file.source, file.destination, file.sheets, file.data_rows
        );
    }
    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<PathBuf>,
    group_column: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let group_column = group_column.unwrap_or(DEFAULT_GROUP_COLUMN);
    let output = output.unwrap_or_else(|| input.with_extension("xlsx"));

    eprintln!("📄 Converting: {}", input.display());
    let conversion = convert_file(input, &output, group_column)?;

    eprintln!("   Encoding: {}", conversion.csv_info.encoding);
    eprintln!(
        "   Delimiter: '{}'",
        match conversion.csv_info.delimiter {
            '\t' => "\\t".to_string(),
            c => c.to_string(),
        }
    );
    eprintln!("   Rows: {}", conversion.csv_info.row_count);
    eprintln!("   Sheets:");
    for sheet in &conversion.sheets {
        eprintln!("     {} ({} rows)", sheet.name, sheet.data_rows);
    }
    eprintln!("💾 Output written to: {}", output.display());

    Ok(())
}

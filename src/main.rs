//! Invoice Pager CLI
//!
//! Reads a pagination job as JSON and prints the resulting pages:
//!
//! ```text
//! echo '{"mode":"fixed","length":10,"perPage":3}' | invoice-pager
//! invoice-pager job.json --pretty
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use invoice_pager::{PaginationJob, PaginationResult};

#[derive(Debug, Parser)]
#[command(name = "invoice-pager", version, about = "Split invoice rows into pages")]
struct Cli {
    /// Job file; reads stdin when omitted or "-"
    file: Option<PathBuf>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_input(file: Option<&PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input = read_input(cli.file.as_ref())?;
    let job = PaginationJob::from_json(&input).context("invalid pagination job")?;
    let result = PaginationResult::from(job.run()?);
    log::info!("{} pages", result.page_count);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{output}");
    Ok(())
}

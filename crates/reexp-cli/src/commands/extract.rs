//! Extract command - read a forwarding record from one label.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use reexp_core::{LabelParser, RecordStore};

use super::{format_record, read_input, Context, OutputFormat};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// OCR text file of the label (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Add the extracted record to the store
    #[arg(long)]
    save: bool,
}

pub async fn run(args: ExtractArgs, ctx: &Context) -> anyhow::Result<()> {
    let start = Instant::now();

    let text = read_input(&args.input)?;
    info!("Extracting label from {}", args.input.display());

    let result = LabelParser::new()
        .parse(&text)
        .map_err(|e| anyhow::anyhow!("Could not extract, try again ({})", e))?;
    let record = result.record;

    let output = format_record(&record, args.format, ctx.config.output.pretty_json)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.save {
        let mut store = ctx.open_store();
        let id = store.add(record)?;
        eprintln!("{} Saved as record {}", style("✓").green(), id);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

//! Lookup and candidates commands - match a parcel to a forwarding order.

use std::path::PathBuf;

use chrono::Local;
use clap::Args;
use console::style;

use reexp_core::models::record::{days_until, display_date};
use reexp_core::{lookup, name_candidates, StoredRecord};

use super::{read_input, Context};

/// Arguments for the lookup command.
#[derive(Args)]
pub struct LookupArgs {
    /// OCR text of the parcel (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Print the hit as JSON
    #[arg(long)]
    json: bool,
}

/// Arguments for the candidates command.
#[derive(Args)]
pub struct CandidatesArgs {
    /// OCR text to scan (`-` for stdin)
    #[arg(required = true)]
    input: PathBuf,
}

pub async fn run(args: LookupArgs, ctx: &Context) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;
    let store = ctx.open_store();

    let Some(hit) = lookup(&store, &text)? else {
        println!("{} No forwarding order found", style("✗").red());
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hit)?);
        return Ok(());
    }

    println!(
        "{} {} record(s) for {} (after {} candidate(s))",
        style("✓").green(),
        hit.records.len(),
        style(&hit.candidate).bold(),
        hit.attempts
    );

    let today = Local::now().date_naive();
    for stored in &hit.records {
        println!("{}", describe(stored));
        if stored.expires_within(today, ctx.config.lookup.expiring_soon_days) {
            let left = days_until(&stored.record.end_date, today).unwrap_or_default();
            println!("    {}", style(format!("expires soon ({} day(s) left)", left)).yellow());
        } else if stored.is_expired(today) {
            println!("    {}", style("expired").red());
        }
    }

    Ok(())
}

pub async fn candidates(args: CandidatesArgs) -> anyhow::Result<()> {
    let text = read_input(&args.input)?;

    for candidate in name_candidates(&text) {
        println!("{}", candidate);
    }

    Ok(())
}

/// One-line summary of a stored record.
pub fn describe(stored: &StoredRecord) -> String {
    let record = &stored.record;
    format!(
        "#{} {} [{}] {} -> {} ({} - {})",
        stored.id,
        record.recipient_name,
        record.forwarding_type,
        record.old_address,
        record.new_address,
        display_date(&record.start_date),
        display_date(&record.end_date)
    )
}

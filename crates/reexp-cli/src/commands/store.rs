//! Store command - manage saved forwarding records.

use chrono::Local;
use clap::{Args, Subcommand};
use console::style;

use reexp_core::{ForwardingType, RecordDraft, RecordStore, StoreError, StoredRecord};

use super::lookup::describe;
use super::Context;

/// Arguments for the store command.
#[derive(Args)]
pub struct StoreArgs {
    #[command(subcommand)]
    command: StoreCommand,
}

#[derive(Subcommand)]
enum StoreCommand {
    /// List stored records
    List {
        /// Only records of this type (temporaire or definitive)
        #[arg(short = 't', long = "type", value_parser = parse_type)]
        kind: Option<ForwardingType>,
    },

    /// Search records by recipient name
    Search {
        /// Part of the recipient name, case-insensitive
        term: String,
    },

    /// Add a record by hand
    Add(AddArgs),

    /// Delete a record
    Delete {
        /// Record identifier
        id: u64,
    },

    /// Delete every record whose end date has passed
    Purge,

    /// List records ending soon
    Expiring {
        /// Window in days (default: lookup.expiring_soon_days)
        #[arg(short, long)]
        days: Option<i64>,
    },
}

#[derive(Args)]
struct AddArgs {
    /// Forwarding type (temporaire or definitive)
    #[arg(short = 't', long = "type", value_parser = parse_type)]
    kind: ForwardingType,

    /// Recipient name
    #[arg(long)]
    name: String,

    /// Old address
    #[arg(long)]
    old: String,

    /// New address
    #[arg(long)]
    new: String,

    /// Start date (YYYY-MM-DD)
    #[arg(long)]
    start: String,

    /// End date (YYYY-MM-DD)
    #[arg(long)]
    end: String,
}

fn parse_type(s: &str) -> Result<ForwardingType, String> {
    ForwardingType::from_str(s)
        .ok_or_else(|| format!("unknown forwarding type '{}' (temporaire or definitive)", s))
}

pub async fn run(args: StoreArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut store = ctx.open_store();
    let today = Local::now().date_naive();

    match args.command {
        StoreCommand::List { kind } => print_records(&store.filter_by_type(kind)?),
        StoreCommand::Search { term } => print_records(&store.search_by_name(&term)?),
        StoreCommand::Add(add) => {
            let draft = RecordDraft {
                forwarding_type: Some(add.kind),
                recipient_name: add.name,
                old_address: add.old,
                new_address: add.new,
                start_date: add.start,
                end_date: add.end,
            };
            let id = store.add(draft.into_record()?)?;
            println!("{} Added record {}", style("✓").green(), id);
        }
        StoreCommand::Delete { id } => {
            if !store.delete(id)? {
                return Err(StoreError::NotFound(id).into());
            }
            println!("{} Deleted record {}", style("✓").green(), id);
        }
        StoreCommand::Purge => {
            let removed = store.purge_expired(today)?;
            println!("{} Removed {} expired record(s)", style("✓").green(), removed);
        }
        StoreCommand::Expiring { days } => {
            let days = days.unwrap_or(ctx.config.lookup.expiring_soon_days);
            print_records(&store.expiring_within(today, days)?);
        }
    }

    Ok(())
}

fn print_records(records: &[StoredRecord]) {
    if records.is_empty() {
        println!("{} No records", style("ℹ").blue());
        return;
    }

    for stored in records {
        println!("{}", describe(stored));
    }
}

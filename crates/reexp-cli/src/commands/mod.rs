//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod lookup;
pub mod store;

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::debug;

use reexp_core::models::config::ReexpConfig;
use reexp_core::models::record::display_date;
use reexp_core::{ForwardingRecord, JsonFileStore};

/// Configuration and store location resolved from the global flags.
pub struct Context {
    pub config: ReexpConfig,
    pub store_path: PathBuf,
}

impl Context {
    /// Resolve the configuration file and the store path.
    ///
    /// An explicit `--config` must exist; otherwise the default config file
    /// is used when present. `--store` wins over the configured store path.
    pub fn load(config_path: Option<&Path>, store: Option<PathBuf>) -> anyhow::Result<Self> {
        let config = match config_path {
            Some(path) => ReexpConfig::from_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    ReexpConfig::from_file(&path)?
                } else {
                    ReexpConfig::default()
                }
            }
        };

        let store_path = store
            .or_else(|| config.store.path.clone())
            .unwrap_or_else(default_store_path);
        debug!("Using record store {}", store_path.display());

        Ok(Self { config, store_path })
    }

    pub fn open_store(&self) -> JsonFileStore {
        JsonFileStore::open(&self.store_path)
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reexp")
        .join("config.json")
}

pub fn default_store_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reexp")
        .join("records.json")
}

/// Read OCR text from a file, or from stdin when the path is `-`.
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }

    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    Ok(std::fs::read_to_string(path)?)
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

pub fn format_record(
    record: &ForwardingRecord,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json if pretty => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Json => Ok(serde_json::to_string(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

pub const CSV_HEADER: [&str; 6] = [
    "type",
    "recipient_name",
    "old_address",
    "new_address",
    "start_date",
    "end_date",
];

pub fn csv_fields(record: &ForwardingRecord) -> [&str; 6] {
    [
        record.forwarding_type.as_str(),
        &record.recipient_name,
        &record.old_address,
        &record.new_address,
        &record.start_date,
        &record.end_date,
    ]
}

fn format_csv(record: &ForwardingRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;
    wtr.write_record(csv_fields(record))?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(record: &ForwardingRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Type: {}\n", record.forwarding_type));
    output.push_str(&format!("Name: {}\n", record.recipient_name));
    output.push_str(&format!("Old address: {}\n", record.old_address));
    output.push_str(&format!("New address: {}\n", record.new_address));
    output.push_str(&format!(
        "Period: {} -> {}\n",
        display_date(&record.start_date),
        display_date(&record.end_date)
    ));

    output
}

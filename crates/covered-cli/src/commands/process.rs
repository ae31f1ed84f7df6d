//! Process command - import a single invoice file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use covered_core::invoice::{InvoiceParser, WoolworthsParser};
use covered_core::mapping::RowMapper;
use covered_core::models::config::CoveredConfig;
use covered_core::models::invoice::ParsedInvoice;
use covered_core::models::row::GroceryItemRow;
use covered_core::pdf::load_invoice_text;
use covered_core::store::SupabaseStore;

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF, or .txt with already extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Map rows but do not insert them
    #[arg(long)]
    dry_run: bool,
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
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    // Fail before any parsing work if rows cannot be attributed
    let user_id = config.require_user_id()?.to_string();

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading invoice...");
    pb.set_position(10);

    let (invoice, rows) = parse_and_map(&args.input, &user_id)?;
    pb.set_position(70);

    pb.finish_and_clear();

    eprintln!(
        "{} Invoice {} dated {} for {}",
        style("ℹ").blue(),
        invoice.meta.invoice_number.as_deref().unwrap_or("(unknown)"),
        invoice.meta.date.as_deref().unwrap_or("(unknown)"),
        invoice.meta.customer_name.as_deref().unwrap_or("(unknown)"),
    );
    eprintln!(
        "{} Found {} line items.",
        style("ℹ").blue(),
        invoice.items.len()
    );

    let output = format_rows(&invoice, &rows, args.format)?;

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

    if args.dry_run {
        eprintln!("{} Dry run - skipping DB insert.", style("ℹ").blue());
    } else {
        persist_rows(&config, &rows).await?;
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Load, parse and map one invoice file.
pub fn parse_and_map(
    path: &Path,
    user_id: &str,
) -> anyhow::Result<(ParsedInvoice, Vec<GroceryItemRow>)> {
    let raw = load_invoice_text(path)?;
    if raw.text.trim().is_empty() {
        warn!("{}: no text extracted", raw.file_path.display());
    }

    let result = WoolworthsParser::new().parse(&raw.text);
    for warning in &result.warnings {
        warn!("{}: {}", path.display(), warning);
    }

    let rows = RowMapper::new().map(&result.invoice, user_id);
    debug!(
        "Mapped {} rows in {}ms",
        rows.len(),
        result.processing_time_ms
    );

    Ok((result.invoice, rows))
}

/// Insert rows when store settings are present, otherwise warn and skip.
///
/// Returns the number of rows inserted.
pub async fn persist_rows(config: &CoveredConfig, rows: &[GroceryItemRow]) -> anyhow::Result<usize> {
    let Some(store) = SupabaseStore::from_config(&config.store) else {
        warn!("SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY missing - skipping DB insert.");
        eprintln!(
            "{} Supabase settings missing - skipping DB insert.",
            style("!").yellow()
        );
        return Ok(0);
    };

    info!("Attempting to insert rows into {}", store.table());
    let inserted = store.insert_rows(rows).await?;
    eprintln!(
        "{} Inserted {} rows into {}",
        style("✓").green(),
        inserted,
        store.table()
    );
    Ok(inserted)
}

pub fn format_rows(
    invoice: &ParsedInvoice,
    rows: &[GroceryItemRow],
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)?),
        OutputFormat::Csv => format_csv(rows),
        OutputFormat::Text => Ok(format_text(invoice, rows)),
    }
}

fn format_csv(rows: &[GroceryItemRow]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "user_id",
        "item_name",
        "category",
        "last_purchased",
        "price",
        "quantity",
        "unit",
        "source",
        "invoice_id",
    ])?;

    for row in rows {
        let price = row.price.to_string();
        let quantity = row.quantity.to_string();
        let invoice_id = row.invoice_id.map(|id| id.to_string()).unwrap_or_default();

        wtr.write_record([
            row.user_id.as_str(),
            row.item_name.as_str(),
            row.category.as_deref().unwrap_or(""),
            row.last_purchased.as_deref().unwrap_or(""),
            price.as_str(),
            quantity.as_str(),
            row.unit.as_str(),
            row.source.as_str(),
            invoice_id.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(invoice: &ParsedInvoice, rows: &[GroceryItemRow]) -> String {
    let mut output = String::new();
    let meta = &invoice.meta;

    output.push_str(&format!(
        "Invoice: {}\n",
        meta.invoice_number.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("Date: {}\n", meta.date.as_deref().unwrap_or("-")));
    output.push_str(&format!(
        "Customer: {}\n",
        meta.customer_name.as_deref().unwrap_or("-")
    ));
    output.push('\n');

    output.push_str("Items:\n");
    for (item, row) in invoice.items.iter().zip(rows) {
        output.push_str(&format!(
            "  {:>3}  {:<40} {:>3} x ${:<8} {}\n",
            item.line_number,
            row.item_name,
            row.quantity,
            row.price.to_string(),
            row.category.as_deref().unwrap_or("")
        ));
    }

    output
}

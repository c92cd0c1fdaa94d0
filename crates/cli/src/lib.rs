//! `fulfill`: run customer orders through a line of stock stations.
//!
//! The stock file lists one station per line, in line order:
//! `item|serial|quantity|description`. The order file lists one order per
//! line: `customer|product|item|item...`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;

use fulfill_core::{FromRecord, Tokenizer, DEFAULT_DELIMITER};
use fulfill_inventory::Stock;
use fulfill_line::{parse_records, report, AssemblyLine, LineSummary, ParsedRecord};
use fulfill_orders::{FillEntry, Order};
use fulfill_station::Station;

#[derive(Debug, Parser)]
#[command(
    name = "fulfill",
    about = "Run customer orders through a line of stock stations"
)]
pub struct Cli {
    /// Stock records, one station per line, in line order.
    #[arg(long, env = "FULFILL_STOCK")]
    pub stock: PathBuf,

    /// Customer order records, one order per line.
    #[arg(long, env = "FULFILL_ORDERS")]
    pub orders: PathBuf,

    /// Field delimiter used by both files.
    #[arg(long, env = "FULFILL_DELIMITER", default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Abort on the first malformed record instead of skipping it.
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Print a JSON summary instead of the text report.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

/// Settings for one run, independent of where the records came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub delimiter: char,
    pub strict: bool,
    pub json: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            strict: false,
            json: false,
        }
    }
}

impl From<&Cli> for RunOptions {
    fn from(cli: &Cli) -> Self {
        Self {
            delimiter: cli.delimiter,
            strict: cli.strict,
            json: cli.json,
        }
    }
}

/// Read both input files and run the line.
pub fn run(cli: &Cli, out: &mut dyn Write) -> Result<LineSummary> {
    let stock_text = std::fs::read_to_string(&cli.stock)
        .with_context(|| format!("reading stock file {}", cli.stock.display()))?;
    let orders_text = std::fs::read_to_string(&cli.orders)
        .with_context(|| format!("reading order file {}", cli.orders.display()))?;

    execute(&stock_text, &orders_text, &RunOptions::from(cli), out)
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: LineSummary,
    skipped_records: usize,
    log: &'a [FillEntry],
    completed: &'a [Order],
    incomplete: &'a [Order],
    stock: Vec<&'a Stock>,
}

/// Build stations and orders from record text, run them, and write the report.
pub fn execute(
    stock_text: &str,
    orders_text: &str,
    options: &RunOptions,
    out: &mut dyn Write,
) -> Result<LineSummary> {
    let tokenizer = Tokenizer::new(options.delimiter);

    let (stations, skipped_stock) =
        accept(parse_records::<Station>(stock_text, &tokenizer), "stock", options.strict)?;
    let (orders, skipped_orders) =
        accept(parse_records::<Order>(orders_text, &tokenizer), "order", options.strict)?;
    tracing::info!(
        stations = stations.len(),
        orders = orders.len(),
        skipped = skipped_stock + skipped_orders,
        "records loaded"
    );

    let mut line = AssemblyLine::new(stations)?;
    if !options.json {
        write_opening(out, &line, &orders)?;
    }
    line.load(orders);

    let mut log: Vec<FillEntry> = Vec::new();
    let summary = line.run(&mut log);

    if options.json {
        let report = JsonReport {
            summary,
            skipped_records: skipped_stock + skipped_orders,
            log: &log,
            completed: line.completed(),
            incomplete: line.incomplete(),
            stock: line.stations().iter().map(Station::stock).collect(),
        };
        serde_json::to_writer_pretty(&mut *out, &report).context("writing JSON report")?;
        writeln!(out)?;
    } else {
        write_closing(out, &line, &log)?;
    }

    Ok(summary)
}

/// Keep the records that parsed. Bad records are skipped with a warning, or
/// abort the run when `strict`.
fn accept<T: FromRecord>(
    records: Vec<ParsedRecord<T>>,
    kind: &str,
    strict: bool,
) -> Result<(Vec<T>, usize)> {
    let mut accepted = Vec::with_capacity(records.len());
    let mut skipped = 0;
    for record in records {
        match record.result {
            Ok(entity) => accepted.push(entity),
            Err(err) if strict => bail!("{kind} record on line {}: {err}", record.line),
            Err(err) => {
                tracing::warn!(kind, line = record.line, error = %err, "skipping record");
                skipped += 1;
            }
        }
    }
    Ok((accepted, skipped))
}

fn heading(out: &mut dyn Write, title: &str) -> std::io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

fn write_opening(out: &mut dyn Write, line: &AssemblyLine, orders: &[Order]) -> Result<()> {
    let width = report::field_width(line.stations().iter().map(Station::stock), orders);

    heading(out, "Stations")?;
    for station in line.stations() {
        writeln!(out, "{}", report::render_stock(station.stock(), width, true))?;
    }
    writeln!(out)?;

    heading(out, "Orders")?;
    for order in orders {
        writeln!(out, "{}", report::render_order(order, width, false))?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_closing(out: &mut dyn Write, line: &AssemblyLine, log: &[FillEntry]) -> Result<()> {
    let width = report::field_width(
        line.stations().iter().map(Station::stock),
        line.completed().iter().chain(line.incomplete()),
    );

    heading(out, "Fill log")?;
    for entry in log {
        writeln!(out, "{entry}")?;
    }
    writeln!(out)?;

    heading(out, "Completed orders")?;
    for order in line.completed() {
        writeln!(out, "{}", report::render_order(order, width, true))?;
    }
    writeln!(out)?;

    heading(out, "Incomplete orders")?;
    for order in line.incomplete() {
        writeln!(out, "{}", report::render_order(order, width, true))?;
    }
    writeln!(out)?;

    heading(out, "Stations after run")?;
    for station in line.stations() {
        writeln!(out, "{}", report::render_stock(station.stock(), width, true))?;
    }
    Ok(())
}

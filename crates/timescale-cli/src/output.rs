use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;
use timescale_types::{FileSummary, ImportOutcome, LatestValue, Page};

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Header row plus one record per item, written to stdout.
pub fn print_csv<T: Serialize>(items: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(std::io::stdout().lock());
    for item in items {
        writer.serialize(item)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn print_import(outcome: &ImportOutcome) {
    let color = use_color();
    let name = outcome.file_name.as_str();
    if color {
        println!(
            "{} {} rows from {}",
            "Imported".green().bold(),
            outcome.row_count,
            name.cyan()
        );
    } else {
        println!("Imported {} rows from {}", outcome.row_count, name);
    }
}

pub fn print_latest(file_name: &str, values: &[LatestValue]) -> Result<()> {
    let color = use_color();
    let mut out = std::io::stdout().lock();

    let title = format!("Latest values of {}", file_name);
    if color {
        writeln!(out, "{}", title.bold())?;
    } else {
        writeln!(out, "{}", title)?;
    }
    writeln!(out, "{:<22} {:>16} {:>16}", "DATE", "EXECUTION TIME", "VALUE")?;
    for value in values {
        writeln!(
            out,
            "{:<22} {:>16} {:>16}",
            format_date(&value.date),
            value.execution_time,
            value.value
        )?;
    }
    Ok(())
}

pub fn print_results(page: &Page<FileSummary>) -> Result<()> {
    let color = use_color();
    let mut out = std::io::stdout().lock();

    let heading = format!(
        "Page {} ({} per page), {} matching files",
        page.page, page.page_size, page.total
    );
    if color {
        writeln!(out, "{}", heading.bold())?;
    } else {
        writeln!(out, "{}", heading)?;
    }

    if page.items.is_empty() {
        writeln!(out, "No files on this page")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<32} {:<22} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "FILE", "MIN DATE", "DELTA (S)", "AVG EXEC", "AVG VALUE", "MEDIAN", "MIN", "MAX"
    )?;
    for summary in &page.items {
        writeln!(
            out,
            "{:<32} {:<22} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
            summary.file_name.as_str(),
            format_date(&summary.min_date),
            summary.delta_seconds,
            round(summary.avg_execution_time),
            round(summary.avg_value),
            summary.median_value,
            summary.min_value,
            summary.max_value
        )?;
    }
    Ok(())
}

fn use_color() -> bool {
    std::io::stdout().is_terminal()
}

fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn round(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}

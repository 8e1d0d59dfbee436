//! CSV report rendering
//!
//! The exporter only renders text; delivering it is the job of a
//! [`ReportSink`](super::ReportSink). The document is sectioned, so each
//! block is written by its own `csv::Writer` with the quoting that block
//! needs, all into one buffer.

use std::io::Write;

use chrono::{DateTime, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::aggregate::{calculate_stats, Stats};
use crate::common::{format_timestamp, Error, Result};
use crate::session::{Session, TestStatus};

/// A rendered report ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub file_name: String,
    pub contents: String,
}

impl Report {
    pub fn generate(session: &Session, generated_at: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            file_name: report_file_name(&session.config.change_number, &generated_at),
            contents: build_report(session, &generated_at)?,
        })
    }
}

/// `UAT_Report_<change>_<YYYY-MM-DD-HH-MM-SS>.csv`
pub fn report_file_name(change_number: &str, generated_at: &DateTime<Utc>) -> String {
    let stamp = format_timestamp(generated_at).replace([':', ' '], "-");
    let change: String = change_number
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("UAT_Report_{change}_{stamp}.csv")
}

/// Append `rows` to `out`, quoting per `style`
fn write_rows<R, F>(out: &mut Vec<u8>, style: QuoteStyle, rows: R) -> Result<()>
where
    R: IntoIterator<Item = Vec<F>>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .quote_style(style)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(out);
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn stats_row(label: &str, stats: &Stats) -> Vec<String> {
    vec![
        label.to_string(),
        stats.success.to_string(),
        stats.failure.to_string(),
        stats.skipped.to_string(),
        stats.total.to_string(),
    ]
}

/// Render the session as a sectioned CSV document
///
/// Header lines are quoted only when needed, data rows always, and
/// summary rows quote the label but not the counts.
pub fn build_report(session: &Session, generated_at: &DateTime<Utc>) -> Result<String> {
    let config = &session.config;
    let connection = config
        .connection_type
        .map(|c| c.to_string())
        .unwrap_or_default();

    let mut out = Vec::new();
    let header = [
        format!("UAT Report for Change {}", config.change_number),
        format!("Generated: {}", format_timestamp(generated_at)),
        format!("User: {}", config.username),
        format!("Computer: {}", config.hostname),
        format!("Connection Type: {}", connection),
    ];
    write_rows(&mut out, QuoteStyle::Necessary, header.into_iter().map(|l| vec![l]))?;

    out.write_all(b"\nWebsite Tests\nName,URL,Status,Notes\n")?;
    write_rows(
        &mut out,
        QuoteStyle::Always,
        session.website_tests().iter().map(|test| {
            vec![
                test.name.as_str(),
                test.url.as_str(),
                TestStatus::from(test.status).as_str(),
                test.notes.as_str(),
            ]
        }),
    )?;

    out.write_all(b"\nApplication Tests\nName,Description,Status,Notes\n")?;
    write_rows(
        &mut out,
        QuoteStyle::Always,
        session.app_tests().iter().map(|test| {
            vec![
                test.name.as_str(),
                test.description.as_str(),
                test.status.as_str(),
                test.notes.as_str(),
            ]
        }),
    )?;

    let website = calculate_stats(session.website_tests());
    let app = calculate_stats(session.app_tests());

    out.write_all(b"\nSummary\nCategory,Success,Failed,Skipped,Total\n")?;
    write_rows(
        &mut out,
        QuoteStyle::NonNumeric,
        [
            stats_row("Website Tests", &website),
            stats_row("Application Tests", &app),
            stats_row("Overall", &(website + app)),
        ],
    )?;

    out.write_all(b"\nComments:\n")?;
    write_rows(&mut out, QuoteStyle::Always, [vec![session.comments.as_str()]])?;

    String::from_utf8(out).map_err(|e| Error::Internal(format!("Report is not UTF-8: {}", e)))
}

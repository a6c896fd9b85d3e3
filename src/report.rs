use crate::extract::{AttendanceTable, DailySummary};
use serde_json::Error as SerdeJsonError;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] SerdeJsonError),
}

pub type ReportResult<T> = Result<T, ReportError>;

pub fn write_summary_csv<W: Write>(summary: &DailySummary, writer: W) -> ReportResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in &summary.rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_summary_csv<P: AsRef<Path>>(summary: &DailySummary, path: P) -> ReportResult<()> {
    write_summary_csv(summary, File::create(path)?)
}

pub fn save_summary_json<P: AsRef<Path>>(summary: &DailySummary, path: P) -> ReportResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, summary)?;
    Ok(())
}

/// Writes one line per train with `Y` under every date it was worked.
pub fn write_attendance_csv<W: Write>(table: &AttendanceTable, writer: W) -> ReportResult<()> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = vec!["train_number".to_string()];
    header.extend(table.dates.iter().map(|d| d.date.format("%Y-%m-%d").to_string()));
    writer.write_record(&header)?;

    for train in &table.trains {
        let mut record = vec![train.train_number.clone()];
        record.extend(table.dates.iter().map(|d| {
            if train.marks.get(&d.date).copied().unwrap_or(false) {
                "Y".to_string()
            } else {
                String::new()
            }
        }));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_attendance_csv<P: AsRef<Path>>(table: &AttendanceTable, path: P) -> ReportResult<()> {
    write_attendance_csv(table, File::create(path)?)
}

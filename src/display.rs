//! Tabular views over tasks and import results, built as polars frames so
//! they can be rendered, exported or inspected uniformly.

use crate::extract::{AttendanceTable, DailySummary, ExcelRow};
use crate::task::Task;
use chrono::NaiveDate;
use polars::prelude::*;

const CHECK_MARK: &str = "\u{2713}";

pub fn heavy_cleaning_frame<'a, I>(tasks: I, today: NaiveDate) -> PolarsResult<DataFrame>
where
    I: IntoIterator<Item = &'a Task>,
{
    let tasks: Vec<&Task> = tasks.into_iter().collect();

    let ids: Vec<u64> = tasks.iter().map(|t| t.id.0).collect();
    let trains: Vec<&str> = tasks.iter().map(|t| t.train_model.as_str()).collect();
    let scheduled: Vec<String> = tasks.iter().map(|t| t.scheduled_date.to_string()).collect();
    let types: Vec<&str> = tasks.iter().map(|t| t.cleaning_type.label()).collect();
    let statuses: Vec<&str> = tasks.iter().map(|t| t.clean_status.as_str()).collect();
    let cleaned: Vec<Option<String>> = tasks
        .iter()
        .map(|t| t.cleaned_date.map(|d| d.to_string()))
        .collect();
    let classes: Vec<&str> = tasks.iter().map(|t| t.classify(today).as_str()).collect();

    DataFrame::new(vec![
        Series::new("id".into(), ids).into_column(),
        Series::new("train_number".into(), trains).into_column(),
        Series::new("scheduled_date".into(), scheduled).into_column(),
        Series::new("cleaning_type".into(), types).into_column(),
        Series::new("clean_status".into(), statuses).into_column(),
        Series::new("cleaned_date".into(), cleaned).into_column(),
        Series::new("row_class".into(), classes).into_column(),
    ])
}

pub fn daily_summary_frame(summary: &DailySummary) -> PolarsResult<DataFrame> {
    let rows = summary.rows.as_slice();
    let trains: Vec<&str> = rows.iter().map(|r| r.train_number.as_str()).collect();

    DataFrame::new(vec![
        Series::new("train_number".into(), trains).into_column(),
        Series::new("w_count".into(), counts(rows, |r| r.w_count)).into_column(),
        Series::new("c_count".into(), counts(rows, |r| r.c_count)).into_column(),
        Series::new("s_count".into(), counts(rows, |r| r.s_count)).into_column(),
        Series::new("phd".into(), counts(rows, |r| r.phd_count)).into_column(),
        Series::new("tad".into(), counts(rows, |r| r.tad_count)).into_column(),
        Series::new("hhs".into(), counts(rows, |r| r.hhs_count)).into_column(),
    ])
}

/// One row per train, one column per date (a check mark where the train
/// was worked), followed by the train's W count from the summary.
pub fn attendance_frame(table: &AttendanceTable, summary: &DailySummary) -> PolarsResult<DataFrame> {
    let trains: Vec<&str> = table.trains.iter().map(|t| t.train_number.as_str()).collect();
    let mut columns = Vec::with_capacity(table.dates.len() + 2);
    columns.push(Series::new("train_number".into(), trains).into_column());

    for header in &table.dates {
        let marks: Vec<&str> = table
            .trains
            .iter()
            .map(|t| {
                if t.marks.get(&header.date).copied().unwrap_or(false) {
                    CHECK_MARK
                } else {
                    ""
                }
            })
            .collect();
        let name = header.date.format("%Y-%m-%d").to_string();
        columns.push(Series::new(name.into(), marks).into_column());
    }

    let w_counts: Vec<u32> = table
        .trains
        .iter()
        .map(|t| summary.find(&t.train_number).map_or(0, |r| r.w_count as u32))
        .collect();
    columns.push(Series::new("w_count".into(), w_counts).into_column());

    DataFrame::new(columns)
}

fn counts(rows: &[ExcelRow], field: impl Fn(&ExcelRow) -> usize) -> Vec<u32> {
    rows.iter().map(|r| field(r) as u32).collect()
}

fn cell_text(av: &AnyValue) -> String {
    match av {
        AnyValue::Null => String::new(),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        _ => av.to_string(),
    }
}

fn push_padded(out: &mut String, text: &str, width: usize) {
    out.push(' ');
    out.push_str(text);
    let pad = width.saturating_sub(text.chars().count());
    if pad > 0 {
        out.push_str(&" ".repeat(pad));
    }
    out.push_str(" |");
}

/// Renders a frame as a bordered plain-text table.
pub fn render_text_table(df: &DataFrame) -> String {
    let columns = df.get_columns();
    let names: Vec<String> = columns.iter().map(|c| c.name().to_string()).collect();

    let mut cells: Vec<Vec<String>> = Vec::with_capacity(df.height());
    for row_idx in 0..df.height() {
        let row = columns
            .iter()
            .map(|col| col.get(row_idx).map(|av| cell_text(&av)).unwrap_or_default())
            .collect();
        cells.push(row);
    }

    let mut widths: Vec<usize> = names.iter().map(|n| n.chars().count()).collect();
    for row in &cells {
        for (ci, text) in row.iter().enumerate() {
            widths[ci] = widths[ci].max(text.chars().count());
        }
    }

    let mut sep = String::from("+");
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    out.push('|');
    for (name, width) in names.iter().zip(&widths) {
        push_padded(&mut out, name, *width);
    }
    out.push('\n');
    out.push_str(&sep);
    out.push('\n');
    for row in &cells {
        out.push('|');
        for (text, width) in row.iter().zip(&widths) {
            push_padded(&mut out, text, *width);
        }
        out.push('\n');
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

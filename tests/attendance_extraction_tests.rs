use chrono::NaiveDate;
use cleaning_monitor::extract::collect_date_columns;
use cleaning_monitor::{
    CellValue, DailyCleaning, ExtractError, PresentationState, SheetGrid, SheetLayout, attendance,
};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn text(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

/// Template with three date columns whose header order is not chronological.
fn attendance_grid() -> SheetGrid {
    let mut grid = SheetGrid::default();
    grid.set(12, 7, text("2025-01-03"));
    grid.set(12, 8, text("2025-01-01"));
    grid.set(12, 9, CellValue::Date(d(2025, 1, 2)));

    grid.set(15, 1, text("T100"));
    grid.set(15, 7, text("W"));
    grid.set(15, 8, text("C"));
    grid.set(15, 9, text("W"));
    grid.set(16, 7, text("P"));

    grid.set(17, 1, text("T200"));
    grid.set(17, 8, text("W"));
    grid.set(17, 9, text("w"));
    grid.set(18, 0, CellValue::Empty);
    grid
}

#[test]
fn date_columns_are_sorted_by_date() {
    let table = attendance(&attendance_grid(), &SheetLayout::default()).unwrap();
    let dates: Vec<NaiveDate> = table.dates.iter().map(|c| c.date).collect();
    assert_eq!(dates, vec![d(2025, 1, 1), d(2025, 1, 2), d(2025, 1, 3)]);
    assert_eq!(table.dates[0].label, "2025-01-01");
    assert_eq!(table.dates[1].label, "2025-01-02");
}

#[test]
fn marks_record_exact_work_marker() {
    let table = attendance(&attendance_grid(), &SheetLayout::default()).unwrap();
    assert_eq!(table.len(), 2);

    assert!(table.is_marked("T100", d(2025, 1, 3)));
    assert!(table.is_marked("T100", d(2025, 1, 2)));
    assert!(!table.is_marked("T100", d(2025, 1, 1)));

    assert!(table.is_marked("T200", d(2025, 1, 1)));
    // lowercase marker does not count
    assert!(!table.is_marked("T200", d(2025, 1, 2)));
    assert!(!table.is_marked("T200", d(2025, 1, 3)));

    let marks = table.marks_for("T200").unwrap();
    assert_eq!(marks.len(), 3);
    assert!(table.marks_for("T999").is_none());
}

#[test]
fn trains_keep_sheet_order_and_later_duplicates_replace_marks() {
    let mut grid = attendance_grid();
    grid.set(19, 1, text("T100"));
    grid.set(19, 8, text("W"));

    let table = attendance(&grid, &SheetLayout::default()).unwrap();
    let trains: Vec<&str> = table.trains.iter().map(|t| t.train_number.as_str()).collect();
    assert_eq!(trains, vec!["T100", "T200"]);
    assert!(table.is_marked("T100", d(2025, 1, 1)));
    assert!(!table.is_marked("T100", d(2025, 1, 3)));
}

#[test]
fn serial_number_headers_are_dates() {
    let mut grid = SheetGrid::default();
    grid.set(12, 7, CellValue::Number(45660.0));
    grid.set(12, 8, CellValue::Number(45658.0));
    grid.set(15, 1, text("T1"));
    grid.set(15, 8, text("W"));

    let columns = collect_date_columns(&grid, &SheetLayout::default()).unwrap();
    let found: Vec<(usize, NaiveDate)> = columns.iter().map(|(col, h)| (*col, h.date)).collect();
    assert_eq!(found, vec![(8, d(2025, 1, 1)), (7, d(2025, 1, 3))]);

    let table = attendance(&grid, &SheetLayout::default()).unwrap();
    assert!(table.is_marked("T1", d(2025, 1, 1)));
}

#[test]
fn columns_before_first_date_column_are_ignored() {
    let mut grid = attendance_grid();
    grid.set(12, 3, text("Remarks"));
    let table = attendance(&grid, &SheetLayout::default()).unwrap();
    assert_eq!(table.dates.len(), 3);
}

#[test]
fn non_date_header_is_an_error() {
    let mut grid = attendance_grid();
    grid.set(12, 10, text("Total"));
    let err = attendance(&grid, &SheetLayout::default()).unwrap_err();
    assert_eq!(
        err,
        ExtractError::InvalidDateLabel {
            row: 12,
            column: 10,
            label: "Total".into()
        }
    );
}

#[test]
fn details_without_workbook_is_a_no_op() {
    let mut daily = DailyCleaning::default();
    let mut view = PresentationState::new(d(2025, 1, 5));

    let table = daily.show_details(&mut view).unwrap();
    assert!(table.is_empty());
    assert!(table.dates.is_empty());
    assert!(!view.show_attendance);
    assert!(view.show_summary);
}

#[test]
fn import_seeds_today_and_details_replace_it() {
    let today = d(2025, 1, 5);
    let mut daily = DailyCleaning::new(SheetLayout::default());
    let mut view = PresentationState::new(today);

    let summary = daily.import(attendance_grid(), today).unwrap();
    assert_eq!(summary.len(), 2);
    assert!(daily.has_workbook());
    assert!(daily.attendance().is_marked("T100", today));
    assert!(daily.attendance().is_marked("T200", today));
    assert_eq!(daily.attendance().dates.len(), 1);

    let table = daily.show_details(&mut view).unwrap();
    assert_eq!(table.dates.len(), 3);
    assert!(!table.is_marked("T100", today));
    assert!(view.show_attendance);
    assert!(!view.show_summary);

    daily.show_details(&mut view).unwrap();
    assert!(!view.show_attendance);
}

#[test]
fn failed_import_keeps_previous_workbook() {
    let today = d(2025, 1, 5);
    let mut daily = DailyCleaning::default();
    daily.import(attendance_grid(), today).unwrap();

    let short = SheetGrid::from_text_rows(vec![vec!["only"]; 3]);
    assert!(daily.import(short, today).is_err());
    assert_eq!(daily.summary().len(), 2);
    assert!(daily.has_workbook());
}

#[test]
fn huge_serial_header_is_an_invalid_label() {
    let mut grid = attendance_grid();
    grid.set(12, 7, CellValue::Number(1.0e12));
    let err = attendance(&grid, &SheetLayout::default()).unwrap_err();
    assert!(
        matches!(err, ExtractError::InvalidDateLabel { row: 12, column: 7, .. }),
        "{err:?}"
    );
}

#[test]
fn whitespace_header_cells_are_skipped() {
    let mut grid = attendance_grid();
    grid.set(12, 10, text("   "));
    let table = attendance(&grid, &SheetLayout::default()).unwrap();
    assert_eq!(table.dates.len(), 3);
}

use cleaning_monitor::extract::HeaderMarker;
use cleaning_monitor::{ExtractError, LayoutError, SheetGrid, SheetLayout, summarize};

/// Fifteen blank template rows followed by `records`.
fn template(records: Vec<Vec<&str>>) -> SheetGrid {
    let mut rows: Vec<Vec<&str>> = vec![Vec::new(); 15];
    rows.extend(records);
    SheetGrid::from_text_rows(rows)
}

#[test]
fn counts_each_marker_once_per_occurrence() {
    let grid = template(vec![
        vec!["", "A1", "B1", "C1", "W", "C", "S"],
        vec!["", "", "", "P", "T", "H", ""],
    ]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();

    assert_eq!(summary.len(), 1);
    let row = &summary.rows[0];
    assert_eq!(row.train_number, "A1");
    assert_eq!(
        (row.w_count, row.c_count, row.s_count),
        (1, 1, 1),
        "primary markers"
    );
    assert_eq!(
        (row.phd_count, row.tad_count, row.hhs_count),
        (1, 1, 1),
        "secondary markers"
    );
}

#[test]
fn counts_accumulate_across_date_columns() {
    let grid = template(vec![
        vec!["1", "T100", "", "", "", "", "", "W", "W", "WC", "", "S"],
        vec!["", "", "", "", "", "", "", "P", "", "PH", "T", ""],
        vec!["2", "T200", "", "", "", "", "", "", "C", "", "", ""],
        vec!["", "", "", "", "", "", "", "", "", "", "", ""],
    ]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();

    assert_eq!(summary.len(), 2);
    let first = summary.find("T100").unwrap();
    assert_eq!((first.w_count, first.c_count, first.s_count), (3, 1, 1));
    assert_eq!((first.phd_count, first.tad_count, first.hhs_count), (2, 1, 1));

    let second = summary.find("T200").unwrap();
    assert_eq!((second.w_count, second.c_count, second.s_count), (0, 1, 0));
    assert_eq!(second.phd_count + second.tad_count + second.hhs_count, 0);

    assert_eq!(
        summary.train_numbers.iter().cloned().collect::<Vec<_>>(),
        vec!["T100".to_string(), "T200".to_string()]
    );
}

#[test]
fn drops_records_with_blank_train_number() {
    let grid = template(vec![
        vec!["", "   ", "W"],
        vec!["", "", "P"],
        vec!["", "", "W"],
        vec!["", "", "T"],
        vec!["", "T7", "W"],
        vec!["", "", "H"],
    ]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary.rows[0].train_number, "T7");
    assert_eq!(summary.rows[0].hhs_count, 1);
}

#[test]
fn train_number_is_trimmed_and_duplicates_are_kept_as_rows() {
    let grid = template(vec![
        vec!["", " T5 ", "W"],
        vec![],
        vec!["", "T5", "C"],
        vec![],
    ]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();
    assert_eq!(summary.len(), 2);
    assert_eq!(summary.train_numbers.len(), 1);
    assert!(summary.train_numbers.contains("T5"));
}

#[test]
fn trailing_record_without_second_row_counts_zero_secondary_markers() {
    let grid = template(vec![vec!["", "T9", "W", "S"]]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();
    let row = &summary.rows[0];
    assert_eq!((row.w_count, row.s_count), (1, 1));
    assert_eq!(row.phd_count + row.tad_count + row.hhs_count, 0);
}

#[test]
fn sheet_without_data_rows_yields_empty_summary() {
    let grid = template(Vec::new());
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();
    assert!(summary.is_empty());
    assert!(summary.train_numbers.is_empty());
}

#[test]
fn too_few_rows_is_a_layout_error() {
    let grid = SheetGrid::from_text_rows(vec![vec!["x"]; 10]);
    let err = summarize(&grid, &SheetLayout::default()).unwrap_err();
    assert_eq!(
        err,
        ExtractError::Layout(LayoutError::TooFewRows {
            required: 15,
            found: 10
        })
    );
}

#[test]
fn missing_required_header_is_reported() {
    let layout = SheetLayout {
        required_headers: vec![HeaderMarker {
            row: 0,
            column: 0,
            text: "DAILY CLEANING RECORD".into(),
        }],
        ..SheetLayout::default()
    };

    let mut rows: Vec<Vec<&str>> = vec![vec!["Monthly Report"]];
    rows.extend(vec![Vec::new(); 16]);
    let grid = SheetGrid::from_text_rows(rows);

    match summarize(&grid, &layout) {
        Err(ExtractError::Layout(LayoutError::MissingHeader {
            row, column, found, ..
        })) => {
            assert_eq!((row, column), (0, 0));
            assert_eq!(found, "Monthly Report");
        }
        other => panic!("expected MissingHeader, got {other:?}"),
    }

    let mut rows: Vec<Vec<&str>> = vec![vec![" DAILY CLEANING RECORD "]];
    rows.extend(vec![Vec::new(); 16]);
    assert!(summarize(&SheetGrid::from_text_rows(rows), &layout).is_ok());
}

#[test]
fn custom_layout_moves_offsets() {
    let layout = SheetLayout {
        date_header_row: 0,
        first_data_row: 1,
        row_stride: 2,
        train_number_column: 0,
        ..SheetLayout::default()
    };
    let grid = SheetGrid::from_text_rows(vec![
        vec!["header"],
        vec!["X1", "W", "S"],
        vec!["", "T"],
    ]);
    let summary = summarize(&grid, &layout).unwrap();
    assert_eq!(summary.rows[0].train_number, "X1");
    assert_eq!(summary.rows[0].tad_count, 1);
}

#[test]
fn separated_markers_in_one_cell_all_count() {
    let grid = template(vec![
        vec!["", "T1", "", "", "", "", "", "W/C", "W,S"],
        vec!["", "", "", "", "", "", "", "P/T", ""],
    ]);
    let summary = summarize(&grid, &SheetLayout::default()).unwrap();
    let row = &summary.rows[0];
    assert_eq!((row.w_count, row.c_count, row.s_count), (2, 1, 1));
    assert_eq!((row.phd_count, row.tad_count, row.hhs_count), (1, 1, 0));
}

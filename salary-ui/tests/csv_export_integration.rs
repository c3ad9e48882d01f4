//! Writes exports to real files and reads them back with the csv crate.

use std::io::Cursor;

use salary_core::default_rates;
use salary_ui::csv_export::{self, ExportError};
use salary_ui::session::Session;
use salary_ui::state::AppState;
use salary_ui::theme::Palette;

#[test]
fn default_table_exports_one_record_per_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let rows = AppState::default().table_rows(default_rates());

    csv_export::write_to_path(&path, &rows).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(headers.len(), 20);
    assert_eq!(&headers[12], "national_pension_share");
    assert_eq!(records.len(), 67);
    // monthly gross is the annual level divided by 12, rounded to the won
    assert_eq!(&records[0][1], "833333");
    assert_eq!(&records[0][0], "9999996");
    assert_eq!(&records[66][1], "41666667");
}

#[test]
fn export_into_missing_directory_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("table.csv");

    let error = csv_export::write_to_path(&path, &[]).unwrap_err();

    assert!(matches!(error, ExportError::Create { .. }));
    assert!(error.to_string().contains("table.csv"));
}

#[test]
fn session_export_command_writes_custom_range() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("range.csv");
    let script = format!(
        "range min 20000000\nrange max 60000000\nrange steps 5\nrange on\nexport {}\n",
        path.display()
    );
    let mut session = Session::new(AppState::default(), default_rates(), Palette::plain());
    let mut output = Vec::new();

    session.run(Cursor::new(script), &mut output).unwrap();

    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("exported 5 rows"));
    let mut reader = csv::Reader::from_path(&path).unwrap();
    let monthly: Vec<String> = reader
        .records()
        .map(|record| record.unwrap()[1].to_string())
        .collect();
    assert_eq!(
        monthly,
        ["1666667", "2500000", "3333333", "4166667", "5000000"]
    );
}

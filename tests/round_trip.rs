use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;

use data_cleaner::export::{ensure_extension, export_table, ExportFormat, ExportOptions};
use data_cleaner::ingestion::{load_from_path, LoadOptions};
use data_cleaner::types::{DataType, Field, Schema, Table, Value};
use data_cleaner::CleanerError;

fn tmp_base(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir()
        .join(format!("data-cleaner-{name}-{nanos}"))
        .to_string_lossy()
        .into_owned()
}

fn sample_table() -> Table {
    let ts = NaiveDate::from_ymd_opt(2023, 11, 5)
        .unwrap()
        .and_hms_opt(8, 15, 30)
        .unwrap();
    let schema = Schema::new(vec![
        Field::new("id", DataType::Int64),
        Field::new("name", DataType::Utf8),
        Field::new("score", DataType::Float64),
        Field::new("active", DataType::Bool),
        Field::new("seen", DataType::Timestamp),
    ]);
    Table::new(
        schema,
        vec![
            vec![
                Value::Int64(1),
                Value::Utf8("Ada, Countess".to_string()),
                Value::Float64(98.5),
                Value::Bool(true),
                Value::Timestamp(ts),
            ],
            vec![
                Value::Int64(2),
                Value::Null,
                Value::Float64(3.0),
                Value::Bool(false),
                Value::Null,
            ],
            vec![
                Value::Null,
                Value::Utf8("Linus".to_string()),
                Value::Null,
                Value::Null,
                Value::Timestamp(ts),
            ],
        ],
    )
}

#[test]
fn csv_round_trip_preserves_names_rows_and_nulls() {
    let table = sample_table();
    let path = ensure_extension(&tmp_base("roundtrip"), ExportFormat::Csv);

    export_table(&table, &path, ExportFormat::Csv, &ExportOptions::default()).unwrap();
    let back = load_from_path(&path, &LoadOptions::default()).unwrap();

    assert_eq!(back.column_names(), table.column_names());
    assert_eq!(back.row_count(), table.row_count());

    // Numbers come back as numbers; timestamps come back as their text.
    assert_eq!(back.rows[0][0], Value::Int64(1));
    assert_eq!(back.rows[0][1], Value::Utf8("Ada, Countess".to_string()));
    assert_eq!(back.rows[1][2], Value::Float64(3.0));
    assert_eq!(back.rows[1][3], Value::Bool(false));
    assert_eq!(back.rows[0][4], Value::Utf8("2023-11-05 08:15:30".to_string()));

    for (orig_row, back_row) in table.rows.iter().zip(&back.rows) {
        for (orig, round) in orig_row.iter().zip(back_row) {
            assert_eq!(orig.is_null(), round.is_null());
            assert_eq!(orig.to_text(), round.to_text());
        }
    }

    let _ = std::fs::remove_file(&path);
}

#[test]
fn xlsx_round_trip_keeps_types() {
    let table = sample_table();
    let path = ensure_extension(&tmp_base("roundtrip"), ExportFormat::Xlsx);

    export_table(&table, &path, ExportFormat::Xlsx, &ExportOptions::default()).unwrap();
    let back = load_from_path(&path, &LoadOptions::default()).unwrap();

    assert_eq!(back.column_names(), table.column_names());
    assert_eq!(back.row_count(), 3);
    let types: Vec<DataType> = back.schema.fields.iter().map(|f| f.data_type).collect();
    assert_eq!(
        types,
        vec![
            DataType::Int64,
            DataType::Utf8,
            DataType::Float64,
            DataType::Bool,
            DataType::Timestamp
        ]
    );
    assert_eq!(back.rows, table.rows);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn xlsx_keeps_every_digit_of_large_integers() {
    let schema = Schema::new(vec![Field::new("big", DataType::Int64)]);
    let table = Table::new(
        schema,
        vec![
            vec![Value::Int64(9_007_199_254_740_993)],
            vec![Value::Int64(-9_007_199_254_740_993)],
        ],
    );
    let path = ensure_extension(&tmp_base("bigint"), ExportFormat::Xlsx);

    export_table(&table, &path, ExportFormat::Xlsx, &ExportOptions::default()).unwrap();
    let back = load_from_path(&path, &LoadOptions::default()).unwrap();

    assert_eq!(
        back.column("big").unwrap(),
        vec![
            &Value::Utf8("9007199254740993".to_string()),
            &Value::Utf8("-9007199254740993".to_string()),
        ]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn csv_keeps_large_integral_floats_as_floats() {
    let schema = Schema::new(vec![Field::new("f", DataType::Float64)]);
    let table = Table::new(
        schema,
        vec![vec![Value::Float64(1e16)], vec![Value::Float64(3e18)]],
    );
    let path = ensure_extension(&tmp_base("bigfloat"), ExportFormat::Csv);

    export_table(&table, &path, ExportFormat::Csv, &ExportOptions::default()).unwrap();
    let back = load_from_path(&path, &LoadOptions::default()).unwrap();

    assert_eq!(back.schema.fields[0].data_type, DataType::Float64);
    assert_eq!(back.rows, table.rows);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn export_to_missing_directory_is_a_write_error() {
    let table = sample_table();
    let path = std::env::temp_dir()
        .join("data-cleaner-missing-dir")
        .join("deeper")
        .join("out.xlsx");

    let err = export_table(&table, &path, ExportFormat::Xlsx, &ExportOptions::default())
        .unwrap_err();
    assert!(matches!(err, CleanerError::WriteError { .. }));
    assert!(err.to_string().contains("out.xlsx"));
}

#[test]
fn unknown_export_format_is_rejected() {
    let err = "pdf".parse::<ExportFormat>().unwrap_err();
    assert!(matches!(err, CleanerError::UnknownExportFormat { .. }));
}

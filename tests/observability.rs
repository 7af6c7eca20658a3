use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use data_cleaner::export::{export_table, ExportFormat, ExportOptions};
use data_cleaner::ingestion::{load_from_path, LoadOptions};
use data_cleaner::observability::{
    FileObserver, ObserverConfig, Operation, OperationContext, PipelineObserver, Severity,
    TableStats,
};
use data_cleaner::types::{DataType, Field, Schema, Table, Value};
use data_cleaner::CleanerError;

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(Operation, TableStats)>>,
    failures: Mutex<Vec<Severity>>,
    alerts: Mutex<Vec<Severity>>,
}

impl PipelineObserver for RecordingObserver {
    fn on_success(&self, ctx: &OperationContext, stats: TableStats) {
        self.successes.lock().unwrap().push((ctx.operation, stats));
    }

    fn on_failure(&self, _ctx: &OperationContext, severity: Severity, _error: &CleanerError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(&self, _ctx: &OperationContext, severity: Severity, _error: &CleanerError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn tmp_file(ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("data-cleaner-observer-{nanos}.{ext}"))
}

fn load_options(obs: &Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(ObserverConfig::new(obs.clone())),
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Missing file -> io error -> Critical
    let _ = load_from_path("tests/fixtures/does_not_exist.csv", &load_options(&obs)).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Critical]);
}

#[test]
fn observer_receives_failure_without_alert_for_non_critical_error() {
    let obs = Arc::new(RecordingObserver::default());

    // Unsupported extension -> Error severity (not Critical) -> should not alert
    let _ = load_from_path("tests/fixtures/people.txt", &load_options(&obs)).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![Severity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_success_for_load_and_export() {
    let obs = Arc::new(RecordingObserver::default());
    let table = load_from_path("tests/fixtures/people.csv", &load_options(&obs)).unwrap();

    let out = tmp_file("csv");
    let export_opts = ExportOptions {
        observer: Some(ObserverConfig::new(obs.clone())),
    };
    export_table(&table, &out, ExportFormat::Csv, &export_opts).unwrap();

    let stats = TableStats { rows: 4, columns: 4 };
    assert_eq!(
        obs.successes.lock().unwrap().clone(),
        vec![(Operation::Load, stats), (Operation::Export, stats)]
    );
    assert!(obs.failures.lock().unwrap().is_empty());

    let _ = std::fs::remove_file(&out);
}

#[test]
fn lowered_threshold_alerts_on_every_failure() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        observer: Some(ObserverConfig {
            observer: obs.clone(),
            alert_at_or_above: Severity::Error,
        }),
        ..Default::default()
    };

    let _ = load_from_path("notes.txt", &opts).unwrap_err();
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![Severity::Error]);
}

#[test]
fn file_observer_appends_export_failures() {
    let log_path = tmp_file("log");
    let opts = ExportOptions {
        observer: Some(ObserverConfig::new(Arc::new(FileObserver::new(&log_path)))),
    };
    let table = Table::new(
        Schema::new(vec![Field::new("a", DataType::Int64)]),
        vec![vec![Value::Int64(1)]],
    );

    let bad_target = std::env::temp_dir()
        .join("data-cleaner-no-such-dir")
        .join("nested")
        .join("out.csv");
    let err = export_table(&table, &bad_target, ExportFormat::Csv, &opts).unwrap_err();
    assert!(matches!(err, CleanerError::WriteError { .. }));

    let logged = std::fs::read_to_string(&log_path).unwrap();
    assert!(logged.contains("export fail severity=Critical format=csv"));
    assert!(logged.contains("export ALERT severity=Critical"));

    let _ = std::fs::remove_file(&log_path);
}

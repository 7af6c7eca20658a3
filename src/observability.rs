//! Observer hooks for file reads and writes.
//!
//! [`crate::ingestion::load`] and [`crate::export::export_table`] report every outcome to an
//! optional [`PipelineObserver`]. Failures are classified by [`Severity`]; failures at or above
//! the configured threshold are additionally raised through [`PipelineObserver::on_alert`].

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::CleanerError;
use crate::ingestion::FileFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (filesystem failures).
    Critical,
}

impl Severity {
    /// Classify a failure: filesystem problems are `Critical`, everything else is `Error`.
    pub fn for_error(err: &CleanerError) -> Self {
        match err {
            CleanerError::ReadError { source, .. } | CleanerError::WriteError { source, .. }
                if source.is_io() =>
            {
                Severity::Critical
            }
            _ => Severity::Error,
        }
    }
}

/// Which side of the pipeline touched the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Reading a file into a table.
    Load,
    /// Writing a table to a file.
    Export,
}

/// Context about a read or write attempt.
#[derive(Debug, Clone)]
pub struct OperationContext {
    /// Load or export.
    pub operation: Operation,
    /// The file path.
    pub path: PathBuf,
    /// File format, when it was known at the time of the failure.
    pub format: Option<FileFormat>,
}

/// Shape of the table that was read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableStats {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
}

/// Observer interface for load/export outcomes.
pub trait PipelineObserver: Send + Sync {
    /// Called when the operation succeeds.
    fn on_success(&self, _ctx: &OperationContext, _stats: TableStats) {}

    /// Called when the operation fails.
    fn on_failure(&self, _ctx: &OperationContext, _severity: Severity, _error: &CleanerError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Observer plus alert threshold, as carried by load and export options.
#[derive(Clone)]
pub struct ObserverConfig {
    /// Observer receiving callbacks.
    pub observer: Arc<dyn PipelineObserver>,
    /// Severity at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for ObserverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverConfig")
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish_non_exhaustive()
    }
}

impl ObserverConfig {
    /// Alert on `Critical` failures only.
    pub fn new(observer: Arc<dyn PipelineObserver>) -> Self {
        Self {
            observer,
            alert_at_or_above: Severity::Critical,
        }
    }

    /// Dispatch `result` to the observer.
    pub(crate) fn report<T>(
        &self,
        ctx: &OperationContext,
        result: &Result<T, CleanerError>,
        stats: impl FnOnce(&T) -> TableStats,
    ) {
        match result {
            Ok(value) => self.observer.on_success(ctx, stats(value)),
            Err(e) => {
                let sev = Severity::for_error(e);
                self.observer.on_failure(ctx, sev, e);
                if sev >= self.alert_at_or_above {
                    self.observer.on_alert(ctx, sev, e);
                }
            }
        }
    }
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn PipelineObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn PipelineObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl PipelineObserver for CompositeObserver {
    fn on_success(&self, ctx: &OperationContext, stats: TableStats) {
        for o in &self.observers {
            o.on_success(ctx, stats);
        }
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }
}

/// Forwards events to the [`log`] facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_success(&self, ctx: &OperationContext, stats: TableStats) {
        log::info!(
            "{:?} ok format={} path={} rows={} columns={}",
            ctx.operation,
            format_label(ctx.format),
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        log::warn!(
            "{:?} failed severity={severity:?} format={} path={} err={error}",
            ctx.operation,
            format_label(ctx.format),
            ctx.path.display()
        );
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        log::error!(
            "[ALERT] {:?} failed severity={severity:?} format={} path={} err={error}",
            ctx.operation,
            format_label(ctx.format),
            ctx.path.display()
        );
    }
}

/// Logs events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl PipelineObserver for StdErrObserver {
    fn on_success(&self, ctx: &OperationContext, stats: TableStats) {
        eprintln!(
            "[{}][ok] format={} path={} rows={}",
            op_label(ctx.operation),
            format_label(ctx.format),
            ctx.path.display(),
            stats.rows
        );
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        eprintln!(
            "[{}][{:?}] format={} path={} err={}",
            op_label(ctx.operation),
            severity,
            format_label(ctx.format),
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        eprintln!(
            "[ALERT][{}][{:?}] format={} path={} err={}",
            op_label(ctx.operation),
            severity,
            format_label(ctx.format),
            ctx.path.display(),
            error
        );
    }
}

/// Appends events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl PipelineObserver for FileObserver {
    fn on_success(&self, ctx: &OperationContext, stats: TableStats) {
        self.append_line(&format!(
            "{} {} ok format={} path={} rows={} columns={}",
            unix_ts(),
            op_label(ctx.operation),
            format_label(ctx.format),
            ctx.path.display(),
            stats.rows,
            stats.columns
        ));
    }

    fn on_failure(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        self.append_line(&format!(
            "{} {} fail severity={:?} format={} path={} err={}",
            unix_ts(),
            op_label(ctx.operation),
            severity,
            format_label(ctx.format),
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &OperationContext, severity: Severity, error: &CleanerError) {
        self.append_line(&format!(
            "{} {} ALERT severity={:?} format={} path={} err={}",
            unix_ts(),
            op_label(ctx.operation),
            severity,
            format_label(ctx.format),
            ctx.path.display(),
            error
        ));
    }
}

fn op_label(op: Operation) -> &'static str {
    match op {
        Operation::Load => "load",
        Operation::Export => "export",
    }
}

fn format_label(format: Option<FileFormat>) -> String {
    format.map_or_else(|| "unknown".to_string(), |f| f.to_string())
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

mod csv_export;
mod fs_utils;
mod xlsx;

pub use fs_utils::ensure_writable;

use crate::core::report::ReportRow;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use chrono::Local;
use std::path::Path;

/// Helper for export completion messages.
pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

#[derive(Clone, Copy, Debug)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    pub fn from_str(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(ExportFormat::Xlsx),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(AppError::InvalidExportFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Xlsx => "xlsx",
            ExportFormat::Csv => "csv",
        }
    }
}

/// Default report file name: relatorio_ponto_<timestamp>.<ext>
pub fn default_report_filename(format: ExportFormat) -> String {
    format!(
        "relatorio_ponto_{}.{}",
        Local::now().format("%Y%m%d_%H%M%S"),
        format.extension()
    )
}

/// Write the report rows to `path` in the requested format.
pub fn write_report(rows: &[ReportRow], format: ExportFormat, path: &Path) -> AppResult<()> {
    match format {
        ExportFormat::Xlsx => xlsx::export_xlsx(rows, path),
        ExportFormat::Csv => csv_export::export_csv(rows, path),
    }
}

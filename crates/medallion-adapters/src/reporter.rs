//! Escritura del reporte de calidad como JSON.
use std::fs;
use std::path::{Path, PathBuf};

use medallion_core::{PipelineError, QualityReport, ReportWriter};

/// Escribe `dq_status_<fecha>.json` bajo `reports_root`, pretty-printed y
/// con orden de claves estable. Sobreescribe (vía rename atómico) cualquier
/// reporte previo de la misma fecha: se supersede, nunca se mergea.
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    reports_root: PathBuf,
}

impl JsonReportWriter {
    pub fn new(reports_root: impl Into<PathBuf>) -> Self {
        Self { reports_root: reports_root.into() }
    }

    pub fn report_path(&self, report: &QualityReport) -> PathBuf {
        self.reports_root.join(QualityReport::file_name(report.run_date))
    }

    pub fn reports_root(&self) -> &Path {
        &self.reports_root
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, report: &QualityReport) -> Result<PathBuf, PipelineError> {
        fs::create_dir_all(&self.reports_root)
            .map_err(|e| PipelineError::Report(format!("no se pudo crear {}: {e}", self.reports_root.display())))?;
        let path = self.report_path(report);
        let json = serde_json::to_string_pretty(report).map_err(|e| PipelineError::Report(e.to_string()))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| PipelineError::Report(format!("no se pudo escribir {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path).map_err(|e| PipelineError::Report(format!("no se pudo publicar {}: {e}", path.display())))?;

        log::info!("reporte de calidad {} -> {}", report.run_date, path.display());
        Ok(path)
    }
}

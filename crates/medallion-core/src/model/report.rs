//! Reporte de calidad de datos, uno por fecha de ejecución.
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::check::{CheckResult, TransformResult};

/// Documento `dq_status_<fecha>.json`.
///
/// El orden de los campos acá ES el orden de claves del JSON (serde respeta
/// el orden de declaración), y `tests` preserva el orden en que el motor
/// produjo los checks. Se crea una vez por corrida y se sobreescribe entero
/// si la fecha se re-ejecuta; nunca se mergea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub run_date: NaiveDate,
    pub csv_path: String,
    pub passed: bool,
    pub tests: Vec<CheckResult>,
}

impl QualityReport {
    /// Construye el reporte desde el resultado de la validación. Incluye cada
    /// check exactamente una vez, en el orden recibido.
    pub fn build(run_date: NaiveDate, csv_path: &Path, result: &TransformResult) -> Self {
        Self { run_date,
               csv_path: csv_path.display().to_string(),
               passed: result.success,
               tests: result.results.clone() }
    }

    /// Nombre canónico del artefacto para una fecha.
    pub fn file_name(run_date: NaiveDate) -> String {
        format!("dq_status_{}.json", run_date.format("%Y-%m-%d"))
    }
}

//! Resultado estructurado de una invocación del motor de transformación.
//!
//! El motor se trata como caja negra: resuelve unidades de trabajo nombradas
//! contra la partición que recibe. Acá sólo se modela el contrato del
//! resultado: flag global + secuencia ordenada de resultados por unidad.
use serde::{Deserialize, Serialize};

/// Estado de un check individual, serializado en minúsculas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Fail,
    Error,
    Skipped,
}

impl CheckStatus {
    /// Mapea el status textual que reporta el motor. `success` (modo apply)
    /// cuenta como `Pass`; cualquier valor desconocido se trata como `Error`.
    pub fn from_engine_status(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "pass" | "success" => CheckStatus::Pass,
            "fail" => CheckStatus::Fail,
            "skipped" => CheckStatus::Skipped,
            _ => CheckStatus::Error,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Skipped)
    }
}

/// Resultado de una unidad de trabajo del motor (modelo o check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub execution_time: Option<f64>,
}

/// Resultado global de una invocación: flag de éxito + resultados en el
/// orden en que el motor los produjo. Ese orden se preserva de punta a punta
/// hasta el reporte.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformResult {
    pub success: bool,
    pub results: Vec<CheckResult>,
}

impl TransformResult {
    pub fn new(success: bool, results: Vec<CheckResult>) -> Self {
        Self { success, results }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_status_mapping_is_lenient() {
        assert_eq!(CheckStatus::from_engine_status("pass"), CheckStatus::Pass);
        assert_eq!(CheckStatus::from_engine_status("success"), CheckStatus::Pass);
        assert_eq!(CheckStatus::from_engine_status("Fail"), CheckStatus::Fail);
        assert_eq!(CheckStatus::from_engine_status("skipped"), CheckStatus::Skipped);
        assert_eq!(CheckStatus::from_engine_status("runtime error"), CheckStatus::Error);
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&CheckStatus::Pass).unwrap();
        assert_eq!(json, "\"pass\"");
    }
}

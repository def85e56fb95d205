//! Invocación de dbt por línea de comandos.
//!
//! dbt es caja negra: recibe la ruta de la partición como variable
//! (`silver_path`) y resuelve sus propios modelos y checks contra ella. Acá
//! sólo vive el contrato de invocación y la forma del resultado.
//!
//! Distinción clave:
//! - el proceso no se puede lanzar, o termina sin producir
//!   `target/run_results.json` -> `PipelineError::Engine` (motor
//!   inalcanzable, fatal para la corrida);
//! - el proceso corre y deja resultados con checks fallidos -> invocación
//!   completada con `success == false` (resultado de datos, no error).
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use medallion_core::{CheckResult, CheckStatus, PipelineError, TransformEngine, TransformResult};

use crate::config::PipelineConfig;

/// Modo de invocación: subcomando de dbt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbtMode {
    /// `dbt run`: ejecuta las transformaciones.
    Apply,
    /// `dbt test`: ejecuta los checks.
    Validate,
}

impl DbtMode {
    pub fn subcommand(&self) -> &'static str {
        match self {
            DbtMode::Apply => "run",
            DbtMode::Validate => "test",
        }
    }
}

pub struct DbtCli {
    executable: PathBuf,
    project_dir: PathBuf,
    profiles_dir: PathBuf,
}

impl DbtCli {
    pub fn new(executable: impl Into<PathBuf>, project_dir: impl Into<PathBuf>, profiles_dir: impl Into<PathBuf>) -> Self {
        Self { executable: executable.into(),
               project_dir: project_dir.into(),
               profiles_dir: profiles_dir.into() }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(&config.dbt_bin, &config.dbt_project_dir, &config.dbt_profiles_dir)
    }

    fn run_results_path(&self) -> PathBuf {
        self.project_dir.join("target").join("run_results.json")
    }

    pub fn invoke(&self, mode: DbtMode, silver_csv: &Path) -> Result<TransformResult, PipelineError> {
        let run_results = self.run_results_path();
        // un run_results.json viejo no debe confundirse con esta invocación
        let _ = fs::remove_file(&run_results);

        let vars = format!("{{silver_path: '{}'}}", silver_csv.display());
        let output = Command::new(&self.executable)
            .arg(mode.subcommand())
            .arg("--project-dir")
            .arg(&self.project_dir)
            .arg("--profiles-dir")
            .arg(&self.profiles_dir)
            .arg("--vars")
            .arg(&vars)
            .output()
            .map_err(|e| {
                PipelineError::Engine(format!("dbt {} no pudo ejecutarse ({}): {e}",
                                              mode.subcommand(),
                                              self.executable.display()))
            })?;

        if !run_results.exists() {
            return Err(PipelineError::Engine(format!("dbt {} terminó ({}) sin producir run_results.json",
                                                     mode.subcommand(),
                                                     output.status)));
        }

        let raw = fs::read_to_string(&run_results)
            .map_err(|e| PipelineError::Engine(format!("no se pudo leer run_results.json: {e}")))?;
        let parsed: RunResultsFile = serde_json::from_str(&raw)
            .map_err(|e| PipelineError::Engine(format!("run_results.json inválido: {e}")))?;

        let results: Vec<CheckResult> = parsed.results.into_iter().map(RunResultEntry::into_check).collect();
        let success = output.status.success() && results.iter().all(|c| c.status.is_ok());
        log::debug!("dbt {} sobre {}: success={} ({} unidades)",
                    mode.subcommand(),
                    silver_csv.display(),
                    success,
                    results.len());
        Ok(TransformResult::new(success, results))
    }
}

impl TransformEngine for DbtCli {
    fn apply(&self, silver_csv: &Path) -> Result<TransformResult, PipelineError> {
        self.invoke(DbtMode::Apply, silver_csv)
    }

    fn validate(&self, silver_csv: &Path) -> Result<TransformResult, PipelineError> {
        self.invoke(DbtMode::Validate, silver_csv)
    }
}

/// Forma mínima de `target/run_results.json` que necesitamos.
#[derive(Debug, Deserialize)]
struct RunResultsFile {
    #[serde(default)]
    results: Vec<RunResultEntry>,
}

#[derive(Debug, Deserialize)]
struct RunResultEntry {
    #[serde(default)]
    unique_id: Option<String>,
    #[serde(default)]
    status: String,
    #[serde(default)]
    execution_time: Option<f64>,
}

impl RunResultEntry {
    fn into_check(self) -> CheckResult {
        // `model.proyecto.stg_orders` -> `stg_orders`
        let name = self.unique_id
                       .as_deref()
                       .map(|id| id.rsplit('.').next().unwrap_or(id).to_string())
                       .unwrap_or_else(|| "unknown".to_string());
        CheckResult { name,
                      status: CheckStatus::from_engine_status(&self.status),
                      execution_time: self.execution_time }
    }
}

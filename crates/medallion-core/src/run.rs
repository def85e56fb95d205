//! Orquestación de una corrida diaria.
//!
//! Una corrida ejecuta las tres etapas estrictamente en orden, con handoff
//! sincrónico: ninguna etapa arranca antes de que la anterior termine. El
//! fallo de invocación de cualquier etapa corta la corrida (`Failed`) y no
//! produce reporte. La propiedad central: un fallo de infraestructura
//! (motor inalcanzable, I/O) NUNCA se confunde con un fallo de calidad de
//! datos (checks que fallan), que termina en `Completed` con el reporte
//! marcando `passed = false`.
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::errors::PipelineError;
use crate::event::{EventStore, RunEvent, RunEventKind};
use crate::model::{QualityReport, RunContext, TransformResult};
use crate::stage::{RunState, StageKind};
use crate::traits::{CleanOutcome, RecordCleaner, ReportWriter, TransformEngine};

/// Resultado de una corrida que llegó a `Completed`.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub execution_date: NaiveDate,
    pub state: RunState,
    pub silver_csv_path: PathBuf,
    pub report_path: PathBuf,
    /// Resultado de calidad de datos, no de salud del pipeline.
    pub passed: bool,
}

/// Orquestador de corridas para un juego fijo de colaboradores.
///
/// Corridas de fechas distintas no comparten estado mutable: cada artefacto
/// y cada secuencia de eventos está keyeada por su propia fecha, así que un
/// mismo `PipelineRun` puede ejecutar fechas distintas sin interferencia.
/// Re-ejecutar la misma fecha es seguro: cada etapa sobreescribe entero su
/// artefacto.
pub struct PipelineRun<C, E, W, S>
    where C: RecordCleaner,
          E: TransformEngine,
          W: ReportWriter,
          S: EventStore
{
    cleaner: C,
    engine: E,
    reporter: W,
    event_store: S,
}

impl<C, E, W, S> PipelineRun<C, E, W, S>
    where C: RecordCleaner,
          E: TransformEngine,
          W: ReportWriter,
          S: EventStore
{
    pub fn new(cleaner: C, engine: E, reporter: W, event_store: S) -> Self {
        Self { cleaner, engine, reporter, event_store }
    }

    pub fn event_store(&self) -> &S {
        &self.event_store
    }

    /// Eventos de una fecha, en orden de append.
    pub fn events(&self, execution_date: NaiveDate) -> Vec<RunEvent> {
        self.event_store.list(execution_date)
    }

    /// Garantiza el `RunInitialized` de la fecha (una sola vez).
    fn ensure_initialized(&mut self, execution_date: NaiveDate) {
        let has_init = self.event_store
                           .list(execution_date)
                           .iter()
                           .any(|e| matches!(e.kind, RunEventKind::RunInitialized { .. }));
        if !has_init {
            self.event_store.append_kind(execution_date,
                                         RunEventKind::RunInitialized { execution_date,
                                                                        stage_count: StageKind::COUNT });
        }
    }

    fn stage_started(&mut self, execution_date: NaiveDate, stage: StageKind) {
        self.event_store.append_kind(execution_date,
                                     RunEventKind::StageStarted { stage_index: stage.index(),
                                                                  stage_id: stage.id().to_string() });
    }

    fn stage_finished(&mut self, execution_date: NaiveDate, stage: StageKind, outputs: Vec<String>) {
        self.event_store.append_kind(execution_date,
                                     RunEventKind::StageFinished { stage_index: stage.index(),
                                                                   stage_id: stage.id().to_string(),
                                                                   outputs });
    }

    fn stage_failed(&mut self, execution_date: NaiveDate, stage: StageKind, error: &PipelineError) {
        self.event_store.append_kind(execution_date,
                                     RunEventKind::StageFailed { stage_index: stage.index(),
                                                                 stage_id: stage.id().to_string(),
                                                                 error: error.clone() });
    }

    /// Etapa 1 (`generate_silver`): limpia y particiona. Una partición vacía
    /// es éxito con cero filas.
    pub fn run_clean(&mut self, execution_date: NaiveDate) -> Result<CleanOutcome, PipelineError> {
        self.ensure_initialized(execution_date);
        self.stage_started(execution_date, StageKind::Clean);
        match self.cleaner.clean(execution_date) {
            Ok(outcome) => {
                self.stage_finished(execution_date,
                                    StageKind::Clean,
                                    vec![outcome.csv_path.display().to_string(), outcome.content_hash.clone()]);
                Ok(outcome)
            }
            Err(e) => {
                self.stage_failed(execution_date, StageKind::Clean, &e);
                Err(e)
            }
        }
    }

    /// Etapa 2 (`dbt_run`): modo apply. Acá un `success == false` del motor
    /// SÍ es fallo de etapa: las transformaciones no se aplicaron.
    pub fn run_apply(&mut self, execution_date: NaiveDate, silver_csv: &Path) -> Result<TransformResult, PipelineError> {
        self.ensure_initialized(execution_date);
        self.stage_started(execution_date, StageKind::Transform);
        let result = match self.engine.apply(silver_csv) {
            Ok(r) => r,
            Err(e) => {
                self.stage_failed(execution_date, StageKind::Transform, &e);
                return Err(e);
            }
        };
        if !result.success {
            let e = PipelineError::Engine("el motor reportó fallo global en modo apply".to_string());
            self.stage_failed(execution_date, StageKind::Transform, &e);
            return Err(e);
        }
        self.stage_finished(execution_date, StageKind::Transform, vec![]);
        Ok(result)
    }

    /// Etapa 3 (`dbt_test`): modo validate + reporte.
    ///
    /// Una invocación que completa con checks fallidos NO es fallo de etapa:
    /// el reporte se escribe igual, con `passed = false`. Sólo el error de
    /// invocación (o de escritura del reporte) corta la corrida sin reporte.
    pub fn run_validate_and_report(&mut self,
                                   execution_date: NaiveDate,
                                   silver_csv: &Path)
                                   -> Result<(PathBuf, TransformResult), PipelineError> {
        self.ensure_initialized(execution_date);
        self.stage_started(execution_date, StageKind::Validate);
        let result = match self.engine.validate(silver_csv) {
            Ok(r) => r,
            Err(e) => {
                self.stage_failed(execution_date, StageKind::Validate, &e);
                return Err(e);
            }
        };
        let report = QualityReport::build(execution_date, silver_csv, &result);
        let report_path = match self.reporter.write(&report) {
            Ok(p) => p,
            Err(e) => {
                self.stage_failed(execution_date, StageKind::Validate, &e);
                return Err(e);
            }
        };
        self.stage_finished(execution_date, StageKind::Validate, vec![report_path.display().to_string()]);
        Ok((report_path, result))
    }

    /// Corrida completa para una fecha: las tres etapas en orden.
    pub fn run(&mut self, execution_date: NaiveDate) -> Result<RunOutcome, PipelineError> {
        let mut ctx = RunContext::new(execution_date);
        self.ensure_initialized(execution_date);

        let cleaned = self.run_clean(execution_date)?;
        ctx.silver_csv_path = Some(cleaned.csv_path);

        // handoff explícito: las etapas 2 y 3 reciben la ruta como argumento
        let silver_csv = ctx.silver_csv_path
                            .clone()
                            .ok_or_else(|| PipelineError::Internal("silver path ausente del contexto".to_string()))?;

        self.run_apply(execution_date, &silver_csv)?;

        let (report_path, result) = self.run_validate_and_report(execution_date, &silver_csv)?;
        ctx.report_path = Some(report_path);

        self.event_store.append_kind(execution_date, RunEventKind::RunCompleted { passed: result.success });

        let report_path = ctx.report_path
                             .take()
                             .ok_or_else(|| PipelineError::Internal("ruta de reporte ausente del contexto".to_string()))?;
        Ok(RunOutcome { execution_date,
                        state: RunState::Completed,
                        silver_csv_path: silver_csv,
                        report_path,
                        passed: result.success })
    }
}

/// Reconstruye el estado de una corrida a partir de su secuencia de eventos
/// (replay lineal). Útil para inspección post-mortem del event log.
pub fn replay_state(events: &[RunEvent]) -> RunState {
    let mut state = RunState::Pending;
    for ev in events {
        state = match &ev.kind {
            RunEventKind::RunInitialized { .. } => state,
            RunEventKind::StageStarted { stage_index, .. } => match *stage_index {
                0 => RunState::CleaningInProgress,
                1 => RunState::TransformingInProgress,
                _ => RunState::ValidatingInProgress,
            },
            RunEventKind::StageFinished { stage_index, .. } => match *stage_index {
                0 => RunState::Cleaned,
                1 => RunState::Transformed,
                _ => RunState::ValidatingInProgress, // el cierre lo da RunCompleted
            },
            RunEventKind::StageFailed { .. } => return RunState::Failed,
            RunEventKind::RunCompleted { .. } => RunState::Completed,
        };
    }
    state
}

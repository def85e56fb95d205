//! medallion-core: orquestación determinista del pipeline diario de órdenes.
//!
//! Tres etapas fijas por fecha de ejecución (limpieza, apply, validación +
//! reporte) sobre capacidades inyectables. Este crate no toca el
//! filesystem ni procesos externos: eso vive en `medallion-adapters`.
pub mod errors;
pub mod event;
pub mod model;
pub mod run;
pub mod stage;
pub mod traits;

pub use errors::PipelineError;
pub use event::{EventStore, InMemoryEventStore, RunEvent, RunEventKind};
pub use model::{CheckResult, CheckStatus, QualityReport, RunContext, TransformResult};
pub use run::{replay_state, PipelineRun, RunOutcome};
pub use stage::{RunState, StageKind};
pub use traits::{CleanOutcome, RecordCleaner, ReportWriter, TransformEngine};

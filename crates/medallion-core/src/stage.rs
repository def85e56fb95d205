//! Etapas de una corrida y estado de la máquina de estados.

use serde::{Deserialize, Serialize};

/// Las tres etapas fijas de una corrida, en orden.
///
/// Los ids son estables y visibles para el scheduler externo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageKind {
    /// Limpieza y particionado del dataset crudo.
    Clean,
    /// Invocación del motor en modo apply (`dbt run`).
    Transform,
    /// Invocación del motor en modo validate (`dbt test`) + reporte.
    Validate,
}

impl StageKind {
    pub const COUNT: usize = 3;

    pub fn id(&self) -> &'static str {
        match self {
            StageKind::Clean => "generate_silver",
            StageKind::Transform => "dbt_run",
            StageKind::Validate => "dbt_test",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            StageKind::Clean => 0,
            StageKind::Transform => 1,
            StageKind::Validate => 2,
        }
    }
}

/// Estado de una corrida.
///
/// Las transiciones válidas son:
/// - `Pending` -> `CleaningInProgress`
/// - `CleaningInProgress` -> `Cleaned`
/// - `Cleaned` -> `TransformingInProgress`
/// - `TransformingInProgress` -> `Transformed`
/// - `Transformed` -> `ValidatingInProgress`
/// - `ValidatingInProgress` -> `Completed`
/// - cualquier estado in-progress -> `Failed`
///
/// `Failed` y `Completed` son absorbentes. Un fallo de invocación en
/// cualquier etapa lleva a `Failed`; una validación que termina con checks
/// fallidos NO: eso es un resultado de calidad de datos y la corrida llega a
/// `Completed` con el reporte marcando `passed = false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Pending,
    CleaningInProgress,
    Cleaned,
    TransformingInProgress,
    Transformed,
    ValidatingInProgress,
    Completed,
    Failed,
}

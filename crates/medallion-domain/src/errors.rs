use thiserror::Error;

/// Error del dominio de órdenes.
#[derive(Debug, Error)]
pub enum DomainError {
    /// El dataset crudo no trae una columna requerida.
    #[error("columna requerida ausente: {0}")]
    MissingColumn(String),

    #[error("error de validación: {0}")]
    ValidationError(String),
}

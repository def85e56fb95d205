//! medallion-domain: modelo de registros de órdenes y limpieza determinista.
//!
//! Este crate no toca el filesystem: recibe filas ya leídas, aplica el
//! algoritmo de limpieza y devuelve la partición resultante en memoria.
//! La lectura/escritura CSV vive en `medallion-adapters`.
pub mod clean;
pub mod errors;
pub mod record;

pub use clean::{clean_records, CleanBatch, CleanStats};
pub use errors::DomainError;
pub use record::{normalize_status, parse_order_date, CleanRecord, DropReason, RawRecord, RecordSchema, ALLOWED_STATUSES};

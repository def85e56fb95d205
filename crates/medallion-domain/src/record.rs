//! Esquema y registros del dataset crudo de órdenes.
//!
//! El dataset es tabular (CSV) con al menos las columnas `id`, `user_id`,
//! `order_date` y `status`; cualquier columna adicional se conserva sin
//! modificar en las filas que sobreviven la limpieza.
use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

use crate::errors::DomainError;

pub const COL_ID: &str = "id";
pub const COL_USER_ID: &str = "user_id";
pub const COL_ORDER_DATE: &str = "order_date";
pub const COL_STATUS: &str = "status";

/// Conjunto cerrado de status permitidos (ya normalizados).
pub static ALLOWED_STATUSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from(["placed", "shipped", "completed", "return_pending", "returned"])
});

/// Formatos de fecha aceptados para `order_date`. Cualquier otro formato se
/// trata como fecha no parseable y la fila se descarta.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Normaliza un status crudo: recorta espacios y pasa a minúsculas.
pub fn normalize_status(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Intenta parsear `order_date`. Devuelve `None` si el valor no coincide con
/// ninguno de los formatos aceptados.
pub fn parse_order_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Mapa de columnas del dataset crudo.
///
/// Mantiene el header completo para que las columnas extra pasen intactas al
/// artefacto Silver. La construcción falla si falta una columna requerida
/// (error de entrada, no de fila).
#[derive(Debug, Clone)]
pub struct RecordSchema {
    headers: Vec<String>,
    id_idx: usize,
    user_id_idx: usize,
    order_date_idx: usize,
    status_idx: usize,
}

impl RecordSchema {
    pub fn from_headers(headers: &[String]) -> Result<Self, DomainError> {
        let find = |name: &str| -> Result<usize, DomainError> {
            headers.iter()
                   .position(|h| h == name)
                   .ok_or_else(|| DomainError::MissingColumn(name.to_string()))
        };
        // una columna requerida repetida vuelve ambiguo el mapeo
        for name in [COL_ID, COL_USER_ID, COL_ORDER_DATE, COL_STATUS] {
            if headers.iter().filter(|h| *h == name).count() > 1 {
                return Err(DomainError::ValidationError(format!("columna requerida duplicada: {name}")));
            }
        }
        Ok(Self { headers: headers.to_vec(),
                  id_idx: find(COL_ID)?,
                  user_id_idx: find(COL_USER_ID)?,
                  order_date_idx: find(COL_ORDER_DATE)?,
                  status_idx: find(COL_STATUS)? })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub(crate) fn id_idx(&self) -> usize {
        self.id_idx
    }

    pub(crate) fn user_id_idx(&self) -> usize {
        self.user_id_idx
    }

    pub(crate) fn order_date_idx(&self) -> usize {
        self.order_date_idx
    }

    pub(crate) fn status_idx(&self) -> usize {
        self.status_idx
    }
}

/// Una fila cruda, con las celdas alineadas al header del esquema.
#[derive(Debug, Clone)]
pub struct RawRecord {
    cells: Vec<String>,
}

impl RawRecord {
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Celda por índice; celdas vacías o de puro whitespace cuentan como
    /// valor faltante.
    pub(crate) fn cell(&self, idx: usize) -> Option<&str> {
        self.cells
            .get(idx)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
    }

    pub(crate) fn into_cells(self) -> Vec<String> {
        self.cells
    }
}

/// Motivo de descarte de una fila individual. Las filas descartadas se
/// excluyen en silencio del artefacto; el motivo sólo alimenta conteos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Campo requerido faltante o `order_date` no parseable.
    Incomplete,
    /// Status normalizado fuera del conjunto permitido.
    DisallowedStatus,
}

/// Una fila que pasó la validación: fecha parseada, status normalizado y
/// campos requeridos presentes.
///
/// Conserva la fila completa con `order_date` re-renderizada en ISO y
/// `status` normalizado, de modo que la partición escrita mantenga el
/// esquema del dataset crudo.
#[derive(Debug, Clone)]
pub struct CleanRecord {
    pub id: String,
    pub user_id: String,
    pub order_date: NaiveDate,
    pub status: String,
    cells: Vec<String>,
}

impl CleanRecord {
    /// Valida una fila cruda contra el esquema.
    pub fn from_raw(schema: &RecordSchema, raw: RawRecord) -> Result<CleanRecord, DropReason> {
        let id = raw.cell(schema.id_idx()).ok_or(DropReason::Incomplete)?.to_string();
        let user_id = raw.cell(schema.user_id_idx()).ok_or(DropReason::Incomplete)?.to_string();
        let order_date = raw.cell(schema.order_date_idx())
                            .and_then(parse_order_date)
                            .ok_or(DropReason::Incomplete)?;
        let status = normalize_status(raw.cell(schema.status_idx()).ok_or(DropReason::Incomplete)?);
        if !ALLOWED_STATUSES.contains(status.as_str()) {
            return Err(DropReason::DisallowedStatus);
        }

        let mut cells = raw.into_cells();
        cells[schema.order_date_idx()] = order_date.format("%Y-%m-%d").to_string();
        cells[schema.status_idx()] = status.clone();
        Ok(CleanRecord { id, user_id, order_date, status, cells })
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> RecordSchema {
        let headers: Vec<String> = ["id", "user_id", "order_date", "status"].iter()
                                                                            .map(|s| s.to_string())
                                                                            .collect();
        RecordSchema::from_headers(&headers).unwrap()
    }

    #[test]
    fn schema_rejects_missing_required_column() {
        let headers: Vec<String> = ["id", "user_id", "status"].iter().map(|s| s.to_string()).collect();
        let err = RecordSchema::from_headers(&headers).unwrap_err();
        assert!(matches!(err, DomainError::MissingColumn(ref c) if c == "order_date"));
    }

    #[test]
    fn schema_rejects_duplicated_required_column() {
        let headers: Vec<String> = ["id", "user_id", "order_date", "status", "id"].iter()
                                                                                  .map(|s| s.to_string())
                                                                                  .collect();
        let err = RecordSchema::from_headers(&headers).unwrap_err();
        assert!(matches!(err, DomainError::ValidationError(_)));
    }

    #[test]
    fn status_is_trimmed_and_lowercased() {
        let rec = RawRecord::new(vec!["1".into(), "u1".into(), "2024-01-05".into(), " Placed ".into()]);
        let clean = CleanRecord::from_raw(&schema(), rec).expect("row should survive");
        assert_eq!(clean.status, "placed");
        assert_eq!(clean.cells()[3], "placed");
    }

    #[test]
    fn disallowed_status_is_dropped() {
        let rec = RawRecord::new(vec!["1".into(), "u1".into(), "2024-01-05".into(), "cancelled".into()]);
        assert!(CleanRecord::from_raw(&schema(), rec).is_err());
    }

    #[test]
    fn unparseable_date_is_dropped() {
        let rec = RawRecord::new(vec!["1".into(), "u1".into(), "not-a-date".into(), "placed".into()]);
        assert!(CleanRecord::from_raw(&schema(), rec).is_err());
    }

    #[test]
    fn datetime_values_keep_only_the_date() {
        let rec = RawRecord::new(vec!["1".into(), "u1".into(), "2024-01-05 13:45:00".into(), "placed".into()]);
        let clean = CleanRecord::from_raw(&schema(), rec).unwrap();
        assert_eq!(clean.order_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(clean.cells()[2], "2024-01-05");
    }

    #[test]
    fn empty_required_cell_counts_as_missing() {
        let rec = RawRecord::new(vec!["1".into(), "  ".into(), "2024-01-05".into(), "placed".into()]);
        assert!(CleanRecord::from_raw(&schema(), rec).is_err());
    }
}

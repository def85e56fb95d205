//! Algoritmo puro de limpieza y particionado.
//!
//! Invariantes:
//! - Determinista: el mismo dataset y la misma fecha producen exactamente la
//!   misma partición, sin importar el orden de las filas de entrada.
//! - La deduplicación por `id` se aplica DESPUÉS del orden estable por
//!   `order_date` ascendente, de modo que "gana la primera ocurrencia"
//!   siempre significa la de fecha más temprana.
//! - Una partición vacía es un resultado válido, no un error.
use std::collections::HashSet;

use chrono::NaiveDate;

use crate::record::{CleanRecord, DropReason, RawRecord, RecordSchema};

/// Conteos de filas descartadas/filtradas durante una limpieza.
///
/// Diagnóstico, no afecta la corrección: las filas inválidas se excluyen en
/// silencio del artefacto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CleanStats {
    /// Filas con campo requerido faltante o fecha no parseable.
    pub dropped_incomplete: usize,
    /// Filas con status fuera del conjunto permitido.
    pub dropped_status: usize,
    /// Filas duplicadas por `id` (se conservó la de fecha más temprana).
    pub dropped_duplicate: usize,
    /// Filas válidas pero de otra fecha de ejecución.
    pub filtered_other_date: usize,
    /// Filas que quedaron en la partición.
    pub kept: usize,
}

impl CleanStats {
    pub fn total_dropped(&self) -> usize {
        self.dropped_incomplete + self.dropped_status + self.dropped_duplicate
    }
}

/// Resultado del algoritmo: partición ordenada + conteos.
#[derive(Debug, Clone)]
pub struct CleanBatch {
    pub records: Vec<CleanRecord>,
    pub stats: CleanStats,
}

/// Limpia el dataset crudo y lo filtra a la fecha de ejecución.
///
/// Pasos, en orden estricto:
/// 1. validar cada fila (campos requeridos presentes, `order_date`
///    parseable, status normalizado dentro del conjunto permitido);
/// 2. ordenar el conjunto completo por `order_date` ascendente (orden
///    estable);
/// 3. deduplicar por `id` conservando la primera ocurrencia;
/// 4. filtrar a `order_date == execution_date`.
///
/// El filtro por fecha va al final: un duplicado de fecha más temprana
/// elimina al de fecha posterior aunque la corrida sea para la fecha
/// posterior.
pub fn clean_records(schema: &RecordSchema, rows: Vec<RawRecord>, execution_date: NaiveDate) -> CleanBatch {
    let mut stats = CleanStats::default();

    let mut valid: Vec<CleanRecord> = Vec::with_capacity(rows.len());
    for raw in rows {
        match CleanRecord::from_raw(schema, raw) {
            Ok(rec) => valid.push(rec),
            Err(DropReason::Incomplete) => stats.dropped_incomplete += 1,
            Err(DropReason::DisallowedStatus) => stats.dropped_status += 1,
        }
    }

    // sort estable: entre fechas iguales se respeta el orden de entrada
    valid.sort_by_key(|r| r.order_date);

    let mut seen: HashSet<String> = HashSet::with_capacity(valid.len());
    let mut deduped: Vec<CleanRecord> = Vec::with_capacity(valid.len());
    for rec in valid {
        if seen.insert(rec.id.clone()) {
            deduped.push(rec);
        } else {
            stats.dropped_duplicate += 1;
        }
    }

    let records: Vec<CleanRecord> = deduped.into_iter()
                                           .filter(|r| {
                                               if r.order_date == execution_date {
                                                   true
                                               } else {
                                                   stats.filtered_other_date += 1;
                                                   false
                                               }
                                           })
                                           .collect();
    stats.kept = records.len();

    CleanBatch { records, stats }
}

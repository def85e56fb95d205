//! Limpieza CSV: implementación concreta de `RecordCleaner`.
//!
//! - Fallos a nivel contenedor (archivo inexistente, CSV malformado, columna
//!   requerida ausente) son `PipelineError::RawInput` y cortan la etapa.
//! - Filas inválidas se descartan en silencio; sólo se loguean conteos.
//! - La escritura es temp-file + rename: en la ruta canónica nunca queda un
//!   artefacto a medio escribir.
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use medallion_core::{CleanOutcome, PipelineError, RecordCleaner};
use medallion_domain::{clean_records, CleanBatch, RawRecord, RecordSchema};

use crate::partition::PartitionStore;

pub struct CsvCleaner {
    raw_path: PathBuf,
    store: PartitionStore,
}

impl CsvCleaner {
    pub fn new(raw_path: impl Into<PathBuf>, store: PartitionStore) -> Self {
        Self { raw_path: raw_path.into(), store }
    }

    fn read_raw(&self) -> Result<(RecordSchema, Vec<RawRecord>), PipelineError> {
        let mut reader = csv::Reader::from_path(&self.raw_path).map_err(|e| {
                             PipelineError::RawInput(format!("no se pudo leer {}: {e}", self.raw_path.display()))
                         })?;
        let headers: Vec<String> = reader.headers()
                                         .map_err(|e| PipelineError::RawInput(format!("header inválido: {e}")))?
                                         .iter()
                                         .map(str::to_string)
                                         .collect();
        let schema = RecordSchema::from_headers(&headers).map_err(|e| PipelineError::RawInput(e.to_string()))?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| PipelineError::RawInput(format!("fila malformada: {e}")))?;
            rows.push(RawRecord::new(record.iter().map(str::to_string).collect()));
        }
        Ok((schema, rows))
    }

    fn write_partition(&self, schema: &RecordSchema, batch: &CleanBatch, execution_date: NaiveDate)
                       -> Result<(PathBuf, String), PipelineError> {
        let dir = self.store
                      .ensure(execution_date)
                      .map_err(|e| PipelineError::Clean(format!("no se pudo crear el directorio de la partición: {e}")))?;
        let final_path = self.store.partition_path(execution_date);
        let tmp_path = dir.join(format!(".orders_clean_{}.csv.tmp", execution_date.format("%Y-%m-%d")));

        // si la escritura o la publicación fallan, el temporal no debe quedar
        let content_hash = match Self::write_rows(&tmp_path, schema, batch) {
            Ok(hash) => hash,
            Err(e) => {
                let _ = fs::remove_file(&tmp_path);
                return Err(e);
            }
        };
        if let Err(e) = fs::rename(&tmp_path, &final_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(PipelineError::Clean(format!("no se pudo publicar {}: {e}", final_path.display())));
        }
        Ok((final_path, content_hash))
    }

    fn write_rows(tmp_path: &Path, schema: &RecordSchema, batch: &CleanBatch) -> Result<String, PipelineError> {
        {
            let mut writer = csv::Writer::from_path(tmp_path).map_err(|e| {
                                 PipelineError::Clean(format!("no se pudo escribir {}: {e}", tmp_path.display()))
                             })?;
            writer.write_record(schema.headers())
                  .map_err(|e| PipelineError::Clean(e.to_string()))?;
            for rec in &batch.records {
                writer.write_record(rec.cells())
                      .map_err(|e| PipelineError::Clean(e.to_string()))?;
            }
            writer.flush().map_err(|e| PipelineError::Clean(e.to_string()))?;
        }
        let bytes = fs::read(tmp_path).map_err(|e| PipelineError::Clean(e.to_string()))?;
        Ok(format!("{:x}", Sha256::digest(&bytes)))
    }
}

impl RecordCleaner for CsvCleaner {
    fn clean(&self, execution_date: NaiveDate) -> Result<CleanOutcome, PipelineError> {
        let (schema, rows) = self.read_raw()?;
        let total = rows.len();
        let batch = clean_records(&schema, rows, execution_date);
        let (csv_path, content_hash) = self.write_partition(&schema, &batch, execution_date)?;

        log::info!("silver {}: {} de {} filas escritas ({} descartadas, {} de otra fecha) -> {}",
                   execution_date,
                   batch.stats.kept,
                   total,
                   batch.stats.total_dropped(),
                   batch.stats.filtered_other_date,
                   csv_path.display());

        Ok(CleanOutcome { csv_path,
                          rows_written: batch.stats.kept,
                          content_hash })
    }
}

impl CsvCleaner {
    /// Ruta canónica de la partición de una fecha, sin ejecutar la limpieza.
    pub fn partition_path(&self, execution_date: NaiveDate) -> PathBuf {
        self.store.partition_path(execution_date)
    }

    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }
}

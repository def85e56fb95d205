//! Direccionamiento determinista de particiones Silver.
use std::fs;
use std::io;
use std::path::PathBuf;

use chrono::NaiveDate;

/// Layout de particiones: `<silver_root>/<fecha>/orders_clean_<fecha>.csv`.
///
/// Sin lógica de negocio: sólo construcción de rutas y `mkdir -p`. El
/// direccionamiento es puro, así que toda prueba puede predecir la ruta de
/// cualquier fecha.
#[derive(Debug, Clone)]
pub struct PartitionStore {
    silver_root: PathBuf,
}

impl PartitionStore {
    pub fn new(silver_root: impl Into<PathBuf>) -> Self {
        Self { silver_root: silver_root.into() }
    }

    pub fn partition_dir(&self, execution_date: NaiveDate) -> PathBuf {
        self.silver_root.join(execution_date.format("%Y-%m-%d").to_string())
    }

    pub fn partition_path(&self, execution_date: NaiveDate) -> PathBuf {
        self.partition_dir(execution_date)
            .join(format!("orders_clean_{}.csv", execution_date.format("%Y-%m-%d")))
    }

    /// Crea el directorio de la partición si no existe y lo devuelve.
    pub fn ensure(&self, execution_date: NaiveDate) -> io::Result<PathBuf> {
        let dir = self.partition_dir(execution_date);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_path_is_deterministic() {
        let store = PartitionStore::new("/data/silver");
        let date: NaiveDate = "2024-01-05".parse().unwrap();
        assert_eq!(store.partition_path(date),
                   PathBuf::from("/data/silver/2024-01-05/orders_clean_2024-01-05.csv"));
    }
}

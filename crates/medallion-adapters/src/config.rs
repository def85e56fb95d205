//! Carga de configuración del pipeline desde variables de entorno.
//! Todos los parámetros tienen default, calcado del layout del repo de datos.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// CSV crudo (Bronze).
    pub raw_path: PathBuf,
    /// Raíz de particiones Silver.
    pub silver_root: PathBuf,
    /// Raíz de reportes de calidad.
    pub reports_root: PathBuf,
    /// Proyecto dbt.
    pub dbt_project_dir: PathBuf,
    /// Directorio de profiles de dbt.
    pub dbt_profiles_dir: PathBuf,
    /// Ejecutable de dbt.
    pub dbt_bin: PathBuf,
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let path_or = |var: &str, default: &str| -> PathBuf {
            env::var(var).map(PathBuf::from).unwrap_or_else(|_| PathBuf::from(default))
        };
        Self { raw_path: path_or("MEDALLION_RAW_PATH", "data/raw/raw_orders.csv"),
               silver_root: path_or("MEDALLION_SILVER_ROOT", "data/silver"),
               reports_root: path_or("MEDALLION_REPORTS_ROOT", "reports"),
               dbt_project_dir: path_or("MEDALLION_DBT_PROJECT_DIR", "dbt_medallion"),
               dbt_profiles_dir: path_or("MEDALLION_DBT_PROFILES_DIR", "."),
               dbt_bin: path_or("MEDALLION_DBT_BIN", "dbt") }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

//! medallion-adapters: implementaciones concretas de las capacidades del
//! pipeline (CSV, dbt por CLI, reporte JSON) y configuración por entorno.
pub mod cleaner;
pub mod config;
pub mod dbt;
pub mod partition;
pub mod reporter;

pub use cleaner::CsvCleaner;
pub use config::PipelineConfig;
pub use dbt::{DbtCli, DbtMode};
pub use partition::PartitionStore;
pub use reporter::JsonReportWriter;

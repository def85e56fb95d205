//! CLI del pipeline: expone las tres etapas invocables por el scheduler
//! externo (`clean`, `transform`, `validate`) y la corrida completa (`run`).
//!
//! Códigos de salida: 0 ok (incluye corrida completada con checks fallidos:
//! eso viaja en el reporte), 2 uso inválido, 4 argumento rechazado,
//! 5 fallo del pipeline.
use std::path::PathBuf;

use chrono::NaiveDate;
use medallion_adapters::{CsvCleaner, DbtCli, JsonReportWriter, PartitionStore, PipelineConfig};
use medallion_core::{InMemoryEventStore, PipelineRun};

#[derive(Debug)]
struct CliOpts {
    config: PipelineConfig,
    date: NaiveDate,
    csv: Option<PathBuf>,
}

fn usage() -> ! {
    eprintln!("Uso: medallion-cli <clean|transform|validate|run> --date YYYY-MM-DD");
    eprintln!("  flags opcionales: --raw-path P --silver-root P --reports-root P");
    eprintln!("                    --dbt-project-dir P --dbt-profiles-dir P --dbt-bin P");
    eprintln!("                    --csv P (transform/validate: partición a usar)");
    std::process::exit(2);
}

#[derive(Debug)]
enum ParseError {
    Usage,
    BadArg(String),
}

/// Valor de un flag; un flag sin valor es un argumento rechazado, no un
/// default silencioso.
fn take_value<'a>(args: &'a [String], i: &mut usize, flag: &str) -> Result<&'a str, ParseError> {
    *i += 1;
    match args.get(*i) {
        Some(v) => Ok(v.as_str()),
        None => Err(ParseError::BadArg(format!("falta el valor de {flag}"))),
    }
}

fn parse_opts(args: &[String]) -> Result<CliOpts, ParseError> {
    let mut config = PipelineConfig::from_env();
    let mut date: Option<NaiveDate> = None;
    let mut csv: Option<PathBuf> = None;
    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--date" => {
                let v = take_value(args, &mut i, "--date")?;
                let parsed = v.parse::<NaiveDate>().map_err(|_| {
                                  ParseError::BadArg(format!("fecha inválida: {v} (se espera YYYY-MM-DD)"))
                              })?;
                date = Some(parsed);
            }
            "--csv" => csv = Some(PathBuf::from(take_value(args, &mut i, "--csv")?)),
            "--raw-path" => config.raw_path = PathBuf::from(take_value(args, &mut i, "--raw-path")?),
            "--silver-root" => config.silver_root = PathBuf::from(take_value(args, &mut i, "--silver-root")?),
            "--reports-root" => config.reports_root = PathBuf::from(take_value(args, &mut i, "--reports-root")?),
            "--dbt-project-dir" => config.dbt_project_dir = PathBuf::from(take_value(args, &mut i, "--dbt-project-dir")?),
            "--dbt-profiles-dir" => config.dbt_profiles_dir = PathBuf::from(take_value(args, &mut i, "--dbt-profiles-dir")?),
            "--dbt-bin" => config.dbt_bin = PathBuf::from(take_value(args, &mut i, "--dbt-bin")?),
            _ => {}
        }
        i += 1;
    }
    match date {
        Some(date) => Ok(CliOpts { config, date, csv }),
        None => Err(ParseError::Usage),
    }
}

fn opts_or_exit(args: &[String]) -> CliOpts {
    match parse_opts(args) {
        Ok(opts) => opts,
        Err(ParseError::Usage) => usage(),
        Err(ParseError::BadArg(msg)) => {
            eprintln!("[medallion] {msg}");
            std::process::exit(4);
        }
    }
}

fn build_pipeline(config: &PipelineConfig) -> PipelineRun<CsvCleaner, DbtCli, JsonReportWriter, InMemoryEventStore> {
    let store = PartitionStore::new(&config.silver_root);
    PipelineRun::new(CsvCleaner::new(&config.raw_path, store),
                     DbtCli::from_config(config),
                     JsonReportWriter::new(&config.reports_root),
                     InMemoryEventStore::new())
}

fn main() {
    // Cargar .env si existe (rutas del pipeline, binario de dbt)
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    match args[1].as_str() {
        "clean" => {
            let opts = opts_or_exit(&args);
            let mut pipeline = build_pipeline(&opts.config);
            match pipeline.run_clean(opts.date) {
                Ok(outcome) => {
                    println!("silver listo: {} ({} filas, sha256 {})",
                             outcome.csv_path.display(),
                             outcome.rows_written,
                             outcome.content_hash);
                }
                Err(e) => {
                    eprintln!("[medallion clean] {e}");
                    std::process::exit(5);
                }
            }
        }
        "transform" => {
            let opts = opts_or_exit(&args);
            let mut pipeline = build_pipeline(&opts.config);
            let csv = opts.csv
                          .unwrap_or_else(|| PartitionStore::new(&opts.config.silver_root).partition_path(opts.date));
            match pipeline.run_apply(opts.date, &csv) {
                Ok(result) => {
                    println!("dbt run ok: {} unidades sobre {}", result.results.len(), csv.display());
                }
                Err(e) => {
                    eprintln!("[medallion transform] {e}");
                    std::process::exit(5);
                }
            }
        }
        "validate" => {
            let opts = opts_or_exit(&args);
            let mut pipeline = build_pipeline(&opts.config);
            let csv = opts.csv
                          .unwrap_or_else(|| PartitionStore::new(&opts.config.silver_root).partition_path(opts.date));
            match pipeline.run_validate_and_report(opts.date, &csv) {
                Ok((report_path, result)) => {
                    println!("reporte: {} (passed={})", report_path.display(), result.success);
                }
                Err(e) => {
                    eprintln!("[medallion validate] {e}");
                    std::process::exit(5);
                }
            }
        }
        "run" => {
            let opts = opts_or_exit(&args);
            let mut pipeline = build_pipeline(&opts.config);
            match pipeline.run(opts.date) {
                Ok(outcome) => {
                    println!("corrida {} completada: silver={} reporte={} passed={}",
                             outcome.execution_date,
                             outcome.silver_csv_path.display(),
                             outcome.report_path.display(),
                             outcome.passed);
                }
                Err(e) => {
                    eprintln!("[medallion run] corrida {} fallida: {e}", opts.date);
                    std::process::exit(5);
                }
            }
        }
        _ => usage(),
    }
}

pub mod check;
pub mod context;
pub mod report;

pub use check::{CheckResult, CheckStatus, TransformResult};
pub use context::RunContext;
pub use report::QualityReport;

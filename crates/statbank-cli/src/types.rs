use std::path::PathBuf;

use statbank_model::ValidationReport;

#[derive(Debug)]
pub struct WrittenFiles {
    pub table_id: String,
    pub files: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct PayloadResult {
    pub params: Vec<(&'static str, String)>,
    pub content_type: String,
    pub body: String,
    /// Where the body was written; printed to stdout when unset.
    pub output: Option<PathBuf>,
    pub report: ValidationReport,
}

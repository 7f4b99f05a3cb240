use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;
use tracing::{info, info_span, warn};

use statbank_cli::ingest::{CsvLayout, read_dataset, read_description, write_dataset, write_templates};
use statbank_model::{Dataset, TableDescription, ValidationReport};
use statbank_schema::save_description;
use statbank_transfer::{TransferSettings, payload};
use statbank_transform::round_dataset;

use crate::cli::{DataArgs, DescribeArgs, ParseArgs, PayloadArgs, RoundArgs, TemplateArgs};
use crate::types::{PayloadResult, WrittenFiles};

pub fn run_parse(args: &ParseArgs) -> Result<(TableDescription, PathBuf)> {
    let description = read_description(&args.schema)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("table_{}.json", description.table_id)));
    save_description(&description, &output)
        .with_context(|| format!("save description to {}", output.display()))?;
    info!(table_id = %description.table_id, path = %output.display(), "saved description");
    Ok((description, output))
}

pub fn run_describe(args: &DescribeArgs) -> Result<TableDescription> {
    let description = read_description(&args.description)?;
    if description.is_stale(Local::now().date_naive()) {
        warn!(
            table_id = %description.table_id,
            retrieved_at = %description.retrieved_at,
            "description was retrieved in an earlier year, fetch it again before uploading"
        );
    }
    Ok(description)
}

pub fn run_template(args: &TemplateArgs) -> Result<WrittenFiles> {
    let description = read_description(&args.description)?;
    let files = write_templates(&description, &args.output_dir, args.separator)?;
    Ok(WrittenFiles {
        table_id: description.table_id,
        files,
    })
}

pub fn run_validate(args: &DataArgs) -> Result<ValidationReport> {
    let (description, dataset) = load(args)?;
    let span = info_span!("validate", table_id = %description.table_id);
    let _guard = span.enter();
    let report = statbank_validate::validate(&dataset, &description);
    info!(
        errors = report.error_count(),
        warnings = report.warning_count(),
        "validation finished"
    );
    Ok(report)
}

pub fn run_round(args: &RoundArgs) -> Result<WrittenFiles> {
    let (description, dataset) = load(&args.data)?;
    let rounded = round_dataset(&dataset, &description).context("round statistics")?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("rounded"));
    let files = write_dataset(&rounded, &output_dir, b';')?;
    Ok(WrittenFiles {
        table_id: description.table_id,
        files,
    })
}

pub fn run_payload(args: &PayloadArgs) -> Result<PayloadResult> {
    let (description, dataset) = load(&args.data)?;
    let span = info_span!("payload", table_id = %description.table_id);
    let _guard = span.enter();

    let mut settings = match &args.shortuser {
        Some(shortuser) => TransferSettings::new(shortuser.clone()),
        None => TransferSettings::from_env().context("no --shortuser given")?,
    }
    .with_approve(args.approve.into())
    .with_overwrite(!args.no_overwrite);
    if let Some(date) = args.publish_date {
        settings = settings.with_publish_date(date);
    }
    settings.validate().context("transfer settings")?;

    let report = statbank_validate::validate(&dataset, &description);
    if report.has_errors() && !args.override_validation {
        bail!(
            "validation found {} error(s); run `statbank validate` for details or pass --override-validation",
            report.error_count()
        );
    }

    let rounded = round_dataset(&dataset, &description).context("round statistics")?;
    let body = payload::build_body(&rounded).context("build upload body")?;
    if let Some(path) = &args.output {
        std::fs::write(path, &body).with_context(|| format!("write {}", path.display()))?;
    }
    Ok(PayloadResult {
        params: settings.query_params(&description.table_id),
        content_type: payload::content_type(),
        output: args.output.clone(),
        body,
        report,
    })
}

fn load(args: &DataArgs) -> Result<(TableDescription, Dataset)> {
    let description = read_description(&args.description)?;
    let layout = CsvLayout {
        separator: args.separator,
        has_header: !args.no_header,
    };
    let dataset = read_dataset(&description, &args.data, layout)?;
    info!(
        table_id = %description.table_id,
        subtables = dataset.len(),
        "loaded dataset"
    );
    Ok((description, dataset))
}

/// Relative paths shown from the current directory when possible.
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

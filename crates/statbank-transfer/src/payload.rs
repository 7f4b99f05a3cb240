//! Upload body.
//!
//! Each subtable becomes one multipart section holding its rows as
//! `;`-separated text without a header. All line endings are CRLF.

use statbank_common::cell_text;
use statbank_model::Dataset;

use crate::error::{Result, TransferError};

pub const BOUNDARY: &str = "12345";

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// Builds the multipart body from an already rounded dataset.
pub fn build_body(dataset: &Dataset) -> Result<String> {
    let mut body = String::new();
    for (name, frame) in dataset.iter() {
        body.push_str(&format!("--{BOUNDARY}\r\n"));
        body.push_str(&format!("Content-Disposition:form-data; filename={name}\r\n"));
        body.push_str("Content-type:text/plain\r\n\r\n");

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(Vec::new());
        let columns = frame.get_columns();
        for row in 0..frame.height() {
            writer.write_record(columns.iter().map(|column| cell_text(column, row)))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| TransferError::Payload(e.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|e| TransferError::Payload(e.to_string()))?;
        body.push_str(&text);
    }
    body.push_str(&format!("\r\n--{BOUNDARY}--"));
    Ok(body)
}

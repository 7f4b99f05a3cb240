//! Saving and restoring parsed descriptions.
//!
//! Descriptions are stored as pretty JSON wrapped in a small envelope that
//! carries a format version. The load user is scrubbed before anything is
//! written; the retrieval timestamp is kept so callers can check staleness.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use statbank_model::TableDescription;

use crate::error::{Result, SchemaError};

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct Envelope {
    format_version: u32,
    description: TableDescription,
}

/// Serializes a scrubbed copy of the description.
pub fn description_to_json(description: &TableDescription) -> Result<String> {
    let envelope = Envelope {
        format_version: FORMAT_VERSION,
        description: description.scrubbed(),
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

/// Restores a description and re-checks its invariants.
pub fn description_from_json(text: &str) -> Result<TableDescription> {
    let envelope: Envelope = serde_json::from_str(text)?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(SchemaError::UnsupportedVersion {
            found: envelope.format_version,
            expected: FORMAT_VERSION,
        });
    }
    let description = envelope.description;
    description.check_consistency()?;
    Ok(description)
}

/// Writes the description to `path` via a temp file and rename.
pub fn save_description(description: &TableDescription, path: &Path) -> Result<()> {
    let text = description_to_json(description)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| SchemaError::io("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file =
        File::create(&temp_path).map_err(|e| SchemaError::io("create", &temp_path, e))?;
    file.write_all(text.as_bytes())
        .map_err(|e| SchemaError::io("write", &temp_path, e))?;
    file.sync_all()
        .map_err(|e| SchemaError::io("sync", &temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| SchemaError::io("rename", path, e))?;

    tracing::info!(
        table_id = %description.table_id,
        path = %path.display(),
        "saved table description"
    );
    Ok(())
}

pub fn load_description(path: &Path) -> Result<TableDescription> {
    let text = fs::read_to_string(path).map_err(|e| SchemaError::io("read", path, e))?;
    let description = description_from_json(&text)?;
    tracing::debug!(
        table_id = %description.table_id,
        path = %path.display(),
        "loaded table description"
    );
    Ok(description)
}

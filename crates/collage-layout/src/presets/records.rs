//! Import and export of custom presets
//!
//! Custom presets persist as a JSON array of objects shaped like the preset
//! itself plus an `isCustom` marker:
//!
//! ```json
//! [{ "id": "custom-layout-1", "label": "Mini", "cellWidth": 40, "cellHeight": 60, "isCustom": true }]
//! ```
//!
//! Every record is parsed into the typed preset and validated on its own; a
//! malformed record is rejected whole and never half-applied.

use super::{Preset, PresetRegistry};
use crate::types::{CollageError, PresetError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Wire shape of a persisted preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetRecord<T> {
    #[serde(flatten)]
    pub preset: T,
    #[serde(default)]
    pub is_custom: bool,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    pub accepted: usize,
    pub rejected: usize,
    /// Ids the accepted records were registered under
    pub imported_ids: Vec<String>,
    /// One message per rejected record
    pub errors: Vec<String>,
}

/// Parse and validate one record
pub fn parse_record<T>(value: serde_json::Value) -> std::result::Result<T, PresetError>
where
    T: Preset + DeserializeOwned,
{
    let record: PresetRecord<T> = serde_json::from_value(value)
        .map_err(|e| PresetError::InvalidRecord(e.to_string()))?;
    record
        .preset
        .validate()
        .map_err(PresetError::InvalidRecord)?;
    Ok(record.preset)
}

impl<T> PresetRegistry<T>
where
    T: Preset + Serialize + DeserializeOwned,
{
    /// Custom presets as persisted records
    pub fn export_records(&self) -> Vec<PresetRecord<T>> {
        self.custom()
            .map(|entry| PresetRecord {
                preset: entry.preset.clone(),
                is_custom: true,
            })
            .collect()
    }

    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.export_records())?)
    }

    /// Import already-split records, accepting each valid one as a custom
    /// preset. Ids are kept unless empty or already registered.
    pub fn import_records(&mut self, values: Vec<serde_json::Value>) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, value) in values.into_iter().enumerate() {
            let outcome = parse_record::<T>(value)
                .and_then(|preset| self.insert_custom(preset, true));
            match outcome {
                Ok(id) => {
                    report.accepted += 1;
                    report.imported_ids.push(id);
                }
                Err(e) => {
                    log::warn!("Rejected {} record {}: {}", T::KIND, index, e);
                    report.rejected += 1;
                    report.errors.push(format!("record {}: {}", index, e));
                }
            }
        }

        log::info!(
            "Imported {} {} presets ({} rejected)",
            report.accepted,
            T::KIND,
            report.rejected
        );
        report
    }

    /// Import a JSON array of records. Anything other than an array fails as
    /// a whole; individual bad records are only counted.
    pub fn import_json(&mut self, json: &str) -> Result<ImportReport> {
        let values: Vec<serde_json::Value> = serde_json::from_str(json).map_err(|e| {
            CollageError::Config(format!("Preset file is not a JSON array: {}", e))
        })?;
        Ok(self.import_records(values))
    }

    /// Read and import a presets file
    pub async fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let json = tokio::fs::read_to_string(path).await?;
        self.import_json(&json)
    }

    /// Write the custom presets to a file
    pub async fn export_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = self.export_json()?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }
}

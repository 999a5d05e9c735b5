//! `dataset_description.json` creation and loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument, warn};

use crate::error::{BidsError, Result};

use super::{read_json_object, write_json_object};

/// Standard version written to new descriptions.
pub const BIDS_VERSION: &str = "1.7.0";

/// File name of the dataset description at the dataset root.
pub const DESCRIPTION_FILE: &str = "dataset_description.json";

const UNSPECIFIED: &str = "[Unspecified]";

/// Whether a dataset holds raw recordings or processed outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetType {
    #[default]
    Raw,
    Derivative,
}

/// A pipeline that produced (part of) the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GeneratedBy {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "CodeURL", default, skip_serializing_if = "Option::is_none")]
    pub code_url: Option<String>,
}

impl GeneratedBy {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            description: None,
            code_url: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

/// A dataset this one was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceDataset {
    #[serde(rename = "URL", default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "DOI", default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
    #[serde(rename = "Version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Contents of `dataset_description.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetDescription {
    pub name: String,
    #[serde(rename = "BIDSVersion")]
    pub bids_version: String,
    #[serde(default)]
    pub dataset_type: DatasetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acknowledgements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub how_to_acknowledge: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub funding: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub references_and_links: Vec<String>,
    #[serde(rename = "DatasetDOI", default, skip_serializing_if = "Option::is_none")]
    pub dataset_doi: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generated_by: Vec<GeneratedBy>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_datasets: Vec<SourceDataset>,
}

impl Default for DatasetDescription {
    fn default() -> Self {
        Self {
            name: UNSPECIFIED.to_string(),
            bids_version: BIDS_VERSION.to_string(),
            dataset_type: DatasetType::Raw,
            license: None,
            authors: vec![UNSPECIFIED.to_string()],
            acknowledgements: None,
            how_to_acknowledge: None,
            funding: Vec::new(),
            references_and_links: Vec::new(),
            dataset_doi: None,
            generated_by: Vec::new(),
            source_datasets: Vec::new(),
        }
    }
}

impl DatasetDescription {
    /// A raw dataset description with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Replace the placeholder author list with `authors`.
    pub fn with_authors<I, S>(mut self, authors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.authors = authors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    pub fn with_doi(mut self, doi: impl Into<String>) -> Self {
        self.dataset_doi = Some(doi.into());
        self
    }

    /// Mark as a derivative dataset produced by `generated_by`.
    pub fn derivative(mut self, generated_by: GeneratedBy) -> Self {
        self.dataset_type = DatasetType::Derivative;
        self.generated_by.push(generated_by);
        self
    }

    /// Check field combinations that the serializer cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BidsError::InvalidArgument(
                "dataset name must not be empty".to_string(),
            ));
        }
        if self.dataset_type == DatasetType::Derivative && self.generated_by.is_empty() {
            return Err(BidsError::InvalidArgument(
                "derivative datasets must list at least one GeneratedBy entry".to_string(),
            ));
        }
        if let Some(doi) = &self.dataset_doi {
            if !doi.starts_with("doi:") {
                warn!(doi = %doi, "DatasetDOI should start with 'doi:'");
            }
        }
        Ok(())
    }
}

/// Write `dataset_description.json` under `root` and return its path.
///
/// When the file exists and `overwrite` is false, fields already present
/// are kept and only missing fields are added.
#[instrument(skip_all, fields(root = %root.as_ref().display(), overwrite = overwrite))]
pub fn make_dataset_description(
    root: impl AsRef<Path>,
    description: &DatasetDescription,
    overwrite: bool,
) -> Result<PathBuf> {
    description.validate()?;

    let path = root.as_ref().join(DESCRIPTION_FILE);
    let Value::Object(fresh) = serde_json::to_value(description)? else {
        return Err(BidsError::Sidecar(
            "dataset description did not serialize to an object".to_string(),
        ));
    };

    let merged = if path.is_file() && !overwrite {
        let mut existing = read_json_object(&path)?;
        for (key, value) in fresh {
            existing.entry(key).or_insert(value);
        }
        existing
    } else {
        fresh
    };

    write_json_object(&path, &merged)?;
    info!(path = %path.display(), "dataset description written");
    Ok(path)
}

/// Load `dataset_description.json` from `root`.
pub fn read_dataset_description(root: impl AsRef<Path>) -> Result<DatasetDescription> {
    let path = root.as_ref().join(DESCRIPTION_FILE);
    let map = read_json_object(&path)?;
    Ok(serde_json::from_value(Value::Object(map))?)
}

//! Dataset handle tying scanning, sidecars and channel files to one root.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, instrument};

use crate::channels::{ChannelStatus, channels_path, mark_channels};
use crate::error::{BidsError, Result};
use crate::path::{BidsPath, EntityQuery};
use crate::scan::{
    ScanConfig, TextMatch, datatypes, entity_values, find_matching_paths, render_dir_tree,
    search_folder_for_text,
};
use crate::schema::{Datatype, EntityKey};
use crate::sidecar::{DatasetDescription, make_dataset_description, read_dataset_description};

/// Summary of what a dataset contains.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInventory {
    /// Dataset root that was scanned.
    pub root: PathBuf,
    /// Observed values per entity, in canonical entity order. Entities
    /// that never occur are omitted.
    pub entities: IndexMap<EntityKey, Vec<String>>,
    /// Datatype folders present.
    pub datatypes: Vec<Datatype>,
    /// Number of files with a valid BIDS name.
    pub file_count: usize,
    /// When the scan ran.
    pub scanned_at: DateTime<Utc>,
}

/// A BIDS dataset rooted at a directory.
#[derive(Debug, Clone)]
pub struct Dataset {
    root: PathBuf,
    config: ScanConfig,
}

impl Dataset {
    /// Open the dataset at `root` with the default scan configuration.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(root, ScanConfig::default())
    }

    /// Open the dataset at `root` with a custom scan configuration.
    pub fn with_config(root: impl Into<PathBuf>, config: ScanConfig) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(BidsError::Io {
                path: root,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "dataset root is not a directory"),
            });
        }
        Ok(Self { root, config })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Files matching `query`, with this dataset as their root.
    pub fn find(&self, query: &EntityQuery) -> Result<Vec<BidsPath>> {
        find_matching_paths(&self.root, query, &self.config)
    }

    /// Distinct values of `key` across the dataset.
    pub fn entity_values(&self, key: EntityKey) -> Result<Vec<String>> {
        entity_values(&self.root, key, &self.config)
    }

    pub fn datatypes(&self) -> Result<Vec<Datatype>> {
        datatypes(&self.root, &self.config)
    }

    pub fn subjects(&self) -> Result<Vec<String>> {
        self.entity_values(EntityKey::Subject)
    }

    pub fn tree(&self, max_depth: Option<usize>) -> Result<String> {
        render_dir_tree(&self.root, max_depth)
    }

    pub fn search(&self, text: &str) -> Result<Vec<TextMatch>> {
        search_folder_for_text(&self.root, text, &self.config)
    }

    /// The parsed `dataset_description.json`.
    pub fn description(&self) -> Result<DatasetDescription> {
        read_dataset_description(&self.root)
    }

    /// Write (or complete) `dataset_description.json`.
    pub fn write_description(&self, description: &DatasetDescription, overwrite: bool) -> Result<PathBuf> {
        make_dataset_description(&self.root, description, overwrite)
    }

    /// Mark channels in the `channels.tsv` belonging to `recording`.
    ///
    /// `recording` is re-rooted at this dataset before resolving.
    pub fn mark_channels(
        &self,
        recording: &BidsPath,
        channels: &[&str],
        status: ChannelStatus,
        descriptions: &[&str],
    ) -> Result<usize> {
        let rooted = recording.update(&crate::path::PathUpdate::new().set_root(&self.root))?;
        mark_channels(channels_path(&rooted)?, channels, status, descriptions)
    }

    /// Scan the dataset and summarize its entities and datatypes.
    #[instrument(skip_all, fields(root = %self.root.display()))]
    pub fn inventory(&self) -> Result<DatasetInventory> {
        let files = find_matching_paths(&self.root, &EntityQuery::new(), &self.config)?;

        let mut entities: IndexMap<EntityKey, Vec<String>> = IndexMap::new();
        for key in EntityKey::ALL {
            let values = self.entity_values(key)?;
            if !values.is_empty() {
                entities.insert(key, values);
            }
        }

        let inventory = DatasetInventory {
            root: self.root.clone(),
            entities,
            datatypes: self.datatypes()?,
            file_count: files.len(),
            scanned_at: Utc::now(),
        };

        info!(
            files = inventory.file_count,
            entities = inventory.entities.len(),
            "inventory complete"
        );
        Ok(inventory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_missing_root() {
        let err = Dataset::new("/definitely/not/a/dataset").unwrap_err();
        assert!(matches!(err, BidsError::Io { .. }));
    }

    #[test]
    fn test_inventory() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "sub-01/eeg/sub-01_task-rest_eeg.edf");
        touch(dir.path(), "sub-02/eeg/sub-02_task-rest_run-01_eeg.edf");
        touch(dir.path(), "sub-02/anat/sub-02_T1w.nii.gz");
        touch(dir.path(), "sub-01/eeg/scratch_notes.txt");

        let dataset = Dataset::new(dir.path()).unwrap();
        let inventory = dataset.inventory().unwrap();

        assert_eq!(inventory.file_count, 3);
        assert_eq!(inventory.datatypes, vec![Datatype::Anat, Datatype::Eeg]);
        let keys: Vec<_> = inventory.entities.keys().copied().collect();
        assert_eq!(keys, vec![EntityKey::Subject, EntityKey::Task, EntityKey::Run]);
        assert_eq!(inventory.entities[&EntityKey::Subject], vec!["01", "02"]);
    }

    #[test]
    fn test_mark_channels_rerooted() {
        let dir = TempDir::new().unwrap();
        let channels = dir.path().join("sub-01/eeg/sub-01_task-rest_channels.tsv");
        fs::create_dir_all(channels.parent().unwrap()).unwrap();
        fs::write(&channels, "name\ttype\nCz\tEEG\n").unwrap();

        let recording = BidsPath::builder()
            .subject("01")
            .task("rest")
            .suffix("eeg")
            .extension(".edf")
            .datatype(Datatype::Eeg)
            .build()
            .unwrap();

        let dataset = Dataset::new(dir.path()).unwrap();
        dataset
            .mark_channels(&recording, &["Cz"], ChannelStatus::Bad, &[])
            .unwrap();
        assert!(fs::read_to_string(&channels).unwrap().contains("Cz\tEEG\tbad\tn/a"));
    }
}

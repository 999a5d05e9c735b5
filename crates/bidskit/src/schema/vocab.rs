//! Known datatypes, suffixes, and extensions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BidsError;

/// Data-type directory under a subject or session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Datatype {
    /// Anatomical MRI.
    Anat,
    /// Behavioral data.
    Beh,
    /// Diffusion MRI.
    Dwi,
    /// Electroencephalography.
    Eeg,
    /// Field maps.
    Fmap,
    /// Functional MRI.
    Func,
    /// Intracranial EEG.
    Ieeg,
    /// Magnetoencephalography.
    Meg,
    /// Near-infrared spectroscopy.
    Nirs,
    /// Perfusion imaging.
    Perf,
    /// Positron emission tomography.
    Pet,
}

impl Datatype {
    /// All datatypes in alphabetical order.
    pub const ALL: [Datatype; 11] = [
        Datatype::Anat,
        Datatype::Beh,
        Datatype::Dwi,
        Datatype::Eeg,
        Datatype::Fmap,
        Datatype::Func,
        Datatype::Ieeg,
        Datatype::Meg,
        Datatype::Nirs,
        Datatype::Perf,
        Datatype::Pet,
    ];

    /// Directory name for this datatype.
    pub fn as_str(&self) -> &'static str {
        match self {
            Datatype::Anat => "anat",
            Datatype::Beh => "beh",
            Datatype::Dwi => "dwi",
            Datatype::Eeg => "eeg",
            Datatype::Fmap => "fmap",
            Datatype::Func => "func",
            Datatype::Ieeg => "ieeg",
            Datatype::Meg => "meg",
            Datatype::Nirs => "nirs",
            Datatype::Perf => "perf",
            Datatype::Pet => "pet",
        }
    }

    /// Returns true for electrophysiology datatypes.
    pub fn is_electrophysiology(&self) -> bool {
        matches!(self, Datatype::Eeg | Datatype::Ieeg | Datatype::Meg)
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Datatype {
    type Err = BidsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| BidsError::InvalidDatatype(s.to_string()))
    }
}

/// Suffixes accepted when vocabulary checks are enabled.
pub const KNOWN_SUFFIXES: &[&str] = &[
    "meg",
    "markers",
    "eeg",
    "ieeg",
    "nirs",
    "T1w",
    "T2w",
    "FLASH",
    "bold",
    "dwi",
    "participants",
    "scans",
    "sessions",
    "electrodes",
    "optodes",
    "channels",
    "coordsystem",
    "events",
    "headshape",
    "digitizer",
    "photo",
    "beh",
    "physio",
    "stim",
];

/// Extensions accepted when vocabulary checks are enabled.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    // sidecars and tables
    ".json",
    ".tsv",
    ".tsv.gz",
    ".txt",
    // MRI
    ".nii",
    ".nii.gz",
    ".mgz",
    // MEG
    ".fif",
    ".ds",
    ".sqd",
    ".con",
    ".mrk",
    ".pdf",
    ".pos",
    ".dat",
    // EEG / iEEG
    ".vhdr",
    ".vmrk",
    ".eeg",
    ".edf",
    ".bdf",
    ".set",
    ".fdt",
    ".mefd",
    ".nwb",
    ".lay",
    // NIRS
    ".snirf",
];

/// Returns true if `suffix` is in [`KNOWN_SUFFIXES`].
pub fn is_known_suffix(suffix: &str) -> bool {
    KNOWN_SUFFIXES.contains(&suffix)
}

/// Returns true if `extension` (with leading dot) is in [`KNOWN_EXTENSIONS`].
pub fn is_known_extension(extension: &str) -> bool {
    KNOWN_EXTENSIONS.contains(&extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datatype_round_trip() {
        for datatype in Datatype::ALL {
            assert_eq!(datatype.as_str().parse::<Datatype>().unwrap(), datatype);
        }
        assert!("mri".parse::<Datatype>().is_err());
    }

    #[test]
    fn test_vocabularies() {
        assert!(is_known_suffix("channels"));
        assert!(!is_known_suffix("Channels"));
        assert!(is_known_extension(".tsv.gz"));
        assert!(!is_known_extension("tsv"));
    }
}

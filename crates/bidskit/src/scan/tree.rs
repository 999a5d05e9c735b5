//! Text rendering of a directory tree.

use std::fmt::Write;
use std::path::Path;

use crate::error::Result;

use super::walk::{ScanConfig, walk};

/// Render `root` as an indented tree, three dashes per level:
///
/// ```text
/// |study/
/// |--- participants.tsv
/// |--- sub-01/
/// |------ eeg/
/// |--------- sub-01_task-rest_eeg.edf
/// ```
///
/// Files are listed before subdirectories. With `max_depth = Some(n)` only
/// the first `n` levels below the root are shown.
pub fn render_dir_tree(root: impl AsRef<Path>, max_depth: Option<usize>) -> Result<String> {
    let root = root.as_ref();
    let root_name = root
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());

    let mut out = String::new();
    let _ = writeln!(out, "|{}/", root_name);

    for entry in walk(root, &ScanConfig::unfiltered(), max_depth)? {
        let marker = if entry.is_dir { "/" } else { "" };
        let _ = writeln!(out, "|{} {}{}", "---".repeat(entry.depth), entry.name, marker);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::TempDir;

    #[test]
    fn test_render_tree() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("study");
        fs::create_dir_all(root.join("sub-01/eeg")).unwrap();
        File::create(root.join("participants.tsv")).unwrap();
        File::create(root.join("sub-01/eeg/sub-01_task-rest_eeg.edf")).unwrap();

        let tree = render_dir_tree(&root, None).unwrap();
        assert_eq!(
            tree,
            "|study/\n\
             |--- participants.tsv\n\
             |--- sub-01/\n\
             |------ eeg/\n\
             |--------- sub-01_task-rest_eeg.edf\n"
        );

        let shallow = render_dir_tree(&root, Some(1)).unwrap();
        assert_eq!(shallow, "|study/\n|--- participants.tsv\n|--- sub-01/\n");
    }
}

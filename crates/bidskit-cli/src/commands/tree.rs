//! Tree command - print the directory layout.

use std::path::PathBuf;

use bidskit::render_dir_tree;

use super::CommandResult;

pub fn run(root: PathBuf, max_depth: Option<usize>) -> CommandResult {
    print!("{}", render_dir_tree(&root, max_depth)?);
    Ok(())
}

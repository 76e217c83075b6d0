//! Candidate directories to probe for repositories.
//!
//! Static items are taken as-is. Each index folder contributes itself and its
//! immediate child directories, sorted by path. Nothing is filtered by
//! `.gitignore`: a checkout ignored by its parent is still a candidate.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::parser::config::Config;

/// All candidate directories in discovery order, without duplicates.
pub fn candidates(config: &Config) -> Vec<PathBuf> {
    let mut items: Vec<PathBuf> = config.static_items.clone();
    for folder in &config.index_folders {
        if !folder.is_dir() {
            continue;
        }
        items.push(folder.clone());
        items.extend(child_dirs(folder));
    }

    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|path| path.is_dir())
        .filter(|path| seen.insert(path.clone()))
        .collect()
}

fn child_dirs(folder: &Path) -> Vec<PathBuf> {
    let mut builder = WalkBuilder::new(folder);
    builder.max_depth(Some(1)).standard_filters(false);

    let mut children = Vec::new();
    for result in builder.build() {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                log::debug!("skipping entry under {}: {}", folder.display(), err);
                continue;
            }
        };
        // Depth 0 is the folder itself.
        if entry.depth() == 0 {
            continue;
        }
        let path = entry.path();
        if path.is_dir() {
            children.push(path.to_path_buf());
        }
    }
    children.sort();
    children
}

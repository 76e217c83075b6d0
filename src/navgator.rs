//! Paths and read/modify/write helpers for a repository's `.navgator.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::parser::tags;

pub const TAGS_FILE: &str = ".navgator.toml";
pub const TAGS_KEY: &str = "tags";

pub fn tags_path(root: &Path) -> PathBuf {
    root.join(TAGS_FILE)
}

/// Current tags of `root`. A missing or unreadable file has no tags.
pub fn read_tags_for(root: &Path) -> Vec<String> {
    let path = tags_path(root);
    if !path.is_file() {
        return Vec::new();
    }
    match fs::read_to_string(&path) {
        Ok(contents) => tags::read_tags(&contents, TAGS_KEY),
        Err(err) => {
            log::debug!("cannot read {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

/// Store `new_tags` in `root`'s tags file, creating it if needed.
///
/// The file is written only when the rewritten text differs from what is on
/// disk. Returns whether it was written.
pub fn apply_tags(root: &Path, new_tags: &[String]) -> Result<bool> {
    let path = tags_path(root);
    let contents = read_existing(&path)?;
    let updated = tags::write_tags(&contents, TAGS_KEY, new_tags);
    if updated == contents {
        return Ok(false);
    }
    fs::write(&path, updated).with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(true)
}

/// Recompute `root`'s tags with `update` and persist them if the list
/// changed. Returns whether the file was written.
pub fn update_tags<F>(root: &Path, update: F) -> Result<bool>
where
    F: FnOnce(&[String]) -> Vec<String>,
{
    let path = tags_path(root);
    let contents = read_existing(&path)?;
    let current = tags::read_tags(&contents, TAGS_KEY);
    let next = update(&current);
    if next == current {
        return Ok(false);
    }
    apply_tags(root, &next)
}

fn read_existing(path: &Path) -> Result<String> {
    if path.exists() {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    } else {
        Ok(String::new())
    }
}

//! `navtags show` — print the tags stored in a directory's `.navgator.toml`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::commands::edit::resolve_dir;
use crate::navgator::{self, TAGS_KEY};
use crate::parser::tags;

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let root = resolve_dir(path)?;
    let file = navgator::tags_path(&root);
    if !file.is_file() {
        println!("  No {} in {}.", navgator::TAGS_FILE, root.display());
        return Ok(());
    }
    let contents =
        fs::read_to_string(&file).with_context(|| format!("failed to read {}", file.display()))?;
    for line in describe(&contents) {
        println!("  {}", line);
    }
    Ok(())
}

fn describe(contents: &str) -> Vec<String> {
    let Some(location) = tags::locate(contents, TAGS_KEY) else {
        return vec!["No tags.".to_string()];
    };

    let lines = location.lines();
    let mut out = if !location.closed {
        vec![format!("# line {}, array never closed", lines.start + 1)]
    } else if lines.len() == 1 {
        vec![format!("# line {}", lines.start + 1)]
    } else {
        vec![format!("# lines {}-{}", lines.start + 1, lines.end)]
    };
    let found = tags::read_tags(contents, TAGS_KEY);
    if found.is_empty() {
        out.push("No tags.".to_string());
    } else {
        out.extend(found);
    }
    out
}

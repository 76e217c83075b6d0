//! `navtags add` / `navtags remove` — edit a directory's tags by hand.
//!
//! `add` completes each typed tag against the tags already used by the
//! discovered repositories, so `navtags add lang/r` reuses `lang/rust`.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use crossterm::style::Stylize;

use crate::commands::list;
use crate::navgator;
use crate::policy::complete::{complete_tag, known_tags};
use crate::policy::rule::{add_tags, remove_tags};

pub fn run_add(tags: &[String], path: Option<PathBuf>, exact: bool) -> Result<()> {
    let root = resolve_dir(path)?;
    let tags = clean_tags(tags)?;
    let known = if exact { Vec::new() } else { discover_known_tags() };
    let changed = add_in(&root, &tags, &known)?;
    report(&root, changed);
    Ok(())
}

pub fn run_remove(tags: &[String], path: Option<PathBuf>) -> Result<()> {
    let root = resolve_dir(path)?;
    let tags = clean_tags(tags)?;
    let changed = navgator::update_tags(&root, |current| remove_tags(current, &tags))?;
    report(&root, changed);
    Ok(())
}

/// Add `typed` to `root`'s tags, each completed against `known`. Tags the
/// file already carries are skipped.
fn add_in(root: &Path, typed: &[String], known: &[String]) -> Result<bool> {
    let tags: Vec<String> = typed
        .iter()
        .map(|raw| {
            let chosen = complete_tag(raw, known);
            if &chosen != raw {
                log::debug!("completed {:?} to {:?}", raw, chosen);
            }
            chosen
        })
        .collect();
    navgator::update_tags(root, |current| add_tags(current, &tags))
}

fn discover_known_tags() -> Vec<String> {
    match list::scan() {
        Ok(entries) => known_tags(entries.iter().map(|(_, tags)| tags.as_slice())),
        Err(err) => {
            log::warn!("tag completion unavailable: {:#}", err);
            Vec::new()
        }
    }
}

pub(crate) fn resolve_dir(path: Option<PathBuf>) -> Result<PathBuf> {
    let dir = match path {
        Some(p) => p,
        None => std::env::current_dir()?,
    };
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }
    Ok(dir)
}

/// Trim each tag and reject blank ones.
fn clean_tags(raw: &[String]) -> Result<Vec<String>> {
    let mut tags = Vec::with_capacity(raw.len());
    for tag in raw {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            bail!("tags must not be blank");
        }
        if trimmed.contains('"') {
            log::warn!("tag {:?} contains a quote and will not read back unchanged", trimmed);
        }
        tags.push(trimmed.to_string());
    }
    Ok(tags)
}

fn report(root: &Path, changed: bool) {
    let file = navgator::tags_path(root);
    if changed {
        println!("  {} {}", "Updated".green().bold(), file.display());
    } else {
        println!("  {}", "No changes.".dark_grey());
    }
}

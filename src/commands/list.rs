//! `navtags list` — every candidate repository with its current tags,
//! optionally filtered by a query (`@folder`, `#tag`, bare words).

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use crate::navgator;
use crate::parser::config;
use crate::policy::query::Query;
use crate::probe::{RepoProbe, SystemProbe};
use crate::scanner::candidates;

pub fn run(query: &str) -> Result<()> {
    let query = Query::parse(query);
    let entries = filter(scan()?, &query);
    if entries.is_empty() {
        if query.is_empty() {
            println!("  No repositories.");
        } else {
            println!("  No matching repositories.");
        }
        return Ok(());
    }
    for (root, tags) in entries {
        println!("  {}", format_entry(&root.display().to_string(), &tags));
    }
    Ok(())
}

/// Every discovered repository root with the tags it carries.
pub(crate) fn scan() -> Result<Vec<(PathBuf, Vec<String>)>> {
    let cfg = config::load()?;
    let dirs = candidates::candidates(&cfg);
    let probe = SystemProbe::new(cfg.probe_timeout);
    Ok(repo_roots(&dirs, &probe)
        .into_iter()
        .map(|root| {
            let tags = navgator::read_tags_for(&root);
            (root, tags)
        })
        .collect())
}

/// Distinct repository roots of `dirs`, in discovery order.
fn repo_roots<P: RepoProbe + ?Sized>(dirs: &[PathBuf], probe: &P) -> Vec<PathBuf> {
    let mut seen = HashSet::new();
    dirs.iter()
        .filter_map(|dir| probe.repo_root(dir))
        .filter(|root| seen.insert(root.clone()))
        .collect()
}

fn filter(entries: Vec<(PathBuf, Vec<String>)>, query: &Query) -> Vec<(PathBuf, Vec<String>)> {
    entries
        .into_iter()
        .filter(|(root, tags)| query.matches(&root.to_string_lossy(), tags))
        .collect()
}

fn format_entry(root: &str, tags: &[String]) -> String {
    if tags.is_empty() {
        root.to_string()
    } else {
        format!("{} : {}", root, tags.join(", "))
    }
}

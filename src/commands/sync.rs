//! Batch tagging shared by `navtags lang` and `navtags org`.
//!
//! Candidate directories resolve to repository roots, each root is probed
//! for metadata, a derivation function turns the metadata into a `TagRule`,
//! and the rule is applied to the root's `.navgator.toml`. Any candidate
//! that yields no information is skipped; the run itself never fails on a
//! single repository.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use crossterm::style::Stylize;

use crate::navgator;
use crate::parser::config;
use crate::policy::rule::TagRule;
use crate::probe::{RepoMetadata, RepoProbe, SystemProbe};
use crate::scanner::candidates;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    /// Candidates that resolved to a repository root.
    pub scanned: usize,
    /// Tags files actually rewritten.
    pub updated: usize,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

pub fn run<D>(derive: D) -> Result<()>
where
    D: Fn(&RepoMetadata) -> Option<TagRule>,
{
    let cfg = config::load()?;
    let dirs = candidates::candidates(&cfg);
    println!(
        "  {} {}",
        "Scanning".cyan().bold(),
        format!("{} candidate director{}...", dirs.len(), plural_y(dirs.len())).dark_grey()
    );

    let probe = SystemProbe::new(cfg.probe_timeout);
    let report = sync(&dirs, &probe, derive);

    println!(
        "Scanned {} repos, updated {} files.",
        report.scanned, report.updated
    );
    Ok(())
}

/// Apply the rule derived for every repository among `dirs`.
pub fn sync<P, D>(dirs: &[PathBuf], probe: &P, derive: D) -> SyncReport
where
    P: RepoProbe + ?Sized,
    D: Fn(&RepoMetadata) -> Option<TagRule>,
{
    let mut report = SyncReport::default();
    let mut seen_roots: HashSet<PathBuf> = HashSet::new();

    for dir in dirs {
        let Some(root) = probe.repo_root(dir) else {
            log::debug!("{}: not a repository", dir.display());
            continue;
        };
        report.scanned += 1;
        // Nested candidates share a root; probe and write it once.
        if !seen_roots.insert(root.clone()) {
            log::debug!("{}: root {} already handled", dir.display(), root.display());
            continue;
        }

        let Some(meta) = probe.metadata(&root) else {
            log::debug!("{}: no repository metadata", root.display());
            continue;
        };
        let Some(rule) = derive(&meta) else {
            log::debug!("{}: nothing to tag", root.display());
            continue;
        };

        match navgator::update_tags(&root, |current| rule.apply(current)) {
            Ok(true) => {
                report.updated += 1;
                print_updated(&root, &rule.tag);
            }
            Ok(false) => log::debug!("{}: already tagged {}", root.display(), rule.tag),
            Err(err) => log::warn!("{}: {:#}", root.display(), err),
        }
    }

    report
}

fn print_updated(root: &Path, tag: &str) {
    println!(
        "  {} {} {}",
        "Tagged".green().bold(),
        root.display(),
        tag.to_string().green()
    );
}

fn plural_y(n: usize) -> &'static str {
    if n == 1 { "y" } else { "ies" }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    use crate::policy::derive::{LANG_PREFIX, language_tag, org_tag};

    /// In-memory probe: directories map to roots, roots map to metadata.
    #[derive(Default)]
    pub(crate) struct FakeProbe {
        pub roots: HashMap<PathBuf, PathBuf>,
        pub metadata: HashMap<PathBuf, RepoMetadata>,
    }

    impl FakeProbe {
        pub fn repo(&mut self, dir: &Path, root: &Path, meta: Option<RepoMetadata>) {
            self.roots.insert(dir.to_path_buf(), root.to_path_buf());
            if let Some(meta) = meta {
                self.metadata.insert(root.to_path_buf(), meta);
            }
        }
    }

    impl RepoProbe for FakeProbe {
        fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
            self.roots.get(dir).cloned()
        }

        fn metadata(&self, root: &Path) -> Option<RepoMetadata> {
            self.metadata.get(root).cloned()
        }
    }

    fn lang(name: &str) -> RepoMetadata {
        RepoMetadata {
            primary_language: Some(name.to_string()),
            ..RepoMetadata::default()
        }
    }

    fn lang_rule(meta: &RepoMetadata) -> Option<TagRule> {
        language_tag(meta).map(|tag| TagRule::replace_prefixed(LANG_PREFIX, tag))
    }

    fn read(root: &Path) -> String {
        fs::read_to_string(navgator::tags_path(root)).unwrap()
    }

    #[test]
    fn counts_every_repository_candidate_but_writes_each_root_once() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        fs::create_dir_all(a.join("sub")).unwrap();
        fs::create_dir_all(&b).unwrap();

        let mut probe = FakeProbe::default();
        probe.repo(&a, &a, Some(lang("Rust")));
        probe.repo(&a.join("sub"), &a, Some(lang("Rust")));
        probe.repo(&b, &b, Some(lang("Jupyter Notebook")));

        let dirs = vec![a.clone(), a.join("sub"), b.clone()];
        let report = sync(&dirs, &probe, lang_rule);

        assert_eq!(report, SyncReport { scanned: 3, updated: 2 });
        assert_eq!(read(&a), "tags = [\"lang/rust\"]\n");
        assert_eq!(read(&b), "tags = [\"lang/jupyter-notebook\"]\n");
    }

    #[test]
    fn second_run_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a");
        fs::create_dir_all(&a).unwrap();
        fs::write(navgator::tags_path(&a), "tags = [\n  \"lang/go\",\n  \"work\",\n]\n").unwrap();

        let mut probe = FakeProbe::default();
        probe.repo(&a, &a, Some(lang("Rust")));
        let dirs = vec![a.clone()];

        let first = sync(&dirs, &probe, lang_rule);
        assert_eq!(first.updated, 1);
        let after_first = read(&a);
        assert_eq!(after_first, "tags = [\"work\", \"lang/rust\"]\n");

        let second = sync(&dirs, &probe, lang_rule);
        assert_eq!(second, SyncReport { scanned: 1, updated: 0 });
        assert_eq!(read(&a), after_first);
    }

    #[test]
    fn skips_non_repositories_and_missing_metadata() {
        let dir = TempDir::new().unwrap();
        let plain = dir.path().join("plain");
        let offline = dir.path().join("offline");
        fs::create_dir_all(&plain).unwrap();
        fs::create_dir_all(&offline).unwrap();

        let mut probe = FakeProbe::default();
        probe.repo(&offline, &offline, None);

        let report = sync(&[plain.clone(), offline.clone()], &probe, lang_rule);
        assert_eq!(report, SyncReport { scanned: 1, updated: 0 });
        assert!(!navgator::tags_path(&plain).exists());
        assert!(!navgator::tags_path(&offline).exists());
    }

    #[test]
    fn skips_when_derivation_yields_nothing() {
        let dir = TempDir::new().unwrap();
        let personal = dir.path().join("personal");
        fs::create_dir_all(&personal).unwrap();

        let mut probe = FakeProbe::default();
        probe.repo(
            &personal,
            &personal,
            Some(RepoMetadata {
                is_in_organization: false,
                url: Some("https://github.com/me/personal".into()),
                ..RepoMetadata::default()
            }),
        );

        let report = sync(&[personal.clone()], &probe, |m| org_tag(m).map(TagRule::ensure));
        assert_eq!(report, SyncReport { scanned: 1, updated: 0 });
        assert!(!navgator::tags_path(&personal).exists());
    }

    #[test]
    fn unwritable_root_does_not_stop_the_run() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("vanished");
        let ok = dir.path().join("ok");
        fs::create_dir_all(&ok).unwrap();

        let mut probe = FakeProbe::default();
        probe.repo(&missing, &missing, Some(lang("Go")));
        probe.repo(&ok, &ok, Some(lang("Go")));

        let report = sync(&[missing.clone(), ok.clone()], &probe, lang_rule);
        assert_eq!(report, SyncReport { scanned: 2, updated: 1 });
        assert_eq!(read(&ok), "tags = [\"lang/go\"]\n");
    }
}

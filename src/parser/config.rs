//! Discovery configuration: which directories `navtags` looks at.
//!
//! ```toml
//! [paths]
//! index_folders = ["~/Github"]        # the folder and each child directory
//! static_items = ["~/Desktop"]        # exactly these directories
//!
//! [probe]
//! timeout_secs = 10                   # per git/gh invocation
//! ```
//!
//! Every config file found in the search order is merged, earlier files
//! first. Path entries that do not exist are dropped silently.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const DEFAULT_STATIC_ITEMS: &[&str] = &["~/Desktop", "~/Downloads"];
const DEFAULT_INDEX_FOLDERS: &[&str] = &["~/Github", "~/Desktop"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub index_folders: Vec<PathBuf>,
    pub static_items: Vec<PathBuf>,
    pub probe_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_folders: Vec::new(),
            static_items: Vec::new(),
            probe_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: Option<PathsSection>,
    #[serde(default)]
    pub probe: Option<ProbeSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsSection {
    #[serde(default)]
    pub index_folders: Vec<String>,
    #[serde(default)]
    pub static_items: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProbeSection {
    pub timeout_secs: Option<u64>,
}

/// Process environment the config search depends on.
#[derive(Debug, Clone)]
pub struct ConfigEnv {
    pub home: PathBuf,
    pub cwd: Option<PathBuf>,
    pub explicit: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,
}

impl ConfigEnv {
    pub fn from_process() -> Result<Self> {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .context("HOME is not set")?;
        Ok(Self {
            home,
            cwd: std::env::current_dir().ok(),
            explicit: non_blank_var("NAVGATOR_CONFIG").map(PathBuf::from),
            xdg_config_home: non_blank_var("XDG_CONFIG_HOME").map(PathBuf::from),
        })
    }
}

fn non_blank_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Load and merge every config file visible from the current process.
pub fn load() -> Result<Config> {
    load_with(&ConfigEnv::from_process()?)
}

pub fn load_with(env: &ConfigEnv) -> Result<Config> {
    let mut config = Config::default();
    let mut seen_index = HashSet::new();
    let mut seen_static = HashSet::new();
    let mut timeout_secs: Option<u64> = None;
    let mut found = false;

    for path in config_paths(env) {
        if !path.is_file() {
            continue;
        }
        found = true;
        log::debug!("reading config {}", path.display());
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let file = parse(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        let base_dir = path.parent().unwrap_or(env.home.as_path());

        if let Some(paths) = file.paths {
            merge_paths(
                &paths.index_folders,
                base_dir,
                &env.home,
                &mut config.index_folders,
                &mut seen_index,
            );
            merge_paths(
                &paths.static_items,
                base_dir,
                &env.home,
                &mut config.static_items,
                &mut seen_static,
            );
        }
        if timeout_secs.is_none() {
            timeout_secs = file.probe.and_then(|p| p.timeout_secs);
        }
    }

    if !found {
        log::debug!("no config file found, using default discovery paths");
        let index: Vec<String> = DEFAULT_INDEX_FOLDERS.iter().map(|s| s.to_string()).collect();
        let statics: Vec<String> = DEFAULT_STATIC_ITEMS.iter().map(|s| s.to_string()).collect();
        merge_paths(&index, &env.home, &env.home, &mut config.index_folders, &mut seen_index);
        merge_paths(&statics, &env.home, &env.home, &mut config.static_items, &mut seen_static);
    }

    if let Some(secs) = timeout_secs {
        config.probe_timeout = Duration::from_secs(secs);
    }
    Ok(config)
}

pub fn parse(content: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(content)?)
}

/// Config locations in priority order, without duplicates.
pub fn config_paths(env: &ConfigEnv) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(explicit) = &env.explicit {
        paths.push(explicit.clone());
    }
    paths.push(PathBuf::from("/etc/navgator/config.toml"));
    let xdg = env
        .xdg_config_home
        .clone()
        .unwrap_or_else(|| env.home.join(".config"));
    paths.push(xdg.join("navgator/config.toml"));
    paths.push(env.home.join(".config/navgator/config.toml"));
    paths.push(env.home.join(".navgator.toml"));
    if let Some(cwd) = &env.cwd {
        paths.push(cwd.join(".navgator.toml"));
        paths.push(cwd.join(".navgator/config.toml"));
    }

    let mut seen = HashSet::new();
    paths.retain(|p| seen.insert(p.clone()));
    paths
}

fn merge_paths(
    raw_paths: &[String],
    base_dir: &Path,
    home: &Path,
    target: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
) {
    for raw in raw_paths {
        if let Some(path) = normalize_path(raw, base_dir, home) {
            if seen.insert(path.clone()) {
                target.push(path);
            }
        }
    }
}

/// Expand `~/` and `$HOME`, resolve relative entries against `base_dir`, and
/// keep only paths that exist.
fn normalize_path(raw: &str, base_dir: &Path, home: &Path) -> Option<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let home_str = home.to_string_lossy();
    let mut value = match trimmed.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home_str, rest),
        None => trimmed.to_string(),
    };
    if value.contains("$HOME") {
        value = value.replace("$HOME", &home_str);
    }

    let mut path = PathBuf::from(value);
    if path.is_relative() {
        path = base_dir.join(path);
    }
    path.exists().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_for(home: &Path) -> ConfigEnv {
        ConfigEnv {
            home: home.to_path_buf(),
            cwd: None,
            explicit: None,
            xdg_config_home: Some(home.join("xdg")),
        }
    }

    #[test]
    fn parse_full_config() {
        let file = parse(
            "[paths]\nindex_folders = [\"~/Github\"]\nstatic_items = [\"/opt\"]\n\n[probe]\ntimeout_secs = 3\n",
        )
        .unwrap();
        let paths = file.paths.unwrap();
        assert_eq!(paths.index_folders, vec!["~/Github"]);
        assert_eq!(paths.static_items, vec!["/opt"]);
        assert_eq!(file.probe.unwrap().timeout_secs, Some(3));
    }

    #[test]
    fn parse_ignores_unrelated_keys() {
        let file = parse("tags = [\"a\"]\nname = \"x\"\n").unwrap();
        assert!(file.paths.is_none());
        assert!(file.probe.is_none());
    }

    #[test]
    fn parse_rejects_invalid_toml() {
        assert!(parse("[paths\nindex_folders = ").is_err());
    }

    #[test]
    fn config_paths_order() {
        let env = ConfigEnv {
            home: PathBuf::from("/home/u"),
            cwd: Some(PathBuf::from("/work")),
            explicit: Some(PathBuf::from("/tmp/custom.toml")),
            xdg_config_home: None,
        };
        let paths = config_paths(&env);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/tmp/custom.toml"),
                PathBuf::from("/etc/navgator/config.toml"),
                PathBuf::from("/home/u/.config/navgator/config.toml"),
                PathBuf::from("/home/u/.navgator.toml"),
                PathBuf::from("/work/.navgator.toml"),
                PathBuf::from("/work/.navgator/config.toml"),
            ]
        );
    }

    #[test]
    fn normalize_expands_home_and_drops_missing() {
        let home = TempDir::new().unwrap();
        fs::create_dir_all(home.path().join("Github")).unwrap();
        assert_eq!(
            normalize_path("~/Github", Path::new("/"), home.path()),
            Some(home.path().join("Github"))
        );
        assert_eq!(
            normalize_path("$HOME/Github", Path::new("/"), home.path()),
            Some(home.path().join("Github"))
        );
        assert_eq!(normalize_path("~/Nope", Path::new("/"), home.path()), None);
        assert_eq!(normalize_path("   ", Path::new("/"), home.path()), None);
    }

    #[test]
    fn normalize_resolves_relative_to_config_dir() {
        let base = TempDir::new().unwrap();
        fs::create_dir_all(base.path().join("projects")).unwrap();
        assert_eq!(
            normalize_path("projects", base.path(), Path::new("/nonexistent")),
            Some(base.path().join("projects"))
        );
    }

    #[test]
    fn load_merges_files_and_dedupes() {
        let home = TempDir::new().unwrap();
        let h = home.path();
        fs::create_dir_all(h.join("Github")).unwrap();
        fs::create_dir_all(h.join("Work")).unwrap();
        fs::create_dir_all(h.join("xdg/navgator")).unwrap();
        fs::write(
            h.join("xdg/navgator/config.toml"),
            "[paths]\nindex_folders = [\"~/Github\"]\n[probe]\ntimeout_secs = 4\n",
        )
        .unwrap();
        fs::write(
            h.join(".navgator.toml"),
            "tags = [\"x\"]\n[paths]\nindex_folders = [\"~/Github\", \"~/Work\"]\nstatic_items = [\"Work\"]\n[probe]\ntimeout_secs = 9\n",
        )
        .unwrap();

        let cfg = load_with(&env_for(h)).unwrap();
        assert_eq!(cfg.index_folders, vec![h.join("Github"), h.join("Work")]);
        assert_eq!(cfg.static_items, vec![h.join("Work")]);
        assert_eq!(cfg.probe_timeout, Duration::from_secs(4));
    }

    #[test]
    fn load_uses_defaults_without_config() {
        let home = TempDir::new().unwrap();
        let h = home.path();
        fs::create_dir_all(h.join("Github")).unwrap();
        fs::create_dir_all(h.join("Desktop")).unwrap();

        let cfg = load_with(&env_for(h)).unwrap();
        assert_eq!(cfg.index_folders, vec![h.join("Github"), h.join("Desktop")]);
        assert_eq!(cfg.static_items, vec![h.join("Desktop")]);
        assert_eq!(cfg.probe_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn load_reports_broken_config() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".navgator.toml"), "tags = [\n").unwrap();
        let err = load_with(&env_for(home.path())).unwrap_err();
        assert!(format!("{err:#}").contains(".navgator.toml"));
    }
}

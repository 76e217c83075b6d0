//! Repository probing through `git` and `gh`.
//!
//! Every failure mode of an external tool (not installed, non-zero exit,
//! timeout, unexpected output) collapses to `None`: the caller skips the
//! candidate and moves on.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// The subset of `gh repo view` output the tag policies need.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoMetadata {
    pub primary_language: Option<String>,
    pub is_in_organization: bool,
    pub url: Option<String>,
}

pub trait RepoProbe {
    /// Canonical repository root containing `dir`, or `None` when `dir` is
    /// not inside a repository.
    fn repo_root(&self, dir: &Path) -> Option<PathBuf>;

    /// Hosting metadata for the repository at `root`.
    fn metadata(&self, root: &Path) -> Option<RepoMetadata>;
}

/// Probe backed by the `git` and `gh` executables on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemProbe {
    timeout: Duration,
}

impl SystemProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl RepoProbe for SystemProbe {
    fn repo_root(&self, dir: &Path) -> Option<PathBuf> {
        let mut command = Command::new("git");
        command
            .arg("-C")
            .arg(dir)
            .args(["rev-parse", "--show-toplevel"]);
        let stdout = run_captured(command, self.timeout)?;
        parse_toplevel(&stdout)
    }

    fn metadata(&self, root: &Path) -> Option<RepoMetadata> {
        let mut command = Command::new("gh");
        command
            .args([
                "repo",
                "view",
                "--json",
                "primaryLanguage,isInOrganization,url",
            ])
            .current_dir(root);
        let stdout = run_captured(command, self.timeout)?;
        parse_repo_view(&stdout)
    }
}

// ---------------------------------------------------------------------------
// Output parsing
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    #[serde(default)]
    primary_language: Option<Language>,
    #[serde(default)]
    is_in_organization: Option<bool>,
    #[serde(default)]
    url: Option<String>,
}

#[derive(Deserialize)]
struct Language {
    #[serde(default)]
    name: Option<String>,
}

pub fn parse_toplevel(stdout: &str) -> Option<PathBuf> {
    let root = stdout.trim();
    if root.is_empty() {
        None
    } else {
        Some(PathBuf::from(root))
    }
}

pub fn parse_repo_view(stdout: &str) -> Option<RepoMetadata> {
    let view: RepoView = match serde_json::from_str(stdout) {
        Ok(view) => view,
        Err(err) => {
            log::debug!("unparsable gh output: {}", err);
            return None;
        }
    };

    let primary_language = view
        .primary_language
        .and_then(|lang| lang.name)
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty());
    let url = view
        .url
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    Some(RepoMetadata {
        primary_language,
        is_in_organization: view.is_in_organization.unwrap_or(false),
        url,
    })
}

// ---------------------------------------------------------------------------
// Process execution
// ---------------------------------------------------------------------------

/// Run `command` and return its stdout if it exits successfully within
/// `timeout`. The child is killed on timeout.
fn run_captured(mut command: Command, timeout: Duration) -> Option<String> {
    let program = command.get_program().to_string_lossy().into_owned();
    let mut child = match command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => child,
        Err(err) => {
            log::debug!("failed to launch {}: {}", program, err);
            return None;
        }
    };

    // Drain stdout concurrently so a chatty child cannot block on a full pipe.
    let mut stdout = child.stdout.take()?;
    let reader = thread::spawn(move || {
        let mut buf = String::new();
        stdout.read_to_string(&mut buf).map(|_| buf)
    });

    // A timeout too large to represent means no deadline at all.
    let deadline = Instant::now().checked_add(timeout);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if deadline.is_some_and(|d| Instant::now() >= d) => {
                let _ = child.kill();
                let _ = child.wait();
                log::debug!("{} timed out after {:?}", program, timeout);
                return None;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => {
                log::debug!("failed to wait for {}: {}", program, err);
                return None;
            }
        }
    };

    if !status.success() {
        log::debug!("{} exited with {}", program, status);
        return None;
    }
    reader.join().ok()?.ok()
}

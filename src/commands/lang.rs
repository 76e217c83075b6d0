//! `navtags lang` — tag each repository with its primary language.
//!
//! Any existing `lang/*` tag is replaced, so a repository carries at most one.

use anyhow::Result;

use crate::commands::sync;
use crate::policy::derive::{LANG_PREFIX, language_tag};
use crate::policy::rule::TagRule;
use crate::probe::RepoMetadata;

pub fn run() -> Result<()> {
    sync::run(rule_for)
}

fn rule_for(meta: &RepoMetadata) -> Option<TagRule> {
    language_tag(meta).map(|tag| TagRule::replace_prefixed(LANG_PREFIX, tag))
}

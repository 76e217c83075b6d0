//! `navtags org` — tag organisation-owned repositories with their owner.

use anyhow::Result;

use crate::commands::sync;
use crate::policy::derive::org_tag;
use crate::policy::rule::TagRule;
use crate::probe::RepoMetadata;

pub fn run() -> Result<()> {
    sync::run(rule_for)
}

fn rule_for(meta: &RepoMetadata) -> Option<TagRule> {
    org_tag(meta).map(TagRule::ensure)
}

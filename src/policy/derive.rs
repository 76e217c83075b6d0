//! Tag derivation from repository metadata.

use crate::probe::RepoMetadata;

pub const LANG_PREFIX: &str = "lang/";
pub const ORG_PREFIX: &str = "org/";

/// `lang/<slug>` for the repository's primary language.
pub fn language_tag(meta: &RepoMetadata) -> Option<String> {
    let slug = slugify(meta.primary_language.as_deref()?);
    if slug.is_empty() {
        return None;
    }
    Some(format!("{LANG_PREFIX}{slug}"))
}

/// `org/<owner>` for repositories owned by an organisation.
pub fn org_tag(meta: &RepoMetadata) -> Option<String> {
    if !meta.is_in_organization {
        return None;
    }
    let org = org_from_url(meta.url.as_deref()?)?;
    Some(format!("{ORG_PREFIX}{org}"))
}

/// Lowercase hyphen-separated slug: `"Jupyter Notebook"` → `"jupyter-notebook"`.
///
/// Alphanumerics are kept, runs of space, `-`, `_` and `.` become one `-`,
/// anything else is dropped.
pub fn slugify(value: &str) -> String {
    let mut out = String::new();
    for ch in value.trim().to_lowercase().chars() {
        if ch.is_alphanumeric() {
            out.push(ch);
        } else if matches!(ch, ' ' | '-' | '_' | '.') && !out.is_empty() && !out.ends_with('-')
        {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

/// Owner segment of a repository URL (`https://host/<owner>/<repo>`).
///
/// Requires at least two non-empty path segments.
pub fn org_from_url(url: &str) -> Option<String> {
    let path = url_path(url.trim());
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty()).collect();
    if parts.len() < 2 {
        return None;
    }
    Some(parts[0].to_string())
}

/// The path component of `url`. An authority is skipped after `scheme://`
/// or a leading `//`; anything else is taken as a bare path.
fn url_path(url: &str) -> &str {
    let authority = match url.find("://") {
        Some(scheme_end) => Some(&url[scheme_end + 3..]),
        None => url.strip_prefix("//"),
    };
    let path = match authority {
        Some(rest) => rest.find('/').map(|slash| &rest[slash..]).unwrap_or(""),
        None => url,
    };
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}

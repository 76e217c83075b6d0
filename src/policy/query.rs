//! Repository filter queries for `navtags list`.
//!
//! A query is whitespace-separated tokens, all of which must match:
//!
//! - `@word` matches the repository path,
//! - `#word` matches at least one tag,
//! - a bare `word` matches either the path or a tag.
//!
//! Matching is a case-insensitive subsequence test, so `@gh/nav` matches
//! `/home/u/Github/navgator`.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Query {
    pub folder: Vec<String>,
    pub tags: Vec<String>,
    pub any: Vec<String>,
}

impl Query {
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for raw in query.split_whitespace() {
            if let Some(rest) = raw.strip_prefix('@') {
                if !rest.is_empty() {
                    parsed.folder.push(rest.to_string());
                }
            } else if let Some(rest) = raw.strip_prefix('#') {
                if !rest.is_empty() {
                    parsed.tags.push(rest.to_string());
                }
            } else {
                parsed.any.push(raw.to_string());
            }
        }
        parsed
    }

    pub fn is_empty(&self) -> bool {
        self.folder.is_empty() && self.tags.is_empty() && self.any.is_empty()
    }

    pub fn matches(&self, path: &str, tags: &[String]) -> bool {
        let tag_match = |token: &str| tags.iter().any(|tag| fuzzy_match(token, tag));

        self.folder.iter().all(|token| fuzzy_match(token, path))
            && self.tags.iter().all(|token| tag_match(token))
            && self
                .any
                .iter()
                .all(|token| fuzzy_match(token, path) || tag_match(token))
    }
}

/// True when every non-whitespace char of `query` appears in `text` in order,
/// ignoring ASCII case.
pub fn fuzzy_match(query: &str, text: &str) -> bool {
    let mut wanted = query.chars().filter(|c| !c.is_whitespace()).peekable();
    for ch in text.chars() {
        match wanted.peek().copied() {
            Some(q) if q.eq_ignore_ascii_case(&ch) => {
                wanted.next();
            }
            Some(_) => {}
            None => break,
        }
    }
    wanted.peek().is_none()
}

//! Tag-list update rules applied between reading and writing a tags file.

/// Ensure `tag` is present, optionally dropping every tag that starts with
/// `strip_prefix` first.
///
/// The result keeps the surviving tags in their original order and appends
/// `tag` at the end when it is not already there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRule {
    pub strip_prefix: Option<String>,
    pub tag: String,
}

impl TagRule {
    pub fn ensure(tag: impl Into<String>) -> Self {
        Self {
            strip_prefix: None,
            tag: tag.into(),
        }
    }

    /// At most one tag under `prefix` survives: `tag` itself.
    pub fn replace_prefixed(prefix: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            strip_prefix: Some(prefix.into()),
            tag: tag.into(),
        }
    }

    pub fn apply(&self, current: &[String]) -> Vec<String> {
        let mut tags: Vec<String> = match &self.strip_prefix {
            Some(prefix) => current
                .iter()
                .filter(|t| !t.starts_with(prefix.as_str()))
                .cloned()
                .collect(),
            None => current.to_vec(),
        };
        if !tags.contains(&self.tag) {
            tags.push(self.tag.clone());
        }
        tags
    }
}

/// Append each of `new` that is not already present, in order.
pub fn add_tags(current: &[String], new: &[String]) -> Vec<String> {
    let mut tags = current.to_vec();
    for tag in new {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// Drop every occurrence of each tag in `gone`.
pub fn remove_tags(current: &[String], gone: &[String]) -> Vec<String> {
    current
        .iter()
        .filter(|t| !gone.contains(t))
        .cloned()
        .collect()
}

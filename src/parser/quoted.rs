//! Quoted-string scanning shared by the tag reader.

/// Extract every double-quoted token from `fragment`, left to right.
///
/// A `"` opens a token and the next `"` closes it. Backslashes are not
/// interpreted, so `\"` ends the token with a trailing `\`. Empty tokens are
/// dropped, and a token left open at the end of the fragment is kept.
pub fn extract(fragment: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut inside = false;
    let mut current = String::new();

    for ch in fragment.chars() {
        if ch == '"' {
            if inside {
                push_token(&mut tokens, &mut current);
            }
            inside = !inside;
        } else if inside {
            current.push(ch);
        }
    }

    if inside {
        push_token(&mut tokens, &mut current);
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        tokens.push(std::mem::take(current));
    }
}

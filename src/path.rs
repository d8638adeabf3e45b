//! Request-target and route-path normalization.

use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum MalformedPath {
    #[error("illegal character {0:?} in path")]
    IllegalChar(char),
    #[error("invalid percent escape at byte {0}")]
    InvalidEscape(usize),
    #[error("path is not valid unicode after cleaning")]
    NotUnicode,
}

/// Turns a raw request target into the canonical absolute path used for
/// lookups: query and fragment stripped, `.`/`..` resolved, one trailing
/// slash kept if the target had one.
pub fn normalize_path(raw: &str) -> Option<String> {
    match try_normalize_path(raw) {
        Ok(path) => Some(path),
        Err(err) => {
            debug!(raw, %err, "malformed request target");
            None
        }
    }
}

pub fn try_normalize_path(raw: &str) -> Result<String, MalformedPath> {
    let end = raw.find(['?', '#']).unwrap_or(raw.len());
    let path = &raw[..end];
    validate(path)?;

    let rooted = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{}", path)
    };

    let cleaned = path_clean::clean(&rooted);
    let mut cleaned = cleaned.to_str().ok_or(MalformedPath::NotUnicode)?.to_owned();
    if rooted.len() > 1 && rooted.ends_with('/') && cleaned != "/" {
        cleaned.push('/');
    }
    Ok(cleaned)
}

/// Normalizes a declared route path: leading slash added, trailing slash
/// dropped except for the root.
pub fn canonical_route_path(declared: &str) -> String {
    let mut path = if declared.starts_with('/') {
        declared.to_owned()
    } else {
        format!("/{}", declared)
    };
    while path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    path
}

fn validate(path: &str) -> Result<(), MalformedPath> {
    if let Some(c) = path.chars().find(|c| c.is_whitespace() || c.is_control()) {
        return Err(MalformedPath::IllegalChar(c));
    }

    let bytes = path.as_bytes();
    for (idx, _) in path.match_indices('%') {
        let hex = bytes.get(idx + 1..idx + 3);
        if !hex.is_some_and(|h| h.iter().all(u8::is_ascii_hexdigit)) {
            return Err(MalformedPath::InvalidEscape(idx));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{canonical_route_path, normalize_path, try_normalize_path, MalformedPath};

    #[test]
    fn test_normalize_path_ok() {
        let tests = [
            ("/", "/"),
            ("", "/"),
            ("users/42", "/users/42"),
            ("/users/42?expand=true", "/users/42"),
            ("/users/42#top", "/users/42"),
            ("/users/./42", "/users/42"),
            ("/users/7/../42", "/users/42"),
            ("/../../etc", "/etc"),
            ("/users//42", "/users/42"),
            ("/users/42/", "/users/42/"),
            ("/users/42/..", "/users"),
            ("/a%20b", "/a%20b"),
        ];

        for (raw, want) in tests {
            assert_eq!(normalize_path(raw).as_deref(), Some(want), "raw: {raw}");
        }
    }

    #[test]
    fn test_normalize_path_malformed() {
        assert_eq!(
            try_normalize_path("/a b"),
            Err(MalformedPath::IllegalChar(' '))
        );
        assert_eq!(
            try_normalize_path("/a%zz"),
            Err(MalformedPath::InvalidEscape(2))
        );
        assert_eq!(
            try_normalize_path("/a%2"),
            Err(MalformedPath::InvalidEscape(2))
        );
        assert!(normalize_path("/tab\there").is_none());
    }

    #[test]
    fn test_canonical_route_path() {
        let tests = [
            ("/", "/"),
            ("/items/", "/items"),
            ("items", "/items"),
            ("/items//", "/items"),
        ];

        for (declared, want) in tests {
            assert_eq!(canonical_route_path(declared), want);
        }
    }
}

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::{path::canonical_route_path, router::RouteError};

lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r":\w+|\{[^{}/]*\}").unwrap();
}

/// One path segment, no `/`.
const VARIABLE_REPLACE: &str = "([^/]+)";
/// Everything under a prefix.
const WILDCARD_REPLACE: &str = "/.*";

/// A declared route path compiled into a matchable form.
///
/// `fragment` is always a single capturing group wrapping the whole path,
/// with one nested group per variable in declaration order. Static paths
/// have no variables and are matched by key rather than by regex, except
/// in the hook table.
#[derive(Clone, Debug)]
pub struct PathPattern {
    path: String,
    fragment: String,
    variables: Vec<String>,
    wildcard: bool,
}

impl PathPattern {
    pub fn compile(declared: &str) -> Result<Self, RouteError> {
        let path = canonical_route_path(declared);
        if path.contains(['?', '#']) || path.chars().any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(RouteError::InvalidPath { path });
        }

        let (body, wildcard) = if let Some(prefix) = path.strip_suffix("/**") {
            (prefix, true)
        } else if let Some(prefix) = path.strip_suffix("/*") {
            (prefix, true)
        } else {
            (path.as_str(), false)
        };

        let mut fragment = String::from("(");
        let mut variables: Vec<String> = vec![];
        let mut last = 0;
        for token in VARIABLE.find_iter(body) {
            push_literal(&mut fragment, &body[last..token.start()], &path)?;

            let text = token.as_str();
            let name = match text.strip_prefix('{') {
                Some(braced) => braced.trim_end_matches('}'),
                None => &text[1..],
            };
            if name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
                return Err(RouteError::InvalidVariable {
                    path: path.clone(),
                    name: name.to_owned(),
                });
            }
            if variables.iter().any(|v| v == name) {
                return Err(RouteError::DuplicateVariable {
                    path: path.clone(),
                    name: name.to_owned(),
                });
            }

            fragment.push_str(VARIABLE_REPLACE);
            variables.push(name.to_owned());
            last = token.end();
        }
        push_literal(&mut fragment, &body[last..], &path)?;
        if wildcard {
            fragment.push_str(WILDCARD_REPLACE);
        }
        fragment.push(')');

        Ok(Self {
            path,
            fragment,
            variables,
            wildcard,
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lookup key for the static table. Literal matching ignores case.
    pub fn key(&self) -> String {
        self.path.to_lowercase()
    }

    pub fn is_static(&self) -> bool {
        self.variables.is_empty() && !self.wildcard
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Capture groups the fragment contributes: the outer one plus one per
    /// variable.
    pub fn group_count(&self) -> usize {
        1 + self.variables.len()
    }

    /// Standalone anchored regex for direct per-pattern testing.
    pub fn to_regex(&self) -> Result<Regex, RouteError> {
        build_regex(format!("^{}$", self.fragment))
    }
}

fn push_literal(fragment: &mut String, literal: &str, path: &str) -> Result<(), RouteError> {
    if literal.contains(['{', '}']) {
        return Err(RouteError::UnclosedVariable {
            path: path.to_owned(),
        });
    }
    fragment.push_str(&regex::escape(literal));
    Ok(())
}

pub(crate) fn build_regex(pattern: String) -> Result<Regex, RouteError> {
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RouteError::Regex { pattern, source })
}

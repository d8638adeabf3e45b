use thiserror::Error;

/// Registration-time failures. Any of these aborts startup; lookups never
/// produce one.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("invalid route path {path:?}")]
    InvalidPath { path: String },
    #[error("unclosed variable in route path {path:?}")]
    UnclosedVariable { path: String },
    #[error("invalid variable name {name:?} in route path {path:?}")]
    InvalidVariable { path: String, name: String },
    #[error("variable {name:?} declared twice in route path {path:?}")]
    DuplicateVariable { path: String, name: String },
    #[error("pattern {pattern:?} has {actual} capture groups, expected {expected}")]
    GroupMismatch {
        pattern: String,
        expected: usize,
        actual: usize,
    },
    #[error("cannot compile pattern {pattern:?}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

use std::{fmt, sync::Arc};

use crate::{handler::RouteHandler, http_method::HttpMethod};

use super::matcher::PathPattern;

/// A registered binding. Immutable once built; every lookup result points
/// at it through an `Arc` and carries its own bindings.
#[derive(Debug)]
pub struct Route {
    http_method: HttpMethod,
    pattern: PathPattern,
    handler: RouteHandler,
    priority: i32,
}

impl Route {
    pub(crate) fn new(
        http_method: HttpMethod,
        pattern: PathPattern,
        handler: RouteHandler,
        priority: i32,
    ) -> Self {
        Self {
            http_method,
            pattern,
            handler,
            priority,
        }
    }

    pub fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// The declared path, canonicalized.
    pub fn path(&self) -> &str {
        self.pattern.path()
    }

    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.http_method, self.path())
    }
}

/// Path variables in declaration order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for PathParams {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of a successful lookup. Created per request.
#[derive(Clone, Debug)]
pub struct RouteMatch {
    route: Arc<Route>,
    params: PathParams,
}

impl RouteMatch {
    pub(crate) fn new(route: Arc<Route>, params: PathParams) -> Self {
        Self { route, params }
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    pub fn into_parts(self) -> (Arc<Route>, PathParams) {
        (self.route, self.params)
    }
}

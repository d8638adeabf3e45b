use std::{collections::HashMap, sync::Arc};

use crate::{http_method::HttpMethod, router::Route};

/// Static routes keyed by lower-cased path, then method.
#[derive(Debug, Default)]
pub struct Exact(HashMap<String, HashMap<HttpMethod, Arc<Route>>>);

impl Exact {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    pub fn add_route(&mut self, route: Arc<Route>) {
        assert!(route.pattern().is_static());
        self.0
            .entry(route.pattern().key())
            .or_default()
            .insert(route.http_method(), route);
    }

    /// `key` must already be lower-cased.
    pub fn pattern_match(&self, http_method: HttpMethod, key: &str) -> Option<&Arc<Route>> {
        self.0.get(key)?.get(&http_method)
    }

    pub fn len(&self) -> usize {
        self.0.values().map(HashMap::len).sum()
    }
}

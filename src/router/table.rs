use std::{collections::HashMap, sync::Arc};

use strum::IntoEnumIterator;
use tracing::{debug, trace};

use crate::{
    http_method::{HookKind, HttpMethod},
    path::normalize_path,
};

use super::{
    matcher::{Dynamic, DynamicBuilder, Exact, Hooks},
    Route, RouteError, RouteMatch,
};

/// One compiled generation of routes. Read-only once built, so lookups
/// from any number of threads need no locking.
#[derive(Default)]
pub struct RouteTable {
    exact: Exact,
    dynamic: HashMap<HttpMethod, Dynamic>,
    hooks: Hooks,
    middlewares: Vec<Arc<Route>>,
}

impl RouteTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn compile<'a>(
        routes: impl IntoIterator<Item = &'a Arc<Route>>,
        hooks: &[Arc<Route>],
        middlewares: &[Arc<Route>],
    ) -> Result<Self, RouteError> {
        let mut exact = Exact::new();
        let mut builders: HashMap<HttpMethod, DynamicBuilder> = HashMap::new();
        for route in routes {
            if route.pattern().is_static() {
                exact.add_route(Arc::clone(route));
            } else {
                builders
                    .entry(route.http_method())
                    .or_insert_with(DynamicBuilder::new)
                    .add_route(Arc::clone(route));
            }
        }

        let mut dynamic = HashMap::with_capacity(builders.len());
        for (http_method, builder) in builders {
            if builder.is_empty() {
                continue;
            }
            let compiled = builder.build()?;
            debug!(%http_method, regex = compiled.as_str(), "compiled dynamic routes");
            dynamic.insert(http_method, compiled);
        }

        let mut hook_table = Hooks::new();
        for hook in hooks {
            hook_table.add_hook(Arc::clone(hook))?;
        }

        Ok(Self {
            exact,
            dynamic,
            hooks: hook_table,
            middlewares: middlewares.to_vec(),
        })
    }

    /// Resolves a request target. Static routes win over dynamic ones, the
    /// request's own method over `ALL`.
    pub fn lookup(&self, http_method: HttpMethod, path: &str) -> Option<RouteMatch> {
        let path = normalize_path(path)?;
        let key = path.to_lowercase();

        for candidate in [http_method, HttpMethod::All] {
            if let Some(route) = self.exact.pattern_match(candidate, &key) {
                trace!(%path, route = %route, "static match");
                return Some(RouteMatch::new(Arc::clone(route), Default::default()));
            }
        }

        if let Some(m) = self
            .dynamic
            .get(&http_method)
            .and_then(|dynamic| dynamic.pattern_match(&path))
        {
            return Some(m);
        }
        self.dynamic
            .get(&HttpMethod::All)
            .and_then(|dynamic| dynamic.pattern_match(&path))
    }

    pub fn hooks_before(&self, path: &str) -> Vec<Arc<Route>> {
        self.hooks_for(HookKind::Before, path)
    }

    pub fn hooks_after(&self, path: &str) -> Vec<Arc<Route>> {
        self.hooks_for(HookKind::After, path)
    }

    fn hooks_for(&self, kind: HookKind, path: &str) -> Vec<Arc<Route>> {
        match normalize_path(path) {
            Some(path) => self.hooks.matching(kind, &path),
            None => vec![],
        }
    }

    pub fn middlewares(&self) -> &[Arc<Route>] {
        &self.middlewares
    }

    /// Request methods with a route of their own for `path`, ignoring `ALL`.
    pub fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        let Some(path) = normalize_path(path) else {
            return vec![];
        };
        let key = path.to_lowercase();

        HttpMethod::iter()
            .filter(|m| m.is_verb())
            .filter(|m| {
                self.exact.pattern_match(*m, &key).is_some()
                    || self.dynamic.get(m).is_some_and(|d| d.is_match(&path))
            })
            .collect()
    }

    pub fn route_count(&self) -> usize {
        self.exact.len() + self.dynamic.values().map(Dynamic::len).sum::<usize>()
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

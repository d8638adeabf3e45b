use std::{collections::HashMap, sync::Arc};

use tracing::{debug, info, warn};

use crate::{
    handler::{Handler, RouteHandler, WebHook},
    http_method::{HookKind, HttpMethod},
};

pub use error::RouteError;
pub use matcher::PathPattern;
pub use route::{PathParams, Route, RouteMatch};
pub use table::RouteTable;

mod error;
mod matcher;
mod route;
mod table;

/// Registers routes and hooks, then answers lookups against the table
/// compiled by the last `register`.
///
/// Registration takes `&mut self` and happens before the matcher is
/// shared. To swap routes under live traffic, build a new matcher and
/// publish its `table()` atomically, e.g. through `Dispatcher::reload`.
pub struct RouteMatcher {
    routes: Vec<Arc<Route>>,
    keys: HashMap<(HttpMethod, String), usize>,
    hooks: Vec<Arc<Route>>,
    middlewares: Vec<Arc<Route>>,
    table: Arc<RouteTable>,
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteMatcher {
    pub fn new() -> Self {
        Self {
            routes: vec![],
            keys: HashMap::new(),
            hooks: vec![],
            middlewares: vec![],
            table: Arc::new(RouteTable::empty()),
        }
    }

    /// Adds a route. `BEFORE`/`AFTER` routes go to the hook table. A route
    /// whose method and path are already registered replaces the earlier
    /// one in place.
    pub fn add_route(
        &mut self,
        http_method: HttpMethod,
        path: &str,
        handler: RouteHandler,
        priority: i32,
    ) -> Result<Arc<Route>, RouteError> {
        if let Ok(kind) = HookKind::try_from(http_method) {
            return self.add_hook(kind, path, handler, priority);
        }

        let pattern = PathPattern::compile(path)?;
        let key = (http_method, pattern.key());
        let route = Arc::new(Route::new(http_method, pattern, handler, priority));

        match self.keys.get(&key) {
            Some(&idx) => {
                warn!("route {} already registered, replacing it", route);
                self.routes[idx] = Arc::clone(&route);
            }
            None => {
                self.keys.insert(key, self.routes.len());
                self.routes.push(Arc::clone(&route));
            }
        }
        debug!("add route => {}", route);
        Ok(route)
    }

    pub fn route(
        &mut self,
        http_method: HttpMethod,
        path: &str,
        handler: impl Handler + 'static,
    ) -> Result<Arc<Route>, RouteError> {
        self.add_route(http_method, path, RouteHandler::func(handler), 0)
    }

    /// Adds a hook. Hooks sharing a path accumulate; none is replaced.
    pub fn add_hook(
        &mut self,
        kind: HookKind,
        path: &str,
        handler: RouteHandler,
        priority: i32,
    ) -> Result<Arc<Route>, RouteError> {
        let pattern = PathPattern::compile(path)?;
        let route = Arc::new(Route::new(kind.into(), pattern, handler, priority));
        // Compile now so a bad hook path fails here rather than at register.
        route.pattern().to_regex()?;
        self.hooks.push(Arc::clone(&route));
        debug!("add hook  => {}", route);
        Ok(route)
    }

    pub fn before(
        &mut self,
        path: &str,
        handler: impl Handler + 'static,
        priority: i32,
    ) -> Result<Arc<Route>, RouteError> {
        self.add_hook(HookKind::Before, path, RouteHandler::func(handler), priority)
    }

    pub fn after(
        &mut self,
        path: &str,
        handler: impl Handler + 'static,
        priority: i32,
    ) -> Result<Arc<Route>, RouteError> {
        self.add_hook(HookKind::After, path, RouteHandler::func(handler), priority)
    }

    /// Turns each web hook into a `BEFORE` route on every path, sorted by
    /// its `order`. Takes effect on the next `register`.
    pub fn init_middlewares(&mut self, hooks: Vec<Arc<dyn WebHook>>) -> Result<(), RouteError> {
        let mut middlewares = Vec::with_capacity(hooks.len());
        for hook in hooks {
            let priority = hook.order();
            let pattern = PathPattern::compile("/*")?;
            middlewares.push(Arc::new(Route::new(
                HttpMethod::Before,
                pattern,
                RouteHandler::Hook(hook),
                priority,
            )));
        }
        middlewares.sort_by_key(|route| route.priority());
        self.middlewares = middlewares;
        Ok(())
    }

    /// Compiles everything added so far into a fresh table. Running it
    /// again without new registrations yields an equivalent table.
    pub fn register(&mut self) -> Result<(), RouteError> {
        for route in &self.routes {
            info!("add route => {}", route);
        }
        for hook in &self.hooks {
            info!("add hook  => {}", hook);
        }

        let table = RouteTable::compile(&self.routes, &self.hooks, &self.middlewares)?;
        self.table = Arc::new(table);
        Ok(())
    }

    /// Drops every route, hook and middleware and publishes an empty table.
    pub fn clear(&mut self) {
        self.routes.clear();
        self.keys.clear();
        self.hooks.clear();
        self.middlewares.clear();
        self.table = Arc::new(RouteTable::empty());
    }

    /// The table compiled by the last `register`.
    pub fn table(&self) -> Arc<RouteTable> {
        Arc::clone(&self.table)
    }

    pub fn lookup(&self, http_method: HttpMethod, path: &str) -> Option<RouteMatch> {
        self.table.lookup(http_method, path)
    }

    pub fn hooks_before(&self, path: &str) -> Vec<Arc<Route>> {
        self.table.hooks_before(path)
    }

    pub fn hooks_after(&self, path: &str) -> Vec<Arc<Route>> {
        self.table.hooks_after(path)
    }

    pub fn middlewares(&self) -> &[Arc<Route>] {
        self.table.middlewares()
    }

    pub fn allowed_methods(&self, path: &str) -> Vec<HttpMethod> {
        self.table.allowed_methods(path)
    }
}

use std::sync::Arc;

use regex::Regex;

use crate::{
    http_method::{HookKind, HttpMethod},
    router::{Route, RouteError},
};

/// Before/after hooks in registration order. Hooks are few, so each one is
/// tested on its own rather than folded into an alternation.
#[derive(Default)]
pub struct Hooks(Vec<(Arc<Route>, Regex)>);

impl Hooks {
    pub fn new() -> Self {
        Self(vec![])
    }

    pub fn add_hook(&mut self, route: Arc<Route>) -> Result<(), RouteError> {
        assert!(route.http_method().is_hook());
        let regex = route.pattern().to_regex()?;
        self.0.push((route, regex));
        Ok(())
    }

    /// Hooks of `kind` whose pattern matches `path`, lowest priority first.
    /// Equal priorities keep registration order.
    pub fn matching(&self, kind: HookKind, path: &str) -> Vec<Arc<Route>> {
        let http_method = HttpMethod::from(kind);
        let mut hooks: Vec<_> = self
            .0
            .iter()
            .filter(|(route, regex)| route.http_method() == http_method && regex.is_match(path))
            .map(|(route, _)| Arc::clone(route))
            .collect();
        hooks.sort_by_key(|route| route.priority());
        hooks
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        http_method::{HookKind, HttpMethod},
        router::{matcher::PathPattern, Route},
        test_utils::noop_handler,
    };

    use super::Hooks;

    fn hook(kind: HookKind, path: &str, priority: i32) -> Arc<Route> {
        let pattern = PathPattern::compile(path).unwrap();
        Arc::new(Route::new(kind.into(), pattern, noop_handler(), priority))
    }

    fn paths(hooks: &[Arc<Route>]) -> Vec<(&str, i32)> {
        hooks.iter().map(|h| (h.path(), h.priority())).collect()
    }

    #[test]
    fn test_priority_order() {
        let mut hooks = Hooks::new();
        hooks.add_hook(hook(HookKind::Before, "/admin/*", 5)).unwrap();
        hooks.add_hook(hook(HookKind::Before, "/admin/*", 1)).unwrap();
        hooks.add_hook(hook(HookKind::Before, "*", 3)).unwrap();

        let got = hooks.matching(HookKind::Before, "/admin/users");
        assert_eq!(got.len(), 3);
        assert_eq!(
            paths(&got),
            vec![("/admin/*", 1), ("/*", 3), ("/admin/*", 5)]
        );
    }

    #[test]
    fn test_ties_keep_registration_order() {
        let mut hooks = Hooks::new();
        for path in ["/a/:x", "/a/*", "/a/{y}"] {
            hooks.add_hook(hook(HookKind::After, path, 0)).unwrap();
        }

        let got = hooks.matching(HookKind::After, "/a/1");
        assert_eq!(
            paths(&got),
            vec![("/a/:x", 0), ("/a/*", 0), ("/a/{y}", 0)]
        );
    }

    #[test]
    fn test_kind_and_path_filter() {
        let mut hooks = Hooks::new();
        hooks.add_hook(hook(HookKind::Before, "/users/:id", 0)).unwrap();
        hooks.add_hook(hook(HookKind::After, "/users/:id", 0)).unwrap();
        hooks.add_hook(hook(HookKind::Before, "/login", 0)).unwrap();

        let got = hooks.matching(HookKind::Before, "/Users/9");
        assert_eq!(paths(&got), vec![("/users/:id", 0)]);
        assert_eq!(got[0].http_method(), HttpMethod::Before);

        assert!(hooks.matching(HookKind::After, "/login").is_empty());
        assert!(hooks.matching(HookKind::Before, "/users/9/edit").is_empty());
        assert_eq!(hooks.len(), 3);
    }
}

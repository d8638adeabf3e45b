use std::sync::Arc;

use regex::Regex;
use tracing::trace;

use crate::router::{PathParams, Route, RouteError, RouteMatch};

use super::pattern::build_regex;

struct Slot {
    /// Index of the route's outer group in the combined pattern.
    group: usize,
    route: Arc<Route>,
}

/// All dynamic routes of one method, folded into a single alternation.
///
/// The i-th alternative is the i-th route added. Alternation is tried left
/// to right and the whole path must match, so on overlap the earliest
/// route wins.
pub struct Dynamic {
    regex: Regex,
    slots: Vec<Slot>,
}

pub struct DynamicBuilder {
    pattern: String,
    slots: Vec<Slot>,
    next_group: usize,
}

impl DynamicBuilder {
    pub fn new() -> Self {
        Self {
            pattern: String::new(),
            slots: vec![],
            next_group: 1,
        }
    }

    pub fn add_route(&mut self, route: Arc<Route>) {
        let pattern = route.pattern();
        assert!(!pattern.is_static());
        self.pattern.push_str(pattern.fragment());
        self.pattern.push('|');
        let group = self.next_group;
        self.next_group += pattern.group_count();
        self.slots.push(Slot { group, route });
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn build(mut self) -> Result<Dynamic, RouteError> {
        self.pattern.pop();
        let pattern = format!("^(?:{})$", self.pattern);
        let regex = build_regex(pattern)?;

        // Slot bookkeeping must agree with what the regex engine sees, or
        // bindings would be read from the wrong groups.
        let actual = regex.captures_len() - 1;
        let expected = self.next_group - 1;
        if actual != expected {
            return Err(RouteError::GroupMismatch {
                pattern: regex.as_str().to_owned(),
                expected,
                actual,
            });
        }

        Ok(Dynamic {
            regex,
            slots: self.slots,
        })
    }
}

impl Dynamic {
    pub fn pattern_match(&self, path: &str) -> Option<RouteMatch> {
        let caps = self.regex.captures(path)?;
        let slot = self.slots.iter().find(|slot| caps.get(slot.group).is_some())?;

        let variables = slot.route.pattern().variables();
        let mut params = PathParams::with_capacity(variables.len());
        for (offset, name) in variables.iter().enumerate() {
            // A participating alternative binds every one of its groups;
            // anything else means the bookkeeping is off, so fail closed.
            let value = caps.get(slot.group + 1 + offset)?;
            params.push(name.as_str(), value.as_str());
        }

        trace!(path, route = %slot.route, ?params, "dynamic match");
        Some(RouteMatch::new(Arc::clone(&slot.route), params))
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        http_method::HttpMethod,
        router::{matcher::PathPattern, Route},
        test_utils::noop_handler,
    };

    use super::{Dynamic, DynamicBuilder};

    fn build(paths: &[&str]) -> Dynamic {
        let mut builder = DynamicBuilder::new();
        for path in paths {
            let pattern = PathPattern::compile(path).unwrap();
            builder.add_route(Arc::new(Route::new(
                HttpMethod::Get,
                pattern,
                noop_handler(),
                0,
            )));
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_combined_pattern() {
        let dynamic = build(&["/users/:id", "/users/:id/posts/{post}"]);
        assert_eq!(
            dynamic.as_str(),
            "^(?:(/users/([^/]+))|(/users/([^/]+)/posts/([^/]+)))$"
        );
        assert_eq!(dynamic.len(), 2);
    }

    #[test]
    fn test_dynamic_match() {
        let dynamic = build(&[
            "/items/:id",
            "/users/:user/posts/:post",
            "/files/*",
            "/orgs/{org}/repos/{repo}/issues/{number}",
        ]);

        let tests = [
            ("/items/xyz", "/items/:id", vec![("id", "xyz")]),
            (
                "/users/7/posts/hello",
                "/users/:user/posts/:post",
                vec![("user", "7"), ("post", "hello")],
            ),
            ("/files/a/b/c.txt", "/files/*", vec![]),
            (
                "/orgs/rust/repos/regex/issues/99",
                "/orgs/{org}/repos/{repo}/issues/{number}",
                vec![("org", "rust"), ("repo", "regex"), ("number", "99")],
            ),
        ];

        for (path, pattern, params_want) in tests {
            let m = dynamic.pattern_match(path).unwrap();
            assert_eq!(m.route().path(), pattern);
            assert_eq!(m.params().iter().collect::<Vec<_>>(), params_want);
        }
    }

    #[test]
    fn test_dynamic_no_match() {
        let dynamic = build(&["/items/:id"]);

        assert!(dynamic.pattern_match("/items").is_none());
        assert!(dynamic.pattern_match("/items/").is_none());
        assert!(dynamic.pattern_match("/items/xyz/").is_none());
        assert!(dynamic.pattern_match("/items/xy/z").is_none());
        assert!(dynamic.pattern_match("/itemsxyz").is_none());
        assert!(dynamic.pattern_match("/prefix/items/xyz").is_none());
    }

    #[test]
    fn test_earliest_registration_wins() {
        let dynamic = build(&["/posts/:slug", "/posts/{id}", "/posts/*"]);
        let m = dynamic.pattern_match("/posts/42").unwrap();
        assert_eq!(m.route().path(), "/posts/:slug");
        assert_eq!(m.params().get("slug"), Some("42"));

        let dynamic = build(&["/posts/*", "/posts/:slug"]);
        let m = dynamic.pattern_match("/posts/42").unwrap();
        assert_eq!(m.route().path(), "/posts/*");
        assert!(m.params().is_empty());
    }

    #[test]
    fn test_group_bookkeeping() {
        let paths = ["/a/:x", "/b/:x/:y/:z", "/c/*", "/d/{w}/*", "/e/:p/:q"];
        let dynamic = build(&paths);
        for (idx, slot) in dynamic.slots.iter().enumerate() {
            let pattern = slot.route.pattern();
            assert_eq!(slot.route.path(), PathPattern::compile(paths[idx]).unwrap().path());
            let next = dynamic
                .slots
                .get(idx + 1)
                .map_or(dynamic.regex.captures_len(), |s| s.group);
            assert_eq!(next - slot.group, 1 + pattern.variables().len());
        }

        let m = dynamic.pattern_match("/e/1/2").unwrap();
        assert_eq!(m.params().get("p"), Some("1"));
        assert_eq!(m.params().get("q"), Some("2"));
    }
}

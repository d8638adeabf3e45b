//! Route declarations read from a text file.
//!
//! One declaration per line: `METHOD PATH [PRIORITY]`. Blank lines and
//! lines starting with `#` are skipped.
//!
//! ```text
//! # users
//! GET    /users/:id
//! POST   /users
//! BEFORE /admin/*   10
//! ```

use std::{fs, path::Path, str::FromStr};

use anyhow::{bail, Context};
use tracing::info;

use crate::{handler::RouteHandler, http_method::HttpMethod, router::RouteMatcher};

#[derive(Debug, Eq, PartialEq)]
pub struct RouteDecl {
    pub http_method: HttpMethod,
    pub path: String,
    pub priority: i32,
    pub line: usize,
}

pub fn parse_routes(contents: &str) -> anyhow::Result<Vec<RouteDecl>> {
    let mut decls = vec![];
    for (idx, line) in contents.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(http_method), Some(path)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected `METHOD PATH [PRIORITY]`", line_no);
        };
        let http_method = HttpMethod::from_str(http_method)
            .with_context(|| format!("line {}: unknown method {:?}", line_no, http_method))?;
        let priority = match fields.next() {
            Some(priority) => priority
                .parse()
                .with_context(|| format!("line {}: invalid priority {:?}", line_no, priority))?,
            None => 0,
        };
        if let Some(extra) = fields.next() {
            bail!("line {}: unexpected {:?}", line_no, extra);
        }

        decls.push(RouteDecl {
            http_method,
            path: path.to_owned(),
            priority,
            line: line_no,
        });
    }
    Ok(decls)
}

pub fn load_routes(path: impl AsRef<Path>) -> anyhow::Result<Vec<RouteDecl>> {
    let path = path.as_ref();
    let contents =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let decls = parse_routes(&contents).with_context(|| format!("in {}", path.display()))?;
    info!(file = %path.display(), count = decls.len(), "loaded routes");
    Ok(decls)
}

/// Adds every declaration to `matcher`, building handlers with `handler`.
pub fn add_all(
    matcher: &mut RouteMatcher,
    decls: &[RouteDecl],
    handler: impl Fn(&RouteDecl) -> RouteHandler,
) -> anyhow::Result<()> {
    for decl in decls {
        matcher
            .add_route(decl.http_method, &decl.path, handler(decl), decl.priority)
            .with_context(|| format!("line {}", decl.line))?;
    }
    Ok(())
}

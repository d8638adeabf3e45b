use std::{str::FromStr, sync::Arc};

use arc_swap::ArcSwap;
use tracing::{error, info, span, warn, Level, Span};

use crate::{
    handler::Flow,
    http_method::HttpMethod,
    path::normalize_path,
    request::Request,
    response_writer::ResponseWriter,
    router::{Route, RouteTable},
    status_code_registry::ReasonPhrase,
};

/// Runs requests through middlewares, hooks and the matched route.
///
/// The route table is published through an `ArcSwap`: `reload` replaces
/// it in one pointer swap, and each dispatch works against the single
/// generation it loaded first.
pub struct Dispatcher {
    table: ArcSwap<RouteTable>,
}

impl Dispatcher {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table: ArcSwap::new(table),
        }
    }

    pub fn reload(&self, table: Arc<RouteTable>) {
        info!(
            routes = table.route_count(),
            hooks = table.hook_count(),
            "reload routes"
        );
        self.table.store(table);
    }

    pub fn table(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    pub fn dispatch(&self, http_method: &str, request_target: &str) -> ResponseWriter {
        let span = create_req_span(http_method, request_target);
        let _guard = span.enter();

        let mut w = ResponseWriter::new_empty();
        let http_method = match HttpMethod::from_str(http_method) {
            Ok(m) if m.is_verb() => m,
            _ => {
                warn!("unsupported method");
                w.set_reason_phrase(ReasonPhrase::BadRequest);
                return w;
            }
        };
        let Some(path) = normalize_path(request_target) else {
            w.set_reason_phrase(ReasonPhrase::BadRequest);
            return w;
        };

        let table = self.table.load_full();
        let mut r = Request::new(http_method, path);
        if let Err(err) = handle(&table, &mut w, &mut r) {
            error!(?err);
            w = ResponseWriter::new_empty();
            w.set_reason_phrase(ReasonPhrase::InternalServerError);
        }
        w
    }
}

fn handle(table: &RouteTable, w: &mut ResponseWriter, r: &mut Request) -> anyhow::Result<()> {
    let path = r.get_path().to_owned();

    let Some(m) = table.lookup(r.get_http_method(), &path) else {
        let allowed_methods = table.allowed_methods(&path);
        if !allowed_methods.is_empty() {
            w.add_allow_header(&allowed_methods);
            w.set_reason_phrase(ReasonPhrase::MethodNotAllowed);
            return Ok(());
        }
        w.set_reason_phrase(ReasonPhrase::NotFound);
        return Ok(());
    };
    info!("match: {}", m.route().path());

    let (route, params) = m.into_parts();
    r.set_params(params);

    if run_chain(table.middlewares(), w, r)? == Flow::Halt {
        return Ok(());
    }
    if run_chain(&table.hooks_before(&path), w, r)? == Flow::Halt {
        return Ok(());
    }

    route.handler().invoke(w, r)?;

    run_chain(&table.hooks_after(&path), w, r)?;
    for middleware in table.middlewares() {
        if middleware.handler().invoke_after(w, r)? == Flow::Halt {
            break;
        }
    }

    if w.get_status_code().is_none() {
        w.set_reason_phrase(ReasonPhrase::OK);
    }
    Ok(())
}

fn run_chain(
    hooks: &[Arc<Route>],
    w: &mut ResponseWriter,
    r: &mut Request,
) -> anyhow::Result<Flow> {
    for hook in hooks {
        if hook.handler().invoke(w, r)? == Flow::Halt {
            info!("halted by {}", hook);
            return Ok(Flow::Halt);
        }
    }
    Ok(Flow::Continue)
}

fn create_req_span(http_method: &str, request_target: &str) -> Span {
    span!(
        Level::INFO,
        "req",
        method = http_method,
        target = request_target
    )
}

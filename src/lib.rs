pub use dispatcher::Dispatcher;
pub use handler::{Flow, Handler, HandlerResult, RouteHandler, Target, WebHook};
pub use http_method::{HookKind, HttpMethod};
pub use path::{normalize_path, MalformedPath};
pub use request::Request;
pub use response_writer::ResponseWriter;
pub use router::{PathParams, PathPattern, Route, RouteError, RouteMatch, RouteMatcher, RouteTable};
pub use status_code_registry::ReasonPhrase;

mod dispatcher;
mod handler;
mod http_method;
mod path;
mod request;
mod response_writer;
pub mod route_file;
mod router;
mod status_code_registry;
#[cfg(test)]
mod test_utils;

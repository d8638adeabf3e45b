use tracing::Level;

use crate::{
    handler::{Flow, HandlerResult, RouteHandler},
    http_method::HttpMethod,
    request::Request,
    response_writer::ResponseWriter,
};

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn noop_handler() -> RouteHandler {
    RouteHandler::func(|_: &mut ResponseWriter, _: &mut Request| -> HandlerResult {
        Ok(Flow::Continue)
    })
}

/// Writes `tag` into the body so tests can tell handlers apart.
pub fn tagged_handler(tag: &str) -> RouteHandler {
    let tag = tag.to_owned();
    RouteHandler::func(move |w: &mut ResponseWriter, _: &mut Request| -> HandlerResult {
        w.set_body_str(&tag);
        Ok(Flow::Continue)
    })
}

pub fn invoke_body(handler: &RouteHandler) -> String {
    let mut w = ResponseWriter::new_empty();
    let mut r = Request::new(HttpMethod::Get, "/");
    handler.invoke(&mut w, &mut r).unwrap();
    String::from_utf8(w.get_body().to_vec()).unwrap()
}

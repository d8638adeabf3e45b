use std::{
    fmt,
    sync::{Arc, OnceLock},
};

use tracing::debug;

use crate::{request::Request, response_writer::ResponseWriter};

/// Whether dispatch continues past a hook.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Flow {
    Continue,
    Halt,
}

pub type HandlerResult = anyhow::Result<Flow>;

pub trait Handler: Send + Sync {
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult;
}

impl<T> Handler for T
where
    T: Fn(&mut ResponseWriter, &mut Request) -> HandlerResult + Send + Sync,
{
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult {
        self(w, r)
    }
}

/// Cross-cutting handler applied to every request. `order` sorts
/// middlewares, lower first.
pub trait WebHook: Send + Sync {
    fn before(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult;

    fn after(&self, _w: &mut ResponseWriter, _r: &mut Request) -> HandlerResult {
        Ok(Flow::Continue)
    }

    fn order(&self) -> i32 {
        0
    }
}

/// A controller instance created on first use and shared by every route
/// bound to it.
pub struct Target<T> {
    name: &'static str,
    instance: OnceLock<T>,
    factory: fn() -> T,
}

impl<T: Send + Sync + 'static> Target<T> {
    pub fn new(name: &'static str, factory: fn() -> T) -> Arc<Self> {
        Arc::new(Self {
            name,
            instance: OnceLock::new(),
            factory,
        })
    }

    pub fn get(&self) -> &T {
        self.instance.get_or_init(|| {
            debug!(target_name = self.name, "create controller");
            (self.factory)()
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.instance.get().is_some()
    }

    /// Binds a method of the controller into a route handler.
    pub fn bind(
        self: &Arc<Self>,
        method: fn(&T, &mut ResponseWriter, &mut Request) -> HandlerResult,
    ) -> RouteHandler {
        RouteHandler::Method(Arc::new(BoundMethod {
            target: Arc::clone(self),
            method,
        }))
    }
}

struct BoundMethod<T> {
    target: Arc<Target<T>>,
    method: fn(&T, &mut ResponseWriter, &mut Request) -> HandlerResult,
}

impl<T: Send + Sync + 'static> Handler for BoundMethod<T> {
    fn handle(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult {
        (self.method)(self.target.get(), w, r)
    }
}

#[derive(Clone)]
pub enum RouteHandler {
    Func(Arc<dyn Handler>),
    Method(Arc<dyn Handler>),
    Hook(Arc<dyn WebHook>),
}

impl RouteHandler {
    pub fn func(handler: impl Handler + 'static) -> Self {
        RouteHandler::Func(Arc::new(handler))
    }

    pub fn invoke(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult {
        match self {
            RouteHandler::Func(handler) | RouteHandler::Method(handler) => handler.handle(w, r),
            RouteHandler::Hook(hook) => hook.before(w, r),
        }
    }

    /// After-phase of a middleware. Plain handlers have none.
    pub fn invoke_after(&self, w: &mut ResponseWriter, r: &mut Request) -> HandlerResult {
        match self {
            RouteHandler::Hook(hook) => hook.after(w, r),
            _ => Ok(Flow::Continue),
        }
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteHandler::Func(_) => f.write_str("Func"),
            RouteHandler::Method(_) => f.write_str("Method"),
            RouteHandler::Hook(_) => f.write_str("Hook"),
        }
    }
}

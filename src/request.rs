use crate::{http_method::HttpMethod, router::PathParams};

/// What a handler sees of the request being dispatched.
#[derive(Debug)]
pub struct Request {
    http_method: HttpMethod,
    path: String,
    params: PathParams,
}

impl Request {
    pub fn new(http_method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method,
            path: path.into(),
            params: PathParams::default(),
        }
    }

    pub fn get_http_method(&self) -> HttpMethod {
        self.http_method
    }

    pub fn get_path(&self) -> &str {
        &self.path
    }

    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn get_params(&self) -> &PathParams {
        &self.params
    }

    pub fn set_params(&mut self, params: PathParams) {
        self.params = params;
    }
}

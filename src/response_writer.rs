use crate::{
    http_method::HttpMethod,
    status_code_registry::{self, ReasonPhrase},
};

#[derive(Debug, Default)]
pub struct ResponseWriter {
    status_code: Option<u16>,
    reason_phrase: Option<String>,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl ResponseWriter {
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn get_status_code(&self) -> Option<u16> {
        self.status_code
    }

    pub fn get_reason_phrase(&self) -> Option<&str> {
        self.reason_phrase.as_deref()
    }

    pub fn set_status_code(&mut self, status_code: u16) {
        self.status_code = Some(status_code);
        self.reason_phrase =
            status_code_registry::get_reason_phrase(status_code).map(|r| r.to_string());
    }

    pub fn set_reason_phrase(&mut self, reason_phrase: ReasonPhrase) {
        self.status_code = Some(reason_phrase.status_code());
        self.reason_phrase = Some(reason_phrase.to_string());
    }

    pub fn add_header(&mut self, k: impl Into<String>, v: impl Into<String>) {
        let (k, v) = (k.into(), v.into());
        if let Some(entry) = self
            .headers
            .iter_mut()
            .find(|entry| entry.0.eq_ignore_ascii_case(&k))
        {
            entry.1 = v;
        } else {
            self.headers.push((k, v));
        }
    }

    pub fn get_header(&self, k: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|entry| entry.0.eq_ignore_ascii_case(k))
            .map(|(_, v)| v.as_str())
    }

    pub fn add_allow_header(&mut self, http_methods: &[HttpMethod]) {
        let http_methods = http_methods
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        self.add_header("Allow", http_methods);
    }

    pub fn get_body(&self) -> &[u8] {
        &self.body
    }

    pub fn set_body(&mut self, body: Vec<u8>, content_type: &str) {
        self.body = body;
        self.add_header("Content-Type", content_type);
        self.add_header("Content-Length", self.body.len().to_string());
    }

    pub fn set_body_str(&mut self, body: &str) {
        self.set_body(body.bytes().collect(), "text/plain");
    }
}

use std::fmt::Display;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Statuses the dispatcher can produce on its own. Handlers may set any
/// other code through `ResponseWriter::set_status_code`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, EnumIter)]
#[repr(u16)]
pub enum ReasonPhrase {
    OK = 200,
    BadRequest = 400,
    NotFound = 404,
    MethodNotAllowed = 405,
    InternalServerError = 500,
}

impl ReasonPhrase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OK => "OK",
            Self::BadRequest => "Bad Request",
            Self::NotFound => "Not Found",
            Self::MethodNotAllowed => "Method Not Allowed",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    pub fn status_code(self) -> u16 {
        self as u16
    }
}

impl Display for ReasonPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn get_reason_phrase(status_code: u16) -> Option<ReasonPhrase> {
    ReasonPhrase::iter().find(|r| r.status_code() == status_code)
}

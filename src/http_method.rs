use strum_macros::{Display, EnumIter, EnumString};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Trace,
    Connect,
    /// Runs before the matched route; not a request verb.
    Before,
    /// Runs after the matched route; not a request verb.
    After,
    /// Fallback for any verb without a more specific route.
    All,
}

impl HttpMethod {
    pub fn is_hook(self) -> bool {
        matches!(self, HttpMethod::Before | HttpMethod::After)
    }

    /// Methods a client can actually send.
    pub fn is_verb(self) -> bool {
        !self.is_hook() && self != HttpMethod::All
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum HookKind {
    Before,
    After,
}

impl From<HookKind> for HttpMethod {
    fn from(kind: HookKind) -> Self {
        match kind {
            HookKind::Before => HttpMethod::Before,
            HookKind::After => HttpMethod::After,
        }
    }
}

impl TryFrom<HttpMethod> for HookKind {
    type Error = ();
    fn try_from(value: HttpMethod) -> Result<Self, Self::Error> {
        match value {
            HttpMethod::Before => Ok(HookKind::Before),
            HttpMethod::After => Ok(HookKind::After),
            _ => Err(()),
        }
    }
}

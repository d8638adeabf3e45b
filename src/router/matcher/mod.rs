pub use dynamic::{Dynamic, DynamicBuilder};
pub use exact::Exact;
pub use hooks::Hooks;
pub use pattern::PathPattern;

mod dynamic;
mod exact;
mod hooks;
mod pattern;

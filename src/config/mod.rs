pub mod context;
pub mod settings;

pub use context::{date_key, ContextError, RunContext};
pub use settings::{ConfigError, DigestConfig};

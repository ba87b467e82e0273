mod models;
mod defaults;
mod loader;
mod migration;
mod errors;

pub use models::*;
pub use errors::ConfigError;
pub use loader::{ENV_API_BASE, ENV_API_URL, ENV_STORAGE_URL};

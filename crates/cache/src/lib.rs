mod models;
mod query;

pub use models::{QueryCache, QueryKey};

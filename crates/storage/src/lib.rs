mod backend;
mod file;
mod memory;
mod errors;

pub use backend::{CredentialStore, StoredCredentials};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use errors::*;

pub mod format;
pub mod path;

pub use format::*;
pub use path::*;

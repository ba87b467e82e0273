mod api;
mod parser;
mod reference;
mod fallback;

pub use api::{FilesApi, FILES_RESOURCE};
pub use parser::{parse_file_page, parse_file_resource};
pub use reference::{parse_upload_response, UploadResponse};

mod errors;
mod http;
mod auth;
mod users;
mod files;
mod content;
mod upload;
mod picker;
mod client;

pub use errors::{ApiError, ValidationError};
pub use http::{backend_message, HttpClient};
pub use auth::AuthApi;
pub use users::UsersApi;
pub use content::{parse_entries, parse_entry, CategoriesApi, PostsApi, CATEGORIES_RESOURCE, POSTS_RESOURCE};
pub use files::{parse_file_page, parse_file_resource, parse_upload_response, FilesApi, UploadResponse, FILES_RESOURCE};
pub use upload::{validate, UploadClient};
pub use picker::ResourcePicker;
pub use client::AdminClient;

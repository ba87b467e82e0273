mod validator;
mod client;

pub use validator::validate;
pub use client::UploadClient;

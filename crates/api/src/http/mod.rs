mod client;
mod interceptor;

pub use client::HttpClient;
pub use interceptor::backend_message;

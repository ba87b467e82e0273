mod normalizer;
mod preview;

pub use normalizer::UrlNormalizer;
pub use preview::with_cache_buster;

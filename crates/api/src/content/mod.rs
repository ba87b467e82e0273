mod parser;
mod posts;
mod categories;

pub use parser::{parse_entries, parse_entry};
pub use posts::{PostsApi, POSTS_RESOURCE};
pub use categories::{CategoriesApi, CATEGORIES_RESOURCE};

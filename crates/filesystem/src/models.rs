/// Local disk access for candidate uploads
pub struct FileSystem;

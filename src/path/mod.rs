pub mod error;
pub mod object_path;
pub mod path_cache;

pub mod db;
pub mod directory_file;

pub use db::SqliteAdapter;
pub use directory_file::{load_directory, parse_directory};

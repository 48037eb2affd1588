pub mod config;
pub mod db;
pub mod error;
pub mod models;

pub use config::{DatabaseConfig, DatabaseParams, HttpConfig, WorklogConfig};
pub use error::WorklogError;
pub use models::Entry;

pub mod calculations;
pub mod config;
pub mod models;

pub use config::{RateTableError, TableError, default_rates};
pub use models::*;

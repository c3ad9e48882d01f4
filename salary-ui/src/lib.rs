pub mod csv_export;
pub mod logging;
pub mod session;
pub mod state;
pub mod theme;
pub mod utils;
pub mod views;

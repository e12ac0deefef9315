use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "FichaDIU";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Database file name inside the app data directory
pub const DATABASE_FILE: &str = "ficha_diu.db";

/// Default tracing filter when RUST_LOG is not set
pub fn default_log_filter() -> &'static str {
    "info"
}

/// Get the application data directory
/// ~/FichaDIU/ on all platforms (user-visible, holds the database and exports)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("FichaDIU")
}

/// Get the database path
pub fn database_path() -> PathBuf {
    app_data_dir().join(DATABASE_FILE)
}

/// Get the directory CSV exports are written to
pub fn exports_dir() -> PathBuf {
    app_data_dir().join("exports")
}

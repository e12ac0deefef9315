//! FichaDIU — command-line intake form for IUD insertion records.
//!
//! Collects one patient encounter per session through five fixed clinical
//! sections, persists it into a local SQLite table, and offers listing,
//! name search and CSV export of stored records.

pub mod config;
pub mod db;
pub mod export;
pub mod intake;
pub mod menu;
pub mod models;

use std::fs;
use std::io;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Database(#[from] db::DatabaseError),

    #[error(transparent)]
    Menu(#[from] menu::MenuError),
}

/// Open the store, greet the operator and run the menu loop until quit.
pub fn run() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    fs::create_dir_all(config::app_data_dir())?;
    let conn = db::open_database(&config::database_path())?;

    let mut prompter = intake::Prompter::stdio();
    prompter.line(&"=".repeat(60))?;
    prompter.line("BEM-VINDO AO SISTEMA DE FORMULÁRIO DIU")?;
    prompter.line(&"=".repeat(60))?;

    menu::run_menu(&mut prompter, &conn, &config::exports_dir())?;

    prompter.line("\nObrigado por usar o Sistema de Formulário DIU!")?;
    Ok(())
}

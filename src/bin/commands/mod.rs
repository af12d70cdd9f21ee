pub mod check;
pub mod config;
pub mod expected;
pub mod status;

use exodb::{ConnectionConfig, ExodbConfig};

/// Build the connection from the settings and open it, exiting on failure
pub(crate) fn connect_or_exit(config: &ExodbConfig) -> ConnectionConfig {
    let mut db = match config.connection_config() {
        Ok(db) => db,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = db.connect() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    db
}

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

//! exodb - connection setup and schema check for the crawler database
//!
//! exodb builds the connection to the MySQL/MariaDB database that backs the
//! crawler, and confirms the expected tables and stored procedures exist
//! before the connection is used for anything else. It can be used as both a
//! command-line application and a library.
//!
//! # Feature Flags
//!
//! | Feature | Description | Key Dependencies |
//! |---------|-------------|------------------|
//! | (none) | Connection builder, schema verifier, settings | `mysql`, `config` |
//! | `cli` | `exodb` binary | `clap`, `tracing-subscriber`, `tabled` |
//!
//! ```toml
//! # Library only
//! exodb = { version = "0.1", default-features = false }
//! ```
//!
//! # Architecture
//!
//! - **[`database`]**: connection builder, schema verification, errors
//! - **[`config`]**: settings from `$HOME/.exodb/exodb.toml` and `EXODB_*` variables
//! - **[`utils`]**: output formats shared by the CLI commands
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use exodb::database::ConnectionConfig;
//!
//! let mut db = ConnectionConfig::new("db.example.com")
//!     .port(Some(3306))?
//!     .database("crawler")?
//!     .username("svc")?
//!     .password("secret");
//!
//! db.connect()?;
//! db.check_schema_compatibility()?;
//! ```
//!
//! ## Settings
//!
//! ```rust,ignore
//! use exodb::ExodbConfig;
//!
//! let settings = ExodbConfig::new(&None)?;
//! let mut db = settings.connection_config()?;
//! db.connect()?;
//! ```
//!
//! # Logging
//!
//! Diagnostics are emitted as `tracing` events. The library never installs a
//! subscriber; whoever embeds it decides where the events go.

pub mod config;
pub mod database;
pub mod utils;

pub use config::ExodbConfig;

pub use database::{
    ConnectErrorKind, ConnectionConfig, DatabaseError, DatabaseResult, ErrorClass, SchemaCatalog,
    SchemaObjectKind, SchemaReport, SchemaVerifier, EXPECTED_PROCEDURES, EXPECTED_TABLES,
};

pub use utils::OutputFormat;

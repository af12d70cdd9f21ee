//! Database module
//!
//! Everything needed to reach the crawler database and confirm it is usable:
//!
//! ```text
//! database/
//! └── core/
//!     ├── connection  # ConnectionConfig builder and connector
//!     ├── schema      # SchemaCatalog trait and SchemaVerifier
//!     └── error       # DatabaseError
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use exodb::database::ConnectionConfig;
//!
//! let mut db = ConnectionConfig::new("db.example.com")
//!     .port(None)?
//!     .database("crawler")?
//!     .username("svc")?
//!     .password(std::env::var("DB_PASSWORD").unwrap_or_default());
//!
//! db.connect()?;
//! db.check_schema_compatibility()?;
//!
//! // hand the verified connection to the rest of the application
//! let conn = db.into_connection();
//! ```

pub mod core;

pub use core::{
    port_in_range, ConnectErrorKind, ConnectionConfig, DatabaseError, DatabaseResult, ErrorClass,
    SchemaCatalog, SchemaObjectKind, SchemaReport, SchemaVerifier, DEFAULT_HOST, DEFAULT_PORT,
    EXPECTED_PROCEDURES, EXPECTED_TABLES, ROUTINES_QUERY, SHOW_TABLES_QUERY,
};

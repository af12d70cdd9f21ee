//! Core database infrastructure
//!
//! - `ConnectionConfig`: connection builder and connector
//! - `SchemaVerifier`: startup check for the expected tables and procedures
//! - `DatabaseError`: failures of both

mod connection;
mod error;
mod schema;

pub use connection::{port_in_range, ConnectionConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{
    ConnectErrorKind, DatabaseError, DatabaseResult, ErrorClass, SchemaObjectKind,
};
pub use schema::{
    SchemaCatalog, SchemaReport, SchemaVerifier, EXPECTED_PROCEDURES, EXPECTED_TABLES,
    ROUTINES_QUERY, SHOW_TABLES_QUERY,
};

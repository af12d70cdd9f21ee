//! Error types for connection setup and schema verification

use std::fmt;

/// Result alias used by the database layer
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Category of a failure while opening the connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectErrorKind {
    /// Transport or client-side driver failure (socket, DNS, protocol)
    Interface,
    /// The server rejected the connection (authentication, unknown database)
    Database,
    /// Anything the driver reports that fits neither category
    Unknown,
}

impl ConnectErrorKind {
    /// Classify a driver error
    pub fn classify(err: &mysql::Error) -> Self {
        match err {
            mysql::Error::IoError(_) | mysql::Error::DriverError(_) => Self::Interface,
            mysql::Error::MySqlError(_) => Self::Database,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for ConnectErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectErrorKind::Interface => write!(f, "interface"),
            ConnectErrorKind::Database => write!(f, "database"),
            ConnectErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

/// Which part of the schema is incomplete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaObjectKind {
    Tables,
    Procedures,
}

impl fmt::Display for SchemaObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaObjectKind::Tables => write!(f, "tables"),
            SchemaObjectKind::Procedures => write!(f, "stored procedures"),
        }
    }
}

/// Coarse classification of a [`DatabaseError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The caller passed an unusable value
    Argument,
    /// An operation was called in the wrong state
    State,
    /// The driver failed while connecting or querying
    Connection,
    /// The schema was never provisioned
    Io,
    /// The schema is only partially present
    Runtime,
}

/// Errors raised while configuring, connecting, or verifying the schema
#[derive(Debug)]
pub enum DatabaseError {
    /// Out-of-range port, empty database name or username
    InvalidArgument(String),
    /// Operation invoked before its prerequisites were met
    PreconditionFailed(String),
    /// The driver failed to open the connection
    Connect {
        kind: ConnectErrorKind,
        source: mysql::Error,
    },
    /// A catalog query failed on an open connection
    Query {
        query: &'static str,
        source: mysql::Error,
    },
    /// The database exists but contains no tables at all
    SchemaMissing,
    /// Some expected tables or procedures are missing
    SchemaIncomplete {
        kind: SchemaObjectKind,
        missing: Vec<String>,
    },
}

impl DatabaseError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::PreconditionFailed(message.into())
    }

    /// Wrap a driver error raised while connecting, keeping its category
    pub fn connect(source: mysql::Error) -> Self {
        Self::Connect {
            kind: ConnectErrorKind::classify(&source),
            source,
        }
    }

    pub fn query(query: &'static str, source: mysql::Error) -> Self {
        Self::Query { query, source }
    }

    /// Get the coarse class of this error
    pub fn class(&self) -> ErrorClass {
        match self {
            DatabaseError::InvalidArgument(_) => ErrorClass::Argument,
            DatabaseError::PreconditionFailed(_) => ErrorClass::State,
            DatabaseError::Connect { .. } | DatabaseError::Query { .. } => ErrorClass::Connection,
            DatabaseError::SchemaMissing => ErrorClass::Io,
            DatabaseError::SchemaIncomplete { .. } => ErrorClass::Runtime,
        }
    }

    /// Names of the missing schema objects, if this is a `SchemaIncomplete` error
    pub fn missing(&self) -> &[String] {
        match self {
            DatabaseError::SchemaIncomplete { missing, .. } => missing,
            _ => &[],
        }
    }
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            DatabaseError::PreconditionFailed(msg) => write!(f, "precondition failed: {msg}"),
            DatabaseError::Connect { kind, source } => {
                write!(f, "failed to connect ({kind} error): {source}")
            }
            DatabaseError::Query { query, source } => {
                write!(f, "catalog query `{query}` failed: {source}")
            }
            DatabaseError::SchemaMissing => write!(
                f,
                "database table structure missing, run the schema generator script"
            ),
            DatabaseError::SchemaIncomplete { kind, missing } => write!(
                f,
                "database schema incomplete: missing {kind}: {}",
                missing.join(", ")
            ),
        }
    }
}

impl std::error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatabaseError::Connect { source, .. } | DatabaseError::Query { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

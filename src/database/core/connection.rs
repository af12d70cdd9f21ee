//! Connection configuration and setup
//!
//! `ConnectionConfig` collects the parameters needed to reach the crawler's
//! MySQL/MariaDB database, opens the connection on demand and keeps the handle
//! for the schema check that has to run before anything else uses it.

use mysql::{Conn, OptsBuilder};
use tracing::{debug, error, info, warn};

use super::error::{DatabaseError, DatabaseResult};
use super::schema::SchemaVerifier;

/// Host used when none is supplied
pub const DEFAULT_HOST: &str = "localhost";

/// Standard MySQL/MariaDB port
pub const DEFAULT_PORT: u16 = 3306;

const AUTOCOMMIT_INIT: &str = "SET autocommit=1";

/// Check that a port number is usable for a TCP connection
///
/// Port zero is reserved and therefore rejected.
pub fn port_in_range(port: i64) -> bool {
    (1..=i64::from(u16::MAX)).contains(&port)
}

/// Builder for the database connection
///
/// Setters consume and return the builder so calls can be chained; the ones
/// that validate their input return a `Result`:
///
/// ```rust,ignore
/// let mut db = ConnectionConfig::new("db.example.com")
///     .port(Some(3306))?
///     .database("crawler")?
///     .username("svc")?
///     .password("secret");
/// db.connect()?;
/// db.check_schema_compatibility()?;
/// ```
pub struct ConnectionConfig {
    host: String,
    port: u16,
    database: Option<String>,
    username: Option<String>,
    password: Option<String>,
    autocommit: bool,
    connection: Option<Conn>,
}

impl ConnectionConfig {
    /// Create a configurator for the given host
    ///
    /// An empty host is replaced by `localhost`.
    pub fn new(host: impl Into<String>) -> Self {
        let mut host = host.into();
        if host.is_empty() {
            warn!("No hostname provided. Will try {}.", DEFAULT_HOST);
            host = DEFAULT_HOST.to_string();
        }

        ConnectionConfig {
            host,
            port: DEFAULT_PORT,
            database: None,
            username: None,
            password: None,
            autocommit: true,
            connection: None,
        }
    }

    /// Set the port
    ///
    /// `None` and `Some(0)` select the standard port.
    pub fn port(mut self, port: Option<i64>) -> DatabaseResult<Self> {
        self.port = match port {
            None | Some(0) => {
                info!("No port number supplied. Will try standard port {DEFAULT_PORT} instead.");
                DEFAULT_PORT
            }
            Some(p) => u16::try_from(p)
                .ok()
                .filter(|_| port_in_range(p))
                .ok_or_else(|| {
                    DatabaseError::invalid_argument(format!("port {p} outside valid range"))
                })?,
        };
        Ok(self)
    }

    /// Set the database name
    pub fn database(mut self, database: impl Into<String>) -> DatabaseResult<Self> {
        let database = database.into();
        if database.is_empty() {
            return Err(DatabaseError::invalid_argument(
                "you must provide the name of the database",
            ));
        }
        self.database = Some(database);
        Ok(self)
    }

    /// Set the database user
    pub fn username(mut self, username: impl Into<String>) -> DatabaseResult<Self> {
        let username = username.into();
        if username.is_empty() {
            return Err(DatabaseError::invalid_argument(
                "you must provide a database user",
            ));
        }
        self.username = Some(username);
        Ok(self)
    }

    /// Set the password
    ///
    /// An empty password is accepted; the connection is then attempted without one.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        let password = password.into();
        if password.is_empty() {
            warn!("No database passphrase provided. Will try to connect without.");
            self.password = None;
        } else {
            self.password = Some(password);
        }
        self
    }

    /// Host to connect to, `localhost` if none was given
    pub fn host(&self) -> &str {
        &self.host
    }

    /// TCP port, 3306 unless set otherwise
    pub fn port_number(&self) -> u16 {
        self.port
    }

    /// Database (schema) name, if set
    pub fn database_name(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// Database user, if set
    pub fn user_name(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Whether a non-empty password was supplied
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Whether the session is switched to autocommit on connect
    pub fn autocommit(&self) -> bool {
        self.autocommit
    }

    /// Whether all mandatory parameters are set
    pub fn is_ready(&self) -> bool {
        let filled = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.is_empty());
        !self.host.is_empty() && filled(&self.database) && filled(&self.username)
    }

    /// Whether `connect` has succeeded
    pub fn is_connected(&self) -> bool {
        self.connection.is_some()
    }

    /// Driver options built from the accumulated parameters
    pub fn to_opts_builder(&self) -> OptsBuilder {
        let mut builder = OptsBuilder::new()
            .ip_or_hostname(Some(self.host.as_str()))
            .tcp_port(self.port)
            .db_name(self.database.as_deref())
            .user(self.username.as_deref())
            .pass(self.password.as_deref());

        if self.autocommit {
            builder = builder.init(vec![AUTOCOMMIT_INIT]);
        }

        builder
    }

    /// Open the connection
    ///
    /// Driver failures are logged with their category and returned unchanged
    /// inside [`DatabaseError::Connect`]. There is no retry.
    pub fn connect(&mut self) -> DatabaseResult<&mut Conn> {
        if !self.is_ready() {
            return Err(DatabaseError::precondition_failed(
                "ensure all mandatory connection properties are set",
            ));
        }

        debug!(
            "Trying to connect to database {} on {}:{}.",
            self.database.as_deref().unwrap_or_default(),
            self.host,
            self.port
        );

        let conn = Conn::new(self.to_opts_builder()).map_err(|e| {
            let err = DatabaseError::connect(e);
            if let DatabaseError::Connect { kind, source } = &err {
                error!(%kind, "Exception related to the database {} layer: {}", kind, source);
            }
            err
        })?;

        info!("Established database connection.");
        Ok(self.connection.insert(conn))
    }

    /// Borrow the open connection
    pub fn connection_mut(&mut self) -> Option<&mut Conn> {
        self.connection.as_mut()
    }

    /// Hand the open connection over to the caller
    pub fn into_connection(self) -> Option<Conn> {
        self.connection
    }

    /// Verify that every expected table and stored procedure exists
    pub fn check_schema_compatibility(&mut self) -> DatabaseResult<()> {
        let database = self.database.clone().unwrap_or_default();
        let conn = self.connection.as_mut().ok_or_else(|| {
            DatabaseError::precondition_failed("connect before checking the schema")
        })?;

        SchemaVerifier::new(conn, &database).check()
    }

    /// Human-readable description of the settings, password masked
    pub fn summary(&self) -> String {
        let lines = [
            format!("Host:       {}", self.host),
            format!("Port:       {}", self.port),
            format!(
                "Database:   {}",
                self.database.as_deref().unwrap_or("(not set)")
            ),
            format!(
                "Username:   {}",
                self.username.as_deref().unwrap_or("(not set)")
            ),
            format!(
                "Password:   {}",
                if self.has_password() { "********" } else { "(none)" }
            ),
            format!("Autocommit: {}", self.autocommit),
        ];
        lines.join("\n")
    }
}

//! Database schema verification
//!
//! The crawler's tables and stored procedures are created by a separate
//! generator script. Before the connection is handed to the rest of the
//! system, the verifier checks that everything the crawler relies on exists.

use mysql::prelude::Queryable;
use mysql::Conn;
use serde::Serialize;
use tracing::{debug, error, info};

use super::error::{DatabaseError, DatabaseResult, SchemaObjectKind};

/// Tables the crawler expects, compared case-sensitively
pub const EXPECTED_TABLES: [&str; 13] = [
    "actions",
    "blockList",
    "errorType",
    "fileContent",
    "fileMaster",
    "fileVersions",
    "jobs",
    "labels",
    "labelToMaster",
    "labelToVersion",
    "queue",
    "statisticsHosts",
    "storageTypes",
];

/// Stored procedures the crawler expects
pub const EXPECTED_PROCEDURES: [&str; 5] = [
    "delete_all_versions_SP",
    "delete_from_queue_SP",
    "insert_content_SP",
    "insert_file_SP",
    "next_queue_object_SP",
];

pub const SHOW_TABLES_QUERY: &str = "SHOW TABLES";

pub const ROUTINES_QUERY: &str =
    "SELECT SPECIFIC_NAME FROM INFORMATION_SCHEMA.ROUTINES WHERE ROUTINE_SCHEMA = ?";

/// Source of table and routine names
///
/// Implemented for a live [`mysql::Conn`]; tests provide in-memory catalogs.
pub trait SchemaCatalog {
    /// Names of all tables in the connected database
    fn table_names(&mut self) -> Result<Vec<String>, mysql::Error>;

    /// Names of all stored routines in `schema`
    fn routine_names(&mut self, schema: &str) -> Result<Vec<String>, mysql::Error>;
}

// `query` and `exec` drain the whole result set before returning, so no
// result stays open on the connection between the two checks.
impl SchemaCatalog for Conn {
    fn table_names(&mut self) -> Result<Vec<String>, mysql::Error> {
        self.query::<String, _>(SHOW_TABLES_QUERY)
    }

    fn routine_names(&mut self, schema: &str) -> Result<Vec<String>, mysql::Error> {
        self.exec::<String, _, _>(ROUTINES_QUERY, (schema,))
    }
}

/// Checks a catalog against the expected tables and procedures
pub struct SchemaVerifier<'a, C: SchemaCatalog + ?Sized> {
    catalog: &'a mut C,
    database: &'a str,
}

impl<'a, C: SchemaCatalog + ?Sized> SchemaVerifier<'a, C> {
    /// Create a verifier for `database`, the schema name routines are filtered by
    pub fn new(catalog: &'a mut C, database: &'a str) -> Self {
        Self { catalog, database }
    }

    /// Run the table check, then the stored procedure check
    pub fn check(&mut self) -> DatabaseResult<()> {
        self.check_tables()?;
        self.check_procedures()
    }

    /// Check that all expected tables exist
    ///
    /// An empty database yields [`DatabaseError::SchemaMissing`]; a partial
    /// one yields [`DatabaseError::SchemaIncomplete`] after every missing
    /// table has been logged.
    pub fn check_tables(&mut self) -> DatabaseResult<()> {
        debug!("Checking if the database table structure is complete.");
        let tables = self
            .catalog
            .table_names()
            .map_err(|e| query_failed(SHOW_TABLES_QUERY, e))?;

        if tables.is_empty() {
            error!("The database exists, but no tables found!");
            return Err(DatabaseError::SchemaMissing);
        }

        let mut missing = Vec::new();
        for table in EXPECTED_TABLES {
            if tables.iter().any(|t| t == table) {
                debug!("Found table {}", table);
            } else {
                error!(table, "Table {} not found.", table);
                missing.push(table.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(DatabaseError::SchemaIncomplete {
                kind: SchemaObjectKind::Tables,
                missing,
            });
        }

        info!("Found all expected tables.");
        Ok(())
    }

    /// Check that all expected stored procedures exist
    ///
    /// A procedure also looks missing when the user may not execute it; the
    /// routines catalog only lists routines the user has privileges for.
    pub fn check_procedures(&mut self) -> DatabaseResult<()> {
        debug!("Checking if stored procedures exist.");
        let procedures = self
            .catalog
            .routine_names(self.database)
            .map_err(|e| query_failed(ROUTINES_QUERY, e))?;

        let mut missing = Vec::new();
        for procedure in EXPECTED_PROCEDURES {
            if procedures.iter().any(|p| p == procedure) {
                debug!("Found stored procedure {}", procedure);
            } else {
                error!(
                    procedure,
                    "Stored procedure {} is missing (create it with the database script) \
                     or the user lacks permissions to use it.",
                    procedure
                );
                missing.push(procedure.to_string());
            }
        }

        if !missing.is_empty() {
            return Err(DatabaseError::SchemaIncomplete {
                kind: SchemaObjectKind::Procedures,
                missing,
            });
        }

        info!("Found all expected stored procedures.");
        Ok(())
    }

    /// Collect found and missing objects without failing on gaps
    ///
    /// Only catalog query failures are returned as errors.
    pub fn inspect(&mut self) -> DatabaseResult<SchemaReport> {
        let tables = self
            .catalog
            .table_names()
            .map_err(|e| query_failed(SHOW_TABLES_QUERY, e))?;
        let procedures = self
            .catalog
            .routine_names(self.database)
            .map_err(|e| query_failed(ROUTINES_QUERY, e))?;

        let (tables_found, tables_missing) = partition_expected(&EXPECTED_TABLES, &tables);
        let (procedures_found, procedures_missing) =
            partition_expected(&EXPECTED_PROCEDURES, &procedures);

        Ok(SchemaReport {
            database: self.database.to_string(),
            table_count: tables.len(),
            tables_found,
            tables_missing,
            procedures_found,
            procedures_missing,
        })
    }
}

fn query_failed(query: &'static str, source: mysql::Error) -> DatabaseError {
    error!(query, "Catalog query failed: {}", source);
    DatabaseError::query(query, source)
}

fn partition_expected(expected: &[&str], present: &[String]) -> (Vec<String>, Vec<String>) {
    let (found, missing): (Vec<&str>, Vec<&str>) = expected
        .iter()
        .partition(|name| present.iter().any(|p| p == *name));
    (
        found.into_iter().map(String::from).collect(),
        missing.into_iter().map(String::from).collect(),
    )
}

/// Snapshot of which expected schema objects exist
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaReport {
    pub database: String,
    /// Number of tables in the database, expected or not
    pub table_count: usize,
    pub tables_found: Vec<String>,
    pub tables_missing: Vec<String>,
    pub procedures_found: Vec<String>,
    pub procedures_missing: Vec<String>,
}

impl SchemaReport {
    /// Whether the schema check would pass
    pub fn is_compatible(&self) -> bool {
        self.table_count > 0 && self.tables_missing.is_empty() && self.procedures_missing.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MemoryCatalog {
        tables: Vec<String>,
        routines: Vec<String>,
        routine_schema: Option<String>,
    }

    impl MemoryCatalog {
        fn new(tables: &[&str], routines: &[&str]) -> Self {
            Self {
                tables: tables.iter().map(|s| s.to_string()).collect(),
                routines: routines.iter().map(|s| s.to_string()).collect(),
                routine_schema: None,
            }
        }
    }

    impl SchemaCatalog for MemoryCatalog {
        fn table_names(&mut self) -> Result<Vec<String>, mysql::Error> {
            Ok(self.tables.clone())
        }

        fn routine_names(&mut self, schema: &str) -> Result<Vec<String>, mysql::Error> {
            self.routine_schema = Some(schema.to_string());
            Ok(self.routines.clone())
        }
    }

    #[test]
    fn test_complete_schema() {
        let mut catalog = MemoryCatalog::new(&EXPECTED_TABLES, &EXPECTED_PROCEDURES);
        SchemaVerifier::new(&mut catalog, "crawler").check().unwrap();
        assert_eq!(catalog.routine_schema.as_deref(), Some("crawler"));
    }

    #[test]
    fn test_no_tables_is_schema_missing() {
        let mut catalog = MemoryCatalog::new(&[], &EXPECTED_PROCEDURES);
        let err = SchemaVerifier::new(&mut catalog, "crawler")
            .check()
            .unwrap_err();
        assert!(matches!(err, DatabaseError::SchemaMissing));
        // procedure check never ran
        assert!(catalog.routine_schema.is_none());
    }

    #[test]
    fn test_table_names_are_case_sensitive() {
        let mut tables: Vec<&str> = EXPECTED_TABLES.to_vec();
        tables.retain(|t| *t != "blockList");
        tables.push("blocklist");
        let mut catalog = MemoryCatalog::new(&tables, &EXPECTED_PROCEDURES);
        let err = SchemaVerifier::new(&mut catalog, "crawler")
            .check_tables()
            .unwrap_err();
        assert_eq!(err.missing(), ["blockList".to_string()]);
    }

    #[test]
    fn test_missing_procedure() {
        let mut catalog = MemoryCatalog::new(&EXPECTED_TABLES, &EXPECTED_PROCEDURES[1..]);
        let err = SchemaVerifier::new(&mut catalog, "crawler")
            .check()
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::SchemaIncomplete {
                kind: SchemaObjectKind::Procedures,
                ..
            }
        ));
        assert_eq!(err.missing(), ["delete_all_versions_SP".to_string()]);
    }

    #[test]
    fn test_inspect_report() {
        let mut catalog = MemoryCatalog::new(
            &["actions", "jobs", "queue", "unrelated"],
            &["insert_file_SP"],
        );
        let report = SchemaVerifier::new(&mut catalog, "crawler")
            .inspect()
            .unwrap();

        assert_eq!(report.database, "crawler");
        assert_eq!(report.table_count, 4);
        assert_eq!(report.tables_found, vec!["actions", "jobs", "queue"]);
        assert_eq!(report.tables_missing.len(), 10);
        assert_eq!(report.procedures_found, vec!["insert_file_SP"]);
        assert_eq!(report.procedures_missing.len(), 4);
        assert!(!report.is_compatible());
    }

    #[test]
    fn test_inspect_empty_database_is_incompatible() {
        let mut catalog = MemoryCatalog::new(&[], &[]);
        let report = SchemaVerifier::new(&mut catalog, "crawler")
            .inspect()
            .unwrap();
        assert_eq!(report.table_count, 0);
        assert!(!report.is_compatible());
    }
}

mod common;

use common::with_captured_logs;
use exodb::{ConnectErrorKind, ConnectionConfig, DatabaseError, ErrorClass, ExodbConfig};

#[test]
fn port_validation_follows_tcp_range() {
    for port in [1, 80, 3306, 3307, 65535] {
        let config = ConnectionConfig::new("h").port(Some(port)).unwrap();
        assert_eq!(i64::from(config.port_number()), port);
    }

    for port in [-3306, -1, 65536, 1 << 20] {
        let err = ConnectionConfig::new("h").port(Some(port)).err().unwrap();
        assert!(matches!(err, DatabaseError::InvalidArgument(_)));
    }
}

#[test]
fn zero_or_missing_port_selects_default() {
    let (config, logs) = with_captured_logs(|| {
        ConnectionConfig::new("h")
            .port(Some(4000))
            .and_then(|c| c.port(Some(0)))
    });
    assert_eq!(config.unwrap().port_number(), 3306);
    assert_eq!(logs.count("INFO", "No port number supplied"), 1);

    let config = ConnectionConfig::new("h").port(None).unwrap();
    assert_eq!(config.port_number(), 3306);
}

#[test]
fn empty_host_warns_and_uses_localhost() {
    let (config, logs) = with_captured_logs(|| ConnectionConfig::new(""));
    assert_eq!(config.host(), "localhost");
    assert_eq!(logs.count("WARN", "No hostname provided"), 1);
}

#[test]
fn empty_password_warns_exactly_once() {
    let (config, logs) = with_captured_logs(|| -> Result<ConnectionConfig, DatabaseError> {
        Ok(ConnectionConfig::new("db.example.com")
            .port(Some(3306))?
            .database("crawler")?
            .username("svc")?
            .password(""))
    });

    let config = config.unwrap();
    assert!(config.is_ready());
    assert!(!config.has_password());
    assert_eq!(logs.count("WARN", "No database passphrase provided"), 1);
    assert_eq!(logs.count("WARN", ""), 1);
}

#[test]
fn connect_before_ready_is_a_precondition_failure() {
    let mut missing_both = ConnectionConfig::new("db.example.com");
    let mut missing_user = ConnectionConfig::new("db.example.com")
        .database("crawler")
        .unwrap();
    let mut missing_db = ConnectionConfig::new("db.example.com")
        .username("svc")
        .unwrap();

    for config in [&mut missing_both, &mut missing_user, &mut missing_db] {
        assert!(!config.is_ready());
        let err = config.connect().err().unwrap();
        assert_eq!(err.class(), ErrorClass::State);
        assert!(!config.is_connected());
    }
}

#[test]
fn unreachable_server_is_an_interface_error() {
    // port 1 on loopback is closed on any sane test host
    let mut config = ConnectionConfig::new("127.0.0.1")
        .port(Some(1))
        .unwrap()
        .database("crawler")
        .unwrap()
        .username("svc")
        .unwrap()
        .password("pw");

    let (result, logs) = with_captured_logs(|| config.connect().map(|_| ()));

    match result.unwrap_err() {
        DatabaseError::Connect { kind, .. } => assert_eq!(kind, ConnectErrorKind::Interface),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(logs.count("ERROR", "interface layer"), 1);
    assert!(!config.is_connected());
}

#[test]
fn settings_feed_the_builder() {
    let settings = ExodbConfig {
        host: "db.example.com".to_string(),
        port: Some(3310),
        database: Some("crawler".to_string()),
        username: Some("svc".to_string()),
        password: Some("secret".to_string()),
    };

    let config = settings.connection_config().unwrap();
    assert_eq!(config.host(), "db.example.com");
    assert_eq!(config.port_number(), 3310);
    assert_eq!(config.database_name(), Some("crawler"));
    assert_eq!(config.user_name(), Some("svc"));
    assert!(config.has_password());
}

/// Needs a server with the crawler schema:
/// `EXODB_TEST_MYSQL_HOST=127.0.0.1 EXODB_TEST_MYSQL_DATABASE=crawler
/// EXODB_TEST_MYSQL_USER=svc cargo test -- --ignored`
#[test]
#[ignore]
fn live_server_connect_and_check() {
    let env = |key: &str| std::env::var(key).unwrap_or_default();

    let mut config = ConnectionConfig::new(env("EXODB_TEST_MYSQL_HOST"))
        .port(env("EXODB_TEST_MYSQL_PORT").parse().ok())
        .unwrap()
        .database(env("EXODB_TEST_MYSQL_DATABASE"))
        .unwrap()
        .username(env("EXODB_TEST_MYSQL_USER"))
        .unwrap()
        .password(env("EXODB_TEST_MYSQL_PASSWORD"));

    config.connect().unwrap();
    assert!(config.is_connected());
    config.check_schema_compatibility().unwrap();
    assert!(config.into_connection().is_some());
}

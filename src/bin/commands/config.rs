use clap::Args;
use exodb::{ExodbConfig, OutputFormat};
use serde::Serialize;

/// Arguments for the Config command
#[derive(Args)]
pub struct ConfigArgs {
    /// Also validate the settings with the connection builder
    #[clap(short, long)]
    pub validate: bool,
}

#[derive(Debug, Serialize)]
struct ConfigInfo {
    config_file: String,
    host: String,
    port: Option<i64>,
    database: Option<String>,
    username: Option<String>,
    password_set: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(config: &ExodbConfig, args: ConfigArgs, output_format: OutputFormat) {
    let ConfigArgs { validate } = args;

    let validation = validate.then(|| config.connection_config().err().map(|e| e.to_string()));

    if output_format.is_json() {
        let info = ConfigInfo {
            config_file: ExodbConfig::config_file_path(),
            host: config.host.clone(),
            port: config.port,
            database: config.database.clone(),
            username: config.username.clone(),
            password_set: config.password.as_deref().is_some_and(|p| !p.is_empty()),
            valid: validation.as_ref().map(|e| e.is_none()),
            error: validation.clone().flatten(),
        };
        match output_format.to_json(&info) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize: {}", e),
        }
        return;
    }

    println!("{}", config.summary());
    match validation {
        Some(None) => println!("\nSettings are valid."),
        Some(Some(e)) => println!("\nSettings are invalid: {}", e),
        None => {}
    }
}

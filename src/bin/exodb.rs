use clap::{Parser, Subcommand};
use exodb::{ExodbConfig, OutputFormat};
use tracing::Level;

mod commands;

use commands::check::CheckArgs;
use commands::config::ConfigArgs;
use commands::expected::ExpectedArgs;
use commands::status::StatusArgs;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.exodb/exodb.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    /// Output format: table, markdown, json, json-pretty
    #[clap(short, long, global = true, default_value = "table")]
    format: OutputFormat,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Connect and verify that all expected tables and stored procedures exist.
    Check(CheckArgs),

    /// Connect and report which expected schema objects are present.
    Status(StatusArgs),

    /// List the tables and stored procedures the crawler expects.
    Expected(ExpectedArgs),

    /// Show the effective connection settings.
    Config(ConfigArgs),
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let level = if cli.debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = match ExodbConfig::new(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match cli.command {
        Commands::Check(args) => commands::check::run(&config, args),
        Commands::Status(args) => commands::status::run(&config, args, cli.format),
        Commands::Expected(args) => commands::expected::run(args, cli.format),
        Commands::Config(args) => commands::config::run(&config, args, cli.format),
    }
}

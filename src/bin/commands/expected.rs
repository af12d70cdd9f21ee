use clap::Args;
use exodb::{OutputFormat, EXPECTED_PROCEDURES, EXPECTED_TABLES};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Arguments for the Expected command
#[derive(Args)]
pub struct ExpectedArgs {
    /// Only list tables
    #[clap(long, conflicts_with = "procedures")]
    pub tables: bool,

    /// Only list stored procedures
    #[clap(long)]
    pub procedures: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct ExpectedObject {
    kind: &'static str,
    name: &'static str,
}

pub fn run(args: ExpectedArgs, output_format: OutputFormat) {
    let ExpectedArgs { tables, procedures } = args;

    let mut objects = Vec::new();
    if !procedures {
        objects.extend(EXPECTED_TABLES.into_iter().map(|name| ExpectedObject {
            kind: "table",
            name,
        }));
    }
    if !tables {
        objects.extend(EXPECTED_PROCEDURES.into_iter().map(|name| ExpectedObject {
            kind: "procedure",
            name,
        }));
    }

    match output_format {
        OutputFormat::Table => println!("{}", Table::new(&objects).with(Style::rounded())),
        OutputFormat::Markdown => println!("{}", Table::new(&objects).with(Style::markdown())),
        OutputFormat::Json | OutputFormat::JsonPretty => match output_format.to_json(&objects) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize: {}", e),
        },
    }
}

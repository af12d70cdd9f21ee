use clap::Args;
use exodb::{ExodbConfig, OutputFormat, SchemaReport, SchemaVerifier};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Arguments for the Status command
#[derive(Args)]
pub struct StatusArgs {
    /// Only list missing objects
    #[clap(short, long)]
    pub missing_only: bool,
}

#[derive(Debug, Serialize, Tabled)]
struct StatusRow {
    kind: &'static str,
    name: String,
    status: &'static str,
}

pub fn run(config: &ExodbConfig, args: StatusArgs, output_format: OutputFormat) {
    let StatusArgs { missing_only } = args;

    let mut db = super::connect_or_exit(config);
    let database = db.database_name().unwrap_or_default().to_string();

    let report = match db.connection_mut() {
        Some(conn) => SchemaVerifier::new(conn, &database).inspect(),
        None => {
            eprintln!("ERROR: connection is not open");
            std::process::exit(1);
        }
    };
    let report = match report {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    if output_format.is_json() {
        match output_format.to_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("ERROR: Failed to serialize report: {}", e),
        }
        return;
    }

    let rows = status_rows(&report, missing_only);
    if rows.is_empty() {
        println!("No missing tables or stored procedures.");
    } else {
        println!("{}", render_rows(rows, output_format));
    }

    println!(
        "Database '{}': {} tables, schema {}",
        report.database,
        report.table_count,
        if report.is_compatible() {
            "compatible"
        } else {
            "incompatible"
        }
    );
}

fn render_rows(rows: Vec<StatusRow>, output_format: OutputFormat) -> String {
    match output_format {
        OutputFormat::Markdown => Table::new(rows).with(Style::markdown()).to_string(),
        _ => Table::new(rows).with(Style::rounded()).to_string(),
    }
}

fn status_rows(report: &SchemaReport, missing_only: bool) -> Vec<StatusRow> {
    let mut rows = Vec::new();
    let groups = [
        ("table", &report.tables_found, &report.tables_missing),
        (
            "procedure",
            &report.procedures_found,
            &report.procedures_missing,
        ),
    ];

    for (kind, found, missing) in groups {
        if !missing_only {
            rows.extend(found.iter().map(|name| StatusRow {
                kind,
                name: name.clone(),
                status: "found",
            }));
        }
        rows.extend(missing.iter().map(|name| StatusRow {
            kind,
            name: name.clone(),
            status: "missing",
        }));
    }

    rows
}

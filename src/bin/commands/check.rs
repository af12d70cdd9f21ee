use clap::Args;
use exodb::ExodbConfig;

/// Arguments for the Check command
#[derive(Args)]
pub struct CheckArgs {
    /// Only report failures
    #[clap(short, long)]
    pub quiet: bool,
}

pub fn run(config: &ExodbConfig, args: CheckArgs) {
    let CheckArgs { quiet } = args;

    let mut db = super::connect_or_exit(config);

    if let Err(e) = db.check_schema_compatibility() {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }

    if !quiet {
        println!(
            "Schema of database '{}' on {}:{} is compatible.",
            db.database_name().unwrap_or_default(),
            db.host(),
            db.port_number()
        );
    }
}

//! normalizes the city bike station registry and merges the monthly trip logs
//! found in the working directory (or `--directory`) into trips.csv.
use citybike_migration::migration::app::MigrationApp;
use clap::Parser;

fn main() {
    env_logger::init();
    let args = MigrationApp::parse();
    let result = args.config().and_then(|config| args.op.run(&config));
    match result {
        Ok(_) => log::info!("finished."),
        Err(e) => {
            log::error!("failed running citybike_migration: {e}");
            std::process::exit(1);
        }
    }
}

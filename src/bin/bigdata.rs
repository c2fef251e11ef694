use std::process;

use log::{error, info};

use bigdata::config::{self, BigDataConfig};
use bigdata::report::{format_rows, generate_or_refresh, Report};
use bigdata::store::{BigDataStore, SqliteFile, StoreError};

fn main() {
    env_logger::init();

    let matches = config::app().get_matches();
    let config = BigDataConfig::from_arg_matches(&matches);

    if let Err(e) = run(&config) {
        error!("persistence operation failed: {}", e);
        eprintln!("persistence operation failed with reason: {}", e);
        process::exit(1);
    }
}

fn run(config: &BigDataConfig) -> Result<(), StoreError> {
    let source = SqliteFile::new(&config.db_file).busy_timeout(config.busy_timeout);
    let store = BigDataStore::new(source)?.transactional(config.transactional);

    if config.clear {
        store.clear_all()?;
    }
    let refresh = generate_or_refresh(&store, config.amount)?;
    info!("{:?} on {}", refresh, config.db_file);

    let records = store.fetch_all()?;
    let report = Report::collect(&store)?;
    print!("{}", report);
    if config.show_rows && !records.is_empty() {
        print!("{}", format_rows(&records));
    }
    Ok(())
}

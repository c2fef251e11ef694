use std::{env, fs, process};

use log::{error, info};

use bigdata::store::BigDataStore;

fn main() {
    env_logger::init();

    let amount = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(524288);

    let _ = fs::remove_file("bigdata.db");
    let store = BigDataStore::open("bigdata.db").unwrap_or_else(|e| {
        error!("failed setting up bigdata.db: {}", e);
        process::exit(1)
    });
    match store.insert_batch(amount) {
        Ok(records) => info!("inserted {} records into bigdata.db", records.len()),
        Err(e) => {
            error!("failed inserting records: {}", e);
            process::exit(1);
        }
    }
}

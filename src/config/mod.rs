use std::time::Duration;

use clap::{App, Arg, ArgMatches};
use log::{info, warn};

use crate::report::DEFAULT_BATCH;

pub struct BigDataConfig {
    pub db_file: String,
    pub amount: usize,
    pub busy_timeout: Duration,
    pub transactional: bool,
    pub clear: bool,
    pub show_rows: bool
}

/// Command line definition shared by the `bigdata` program and tests
pub fn app() -> App<'static, 'static> {
    App::new("BigData generator")
        .version("0.1")
        .about("Fills or refreshes the BIG_DATA table with random records and prints its statistics")
        .arg(Arg::with_name("dbfile")
            .short("f")
            .long("dbfile")
            .value_name("FILE")
            .help("SQLite database file to use, created if missing")
            .takes_value(true))
        .arg(Arg::with_name("amount")
            .short("n")
            .long("amount")
            .value_name("N")
            .help("Number of records to insert or refresh")
            .takes_value(true))
        .arg(Arg::with_name("busy-timeout")
            .long("busy-timeout")
            .value_name("MS")
            .help("Milliseconds a connection waits on a locked database")
            .takes_value(true))
        .arg(Arg::with_name("no-transaction")
            .long("no-transaction")
            .help("Write each record of a batch as an independent statement"))
        .arg(Arg::with_name("clear")
            .long("clear")
            .help("Delete every record before generating"))
        .arg(Arg::with_name("rows")
            .long("rows")
            .help("Print every record after the statistics"))
}

impl BigDataConfig {
    pub fn from_arg_matches(matches: &ArgMatches) -> Self {
        let db_file =
            matches
                .value_of("dbfile")
                .unwrap_or_else(|| {
                    info!("no dbfile provided from commandline, using default file name 'bigdata.db'");
                    "bigdata.db"
                });
        let amount =
            matches
                .value_of("amount")
                .unwrap_or_else(|| {
                    info!("no amount provided from commandline, using default value {}", DEFAULT_BATCH);
                    "1000"
                })
                .parse().unwrap_or_else(|_| {
                    warn!("amount provided from commandline was invalid, using default value {}", DEFAULT_BATCH);
                    DEFAULT_BATCH
                });
        let busy_timeout =
            matches
                .value_of("busy-timeout")
                .unwrap_or("5000")
                .parse().unwrap_or_else(|_| {
                    warn!("busy timeout provided from commandline was invalid, using default value 5000ms");
                    5000
                });
        BigDataConfig {
            db_file: db_file.to_owned(),
            amount,
            busy_timeout: Duration::from_millis(busy_timeout),
            transactional: !matches.is_present("no-transaction"),
            clear: matches.is_present("clear"),
            show_rows: matches.is_present("rows")
        }
    }
}

//! The generate-or-refresh policy and the aggregate report shown after it

use std::fmt;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use log::info;

use crate::record::Record;
use crate::store::{BigDataStore, ConnectionSource, StoreError};

/// Batch size used by a single write-triggering request
pub const DEFAULT_BATCH: usize = 1000;

/// Which write `generate_or_refresh` performed and how many rows it wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    Inserted(usize),
    Updated(usize)
}

/// Populate an empty table with `amount` new records, otherwise rewrite the first `amount` rows
pub fn generate_or_refresh<S: ConnectionSource>(store: &BigDataStore<S>, amount: usize)
    -> Result<Refresh, StoreError> {
    let existing = store.count()?;
    if existing == 0 {
        store.insert_batch(amount)?;
        info!("table was empty, inserted {} records", amount);
        Ok(Refresh::Inserted(amount))
    } else {
        let (_, updated) = store.update_batch(amount)?;
        info!("table holds {} records, refreshed {} of them", existing, updated);
        Ok(Refresh::Updated(updated))
    }
}

/// Row count and the four aggregates over the whole table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub count: i64,
    pub avg_name_length: Option<i64>,
    pub mode_created_at: Option<NaiveDate>,
    pub text_e_count: i64,
    pub avg_number: Option<i64>
}

impl Report {
    /// Query every aggregate, one connection per aggregate
    pub fn collect<S: ConnectionSource>(store: &BigDataStore<S>) -> Result<Self, StoreError> {
        Ok(Report {
            count: store.count()?,
            avg_name_length: store.avg_name_length()?,
            mode_created_at: store.mode_created_at()?,
            text_e_count: store.text_e_count()?,
            avg_number: store.avg_number()?
        })
    }
}

fn or_dash<T: Display>(value: &Option<T>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".to_owned()
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        if self.count == 0 {
            return writeln!(f, "no records found in the database");
        }
        writeln!(f, "{} entries in the database", self.count)?;
        writeln!(f, "average length of user name: {}", or_dash(&self.avg_name_length))?;
        writeln!(f, "date with highest frequency: {}", or_dash(&self.mode_created_at))?;
        writeln!(f, "frequency of letter 'e': {}", self.text_e_count)?;
        writeln!(f, "average of numbers: {}", or_dash(&self.avg_number))
    }
}

/// One tab separated line per record, id first
pub fn format_rows(records: &[Record]) -> String {
    let mut ret = String::from("ID\tUSER_NAME\tCREATED_AT\tTEXT\tNUMBER\n");
    for r in records {
        ret.push_str(&format!("{}\t{}\t{}\t{}\t{}\n", r.id, r.owner_name, r.created_at, r.text, r.number));
    }
    ret
}

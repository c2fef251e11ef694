//! Data access for the `BIG_DATA` table
//!
//! Every public operation opens its own connection through the store's `ConnectionSource` and
//! closes it before returning, on error paths too. The store keeps no lock of its own: a reader
//! running next to a writer may see a batch that is only partly applied when batches are not
//! transactional, and a stale view otherwise.

pub mod error;
pub mod schema;
pub mod source;

pub use error::StoreError;
pub use source::{ConnectionSource, SqliteFile};

use std::path::Path;

use chrono::NaiveDate;
use log::{debug, info};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::generator::RecordGenerator;
use crate::record::Record;
use error::Context;

#[derive(Clone, Copy, Debug)]
enum WriteKind { Insert, Update }

/// The data access layer over one `BIG_DATA` table
pub struct BigDataStore<S: ConnectionSource = SqliteFile> {
    source: S,
    transactional: bool
}

impl BigDataStore<SqliteFile> {
    /// Open the SQLite file at `path`, creating the table if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        BigDataStore::new(SqliteFile::new(path))
    }
}

impl<S: ConnectionSource> BigDataStore<S> {
    /// Create a store on top of `source` and make sure the table exists
    pub fn new(source: S) -> Result<Self, StoreError> {
        let store = BigDataStore { source, transactional: true };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Whether each batch write runs inside a single transaction (the default)
    ///
    /// When disabled, a batch is a sequence of independent statements and a failing statement
    /// leaves the rows before it in place.
    pub fn transactional(mut self, enabled: bool) -> Self {
        self.transactional = enabled;
        self
    }

    pub fn is_transactional(&self) -> bool {
        self.transactional
    }

    /// Create the table unless it exists; safe to race against other stores on the same file
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        let connection = self.source.connect()?;
        if !schema::table_exists(&connection).context("failed looking up table")? {
            info!("table {} not found, creating it", schema::TABLE_NAME);
        }
        connection.execute(schema::CREATE_TABLE, params![])
            .context("failed creating table")?;
        Ok(())
    }

    pub fn table_exists(&self) -> Result<bool, StoreError> {
        let connection = self.source.connect()?;
        schema::table_exists(&connection).context("failed looking up table")
    }

    /// Generate `amount` records with a fresh generator and insert them, returning the batch
    ///
    /// Ids start at 1 on every call, so this only succeeds on a table without those ids.
    pub fn insert_batch(&self, amount: usize) -> Result<Vec<Record>, StoreError> {
        let records = RecordGenerator::new().generate(amount);
        self.insert_records(&records)?;
        Ok(records)
    }

    /// Generate `amount` records with a fresh generator and overwrite the rows with the same ids
    ///
    /// With ids starting at 1 this rewrites rows `1..=amount`; generated ids with no matching row
    /// are skipped. Returns the batch and the number of rows actually changed.
    pub fn update_batch(&self, amount: usize) -> Result<(Vec<Record>, usize), StoreError> {
        let records = RecordGenerator::new().generate(amount);
        let updated = self.update_records(&records)?;
        Ok((records, updated))
    }

    /// Insert each record as a new row, returns the number of rows inserted
    pub fn insert_records(&self, records: &[Record]) -> Result<usize, StoreError> {
        let inserted = self.write_batch(WriteKind::Insert, records)?;
        debug!("inserted {} rows", inserted);
        Ok(inserted)
    }

    /// Overwrite every non-id field of the rows matching the records' ids
    ///
    /// Returns the number of rows changed.
    pub fn update_records(&self, records: &[Record]) -> Result<usize, StoreError> {
        let updated = self.write_batch(WriteKind::Update, records)?;
        debug!("updated {} of {} rows", updated, records.len());
        Ok(updated)
    }

    pub fn clear_all(&self) -> Result<usize, StoreError> {
        let connection = self.source.connect()?;
        let deleted = connection.execute(schema::DELETE_ALL, params![])
            .context("failed clearing table")?;
        info!("cleared {} rows from {}", deleted, schema::TABLE_NAME);
        Ok(deleted)
    }

    /// Every row in storage order
    pub fn fetch_all(&self) -> Result<Vec<Record>, StoreError> {
        let connection = self.source.connect()?;
        let mut stmt = connection.prepare(schema::SELECT_ALL)
            .context("failed preparing select")?;
        let rows = stmt.query_map(params![], map_row)
            .context("failed selecting rows")?;
        let records = rows.collect::<Result<Vec<_>, _>>()
            .context("failed reading row")?;
        Ok(records)
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        let connection = self.source.connect()?;
        let count = connection.query_row(schema::COUNT, params![], |row| row.get(0))
            .context("failed counting rows")?;
        Ok(count)
    }

    /// Average `owner_name` length truncated to an integer, `None` on an empty table
    pub fn avg_name_length(&self) -> Result<Option<i64>, StoreError> {
        let avg = self.query_avg(schema::AVG_NAME_LENGTH)?;
        Ok(avg.map(|avg| avg as i64))
    }

    /// The most frequent `created_at`, ties broken by SQLite's grouping order
    pub fn mode_created_at(&self) -> Result<Option<NaiveDate>, StoreError> {
        let connection = self.source.connect()?;
        let date = connection
            .query_row(schema::MODE_CREATED_AT, params![], |row| row.get(0))
            .optional()
            .context("failed finding most frequent date")?;
        Ok(date)
    }

    /// Occurrences of lowercase `e` across all `text` values, 0 on an empty table
    pub fn text_e_count(&self) -> Result<i64, StoreError> {
        let connection = self.source.connect()?;
        let count = connection.query_row(schema::TEXT_E_COUNT, params![], |row| row.get(0))
            .context("failed counting letter e")?;
        Ok(count)
    }

    /// Average `number` truncated to an integer, `None` on an empty table
    pub fn avg_number(&self) -> Result<Option<i64>, StoreError> {
        let avg = self.query_avg(schema::AVG_NUMBER)?;
        Ok(avg.map(|avg| avg as i64))
    }

    fn query_avg(&self, sql: &str) -> Result<Option<f64>, StoreError> {
        let connection = self.source.connect()?;
        let avg = connection.query_row(sql, params![], |row| row.get(0))
            .context("failed computing average")?;
        Ok(avg)
    }

    fn write_batch(&self, kind: WriteKind, records: &[Record]) -> Result<usize, StoreError> {
        let mut connection = self.source.connect()?;
        if self.transactional {
            let tx = connection.transaction().context("failed starting transaction")?;
            let written = execute_each(&tx, kind, records)?;
            tx.commit().context("failed committing batch")?;
            Ok(written)
        } else {
            execute_each(&connection, kind, records)
        }
    }
}

fn execute_each(connection: &Connection, kind: WriteKind, records: &[Record]) -> Result<usize, StoreError> {
    let mut written = 0;
    match kind {
        WriteKind::Insert => {
            let mut stmt = connection.prepare(schema::INSERT)
                .context("failed preparing insert")?;
            for r in records {
                written += stmt.execute(params![r.id, r.owner_name, r.created_at, r.text, r.number])
                    .context("failed inserting record")?;
            }
        },
        WriteKind::Update => {
            let mut stmt = connection.prepare(schema::UPDATE_BY_ID)
                .context("failed preparing update")?;
            for r in records {
                written += stmt.execute(params![r.owner_name, r.created_at, r.text, r.number, r.id])
                    .context("failed updating record")?;
            }
        }
    }
    Ok(written)
}

fn map_row(row: &Row) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        owner_name: row.get(1)?,
        created_at: row.get(2)?,
        text: row.get(3)?,
        number: row.get(4)?
    })
}

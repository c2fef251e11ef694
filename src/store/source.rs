//! Where store connections come from

use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use rusqlite::Connection;

use crate::store::error::{StoreError, Context};

/// Hands out one fresh connection per store operation
///
/// The returned `Connection` is owned by the calling operation and closed when it is dropped.
pub trait ConnectionSource {
    fn connect(&self) -> Result<Connection, StoreError>;
}

/// Opens the SQLite database file at `path` on every `connect`
#[derive(Debug, Clone)]
pub struct SqliteFile {
    path: PathBuf,
    busy_timeout: Duration
}

impl SqliteFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        SqliteFile { path: path.as_ref().to_owned(), busy_timeout: Duration::from_millis(5000) }
    }

    /// How long a connection waits on a locked database before failing
    pub fn busy_timeout(mut self, busy_timeout: Duration) -> Self {
        self.busy_timeout = busy_timeout;
        self
    }
}

impl ConnectionSource for SqliteFile {
    fn connect(&self) -> Result<Connection, StoreError> {
        debug!("opening connection to {}", self.path.display());
        let connection = Connection::open(&self.path)
            .context("failed opening database")?;
        connection.busy_timeout(self.busy_timeout)
            .context("failed setting busy timeout")?;
        Ok(connection)
    }
}

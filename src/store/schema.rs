//! SQL text for the `BIG_DATA` table
//!
//! All statements take their values as bound parameters, ids included.

use rusqlite::{params, Connection, OptionalExtension};

// Table layout
//  -- ID          INTEGER, primary key
//  -- USER_NAME   VARCHAR(50)
//  -- CREATED_AT  DATE, stored as 'YYYY-MM-DD' text
//  -- TEXT        VARCHAR(280)
//  -- NUMBER      INTEGER

pub const TABLE_NAME: &str = "BIG_DATA";

pub const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS BIG_DATA (\
    ID INTEGER PRIMARY KEY NOT NULL, \
    USER_NAME VARCHAR(50), \
    CREATED_AT DATE, \
    TEXT VARCHAR(280), \
    NUMBER INTEGER)";

pub const INSERT: &str =
    "INSERT INTO BIG_DATA (ID, USER_NAME, CREATED_AT, TEXT, NUMBER) VALUES (?1, ?2, ?3, ?4, ?5)";

pub const UPDATE_BY_ID: &str =
    "UPDATE BIG_DATA SET USER_NAME = ?1, CREATED_AT = ?2, TEXT = ?3, NUMBER = ?4 WHERE ID = ?5";

pub const DELETE_ALL: &str = "DELETE FROM BIG_DATA";

pub const SELECT_ALL: &str = "SELECT ID, USER_NAME, CREATED_AT, TEXT, NUMBER FROM BIG_DATA";

pub const COUNT: &str = "SELECT COUNT(*) FROM BIG_DATA";

pub const AVG_NAME_LENGTH: &str = "SELECT AVG(LENGTH(USER_NAME)) FROM BIG_DATA";

pub const MODE_CREATED_AT: &str =
    "SELECT CREATED_AT FROM BIG_DATA GROUP BY CREATED_AT ORDER BY COUNT(*) DESC LIMIT 1";

pub const TEXT_E_COUNT: &str =
    "SELECT COALESCE(SUM(LENGTH(TEXT) - LENGTH(REPLACE(TEXT, 'e', ''))), 0) FROM BIG_DATA";

pub const AVG_NUMBER: &str = "SELECT AVG(CAST(NUMBER AS REAL)) FROM BIG_DATA";

/// Whether `BIG_DATA` is present in the schema catalog
pub fn table_exists(connection: &Connection) -> rusqlite::Result<bool> {
    connection
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            params![TABLE_NAME],
            |row| row.get::<_, String>(0)
        )
        .optional()
        .map(|name| name.is_some())
}

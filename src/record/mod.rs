//! The row type stored in the `BIG_DATA` table

use chrono::NaiveDate;

/// Maximum length (exclusive) of a generated `owner_name`, matches `USER_NAME VARCHAR(50)`
pub const NAME_MAX_LEN: usize = 50;

/// Maximum length (exclusive) of a generated `text`, matches `TEXT VARCHAR(280)`
pub const TEXT_MAX_LEN: usize = 280;

/// One row of the `BIG_DATA` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: i64,
    pub owner_name: String,
    pub created_at: NaiveDate,
    pub text: String,
    pub number: i32
}

impl Record {
    pub fn new(id: i64, owner_name: &str, created_at: NaiveDate, text: &str, number: i32) -> Self {
        Record {
            id,
            owner_name: owner_name.to_owned(),
            created_at,
            text: text.to_owned(),
            number
        }
    }
}

//! Random `Record` generation
//!
//! Every generator owns its id counter starting at 0, ids are pre-incremented and never reused
//! within one generator. The store creates a fresh generator for each batch, which is what makes
//! `update_batch` hit the first `amount` rows.

use rand::Rng;
use rand::rngs::ThreadRng;
use chrono::NaiveDate;

use crate::record::{Record, NAME_MAX_LEN, TEXT_MAX_LEN};

/// Characters used for `owner_name` and `text`, spaces included
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ abcdefghijklmnopqrstuvwxyz 1234567890";

pub const YEAR_RANGE: (i32, i32) = (1000, 5000);
pub const MONTH_RANGE: (u32, u32) = (1, 13);
pub const DAY_RANGE: (u32, u32) = (1, 29);

/// Exclusive upper bound of `Record::number`, 2^31 - 1
pub const NUMBER_UPPER: i32 = i32::MAX;

/// Produces batches of synthetic records with sequential ids
pub struct RecordGenerator<R: Rng = ThreadRng> {
    last_id: i64,
    rng: R
}

impl RecordGenerator<ThreadRng> {
    pub fn new() -> Self {
        RecordGenerator::with_rng(rand::thread_rng())
    }
}

impl Default for RecordGenerator<ThreadRng> {
    fn default() -> Self {
        RecordGenerator::new()
    }
}

impl<R: Rng> RecordGenerator<R> {
    /// Create a generator drawing from `rng`; the first generated id is 1
    pub fn with_rng(rng: R) -> Self {
        RecordGenerator { last_id: 0, rng }
    }

    /// The id handed out most recently, 0 if nothing has been generated yet
    pub fn last_id(&self) -> i64 {
        self.last_id
    }

    /// Generate `amount` records, ids continue from the previous call
    pub fn generate(&mut self, amount: usize) -> Vec<Record> {
        let mut ret = Vec::with_capacity(amount);
        for _ in 0..amount {
            self.last_id += 1;
            ret.push(Record {
                id: self.last_id,
                owner_name: self.gen_text(NAME_MAX_LEN),
                created_at: self.gen_date(),
                text: self.gen_text(TEXT_MAX_LEN),
                number: self.gen_number()
            });
        }
        ret
    }

    /// A string with a uniformly drawn length in `[0, max_len)`
    pub fn gen_text(&mut self, max_len: usize) -> String {
        if max_len == 0 {
            return String::new();
        }
        let len = self.rng.gen_range(0, max_len);
        let mut ret = String::with_capacity(len);
        while ret.len() < len {
            let idx = self.rng.gen_range(0, ALPHABET.len());
            ret.push(ALPHABET[idx] as char);
        }
        ret
    }

    /// Year, month and day are drawn independently
    pub fn gen_date(&mut self) -> NaiveDate {
        let year = self.rng.gen_range(YEAR_RANGE.0, YEAR_RANGE.1);
        let month = self.rng.gen_range(MONTH_RANGE.0, MONTH_RANGE.1);
        let day = self.rng.gen_range(DAY_RANGE.0, DAY_RANGE.1);
        NaiveDate::from_ymd_opt(year, month, day)
            .expect("every month has at least 28 days")
    }

    pub fn gen_number(&mut self) -> i32 {
        self.rng.gen_range(0, NUMBER_UPPER)
    }
}

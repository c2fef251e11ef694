#[cfg(test)]
mod test {
    use bigdata::generator::RecordGenerator;
    use bigdata::record::{Record, NAME_MAX_LEN, TEXT_MAX_LEN};
    use bigdata::store::{BigDataStore, ConnectionSource, StoreError};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rusqlite::Connection;
    use std::collections::{BTreeSet, HashMap};
    use std::error::Error;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::TempDir;

    fn temp_store() -> (TempDir, BigDataStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = BigDataStore::open(dir.path().join("test.db")).unwrap();
        (dir, store)
    }

    fn seeded_batch(seed: u64, amount: usize) -> Vec<Record> {
        RecordGenerator::with_rng(StdRng::seed_from_u64(seed)).generate(amount)
    }

    fn ids(records: &[Record]) -> BTreeSet<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct Unreachable;

    impl ConnectionSource for Unreachable {
        fn connect(&self) -> Result<Connection, StoreError> {
            Err(StoreError::new("database unreachable"))
        }
    }

    #[test]
    fn test_fresh_store_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.table_exists().unwrap());
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.fetch_all().unwrap().is_empty());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reopen.db");
        {
            let store = BigDataStore::open(&path).unwrap();
            store.insert_batch(10).unwrap();
        }
        let store = BigDataStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 10);
    }

    #[test]
    fn test_insert_batch() {
        let (_dir, store) = temp_store();
        let batch = store.insert_batch(250).unwrap();
        assert_eq!(batch.len(), 250);
        assert_eq!(store.count().unwrap(), 250);

        let fetched = store.fetch_all().unwrap();
        assert_eq!(ids(&fetched), ids(&batch));
        assert_eq!(ids(&fetched), (1..=250).collect::<BTreeSet<i64>>());
    }

    #[test]
    fn test_insert_zero() {
        let (_dir, store) = temp_store();
        assert!(store.insert_batch(0).unwrap().is_empty());
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_rows_read_back_unchanged() {
        let (_dir, store) = temp_store();
        let batch = seeded_batch(11, 100);
        assert_eq!(store.insert_records(&batch).unwrap(), 100);

        let mut fetched = store.fetch_all().unwrap();
        fetched.sort_by_key(|r| r.id);
        assert_eq!(fetched, batch);
    }

    #[test]
    fn test_update_batch_touches_first_rows_only() {
        let (_dir, store) = temp_store();
        let original = seeded_batch(12, 50);
        store.insert_records(&original).unwrap();

        let (refreshed, updated) = store.update_batch(20).unwrap();
        assert_eq!(updated, 20);
        assert_eq!(store.count().unwrap(), 50);

        let mut fetched = store.fetch_all().unwrap();
        fetched.sort_by_key(|r| r.id);
        assert_eq!(ids(&fetched), ids(&original));
        for (row, before) in fetched.iter().zip(original.iter()) {
            if row.id <= 20 {
                assert_eq!(row, &refreshed[(row.id - 1) as usize]);
                assert_ne!(row, before);
            } else {
                assert_eq!(row, before);
            }
        }
    }

    #[test]
    fn test_update_more_than_present() {
        let (_dir, store) = temp_store();
        store.insert_records(&seeded_batch(13, 5)).unwrap();
        let updated = store.update_records(&seeded_batch(14, 8)).unwrap();
        assert_eq!(updated, 5);
        assert_eq!(store.count().unwrap(), 5);
    }

    #[test]
    fn test_clear_all() {
        let (_dir, store) = temp_store();
        store.insert_batch(30).unwrap();
        assert_eq!(store.clear_all().unwrap(), 30);
        assert_eq!(store.count().unwrap(), 0);
        assert!(store.fetch_all().unwrap().is_empty());
        assert!(store.table_exists().unwrap());
    }

    #[test]
    fn test_second_insert_batch_conflicts() {
        let (_dir, store) = temp_store();
        store.insert_batch(10).unwrap();
        let err = store.insert_batch(10).unwrap_err();
        assert!(err.source().is_some());
        assert_eq!(store.count().unwrap(), 10);
    }

    #[test]
    fn test_failed_batch_rolls_back() {
        let (_dir, store) = temp_store();
        store.insert_records(&seeded_batch(15, 1)).unwrap();

        let mut batch = seeded_batch(16, 3);
        for (i, r) in batch.iter_mut().enumerate() {
            r.id = 100 + i as i64;
        }
        batch[2].id = 1;
        assert!(store.insert_records(&batch).is_err());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_failed_batch_without_transaction_keeps_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let store = BigDataStore::open(dir.path().join("plain.db")).unwrap().transactional(false);
        assert!(!store.is_transactional());
        store.insert_records(&seeded_batch(17, 1)).unwrap();

        let mut batch = seeded_batch(18, 4);
        for (i, r) in batch.iter_mut().enumerate() {
            r.id = 100 + i as i64;
        }
        batch[2].id = 1;
        assert!(store.insert_records(&batch).is_err());
        // rows 100 and 101 stay, 103 is never reached
        assert_eq!(store.count().unwrap(), 3);
        assert_eq!(ids(&store.fetch_all().unwrap()), vec![1, 100, 101].into_iter().collect::<BTreeSet<i64>>());
    }

    #[test]
    fn test_mode_created_at() {
        let (_dir, store) = temp_store();
        store.insert_records(&[
            Record::new(1, "a", date(1500, 3, 4), "", 0),
            Record::new(2, "b", date(4000, 12, 28), "", 0),
            Record::new(3, "c", date(1500, 3, 4), "", 0),
            Record::new(4, "d", date(2000, 1, 1), "", 0)
        ]).unwrap();
        assert_eq!(store.mode_created_at().unwrap(), Some(date(1500, 3, 4)));
    }

    #[test]
    fn test_aggregates() {
        let (_dir, store) = temp_store();
        store.insert_records(&[
            Record::new(1, "abcd", date(2000, 1, 1), "see", 10),
            Record::new(2, "abcdef", date(2000, 1, 1), "tree", 20),
            Record::new(3, "abcdefgh", date(2000, 1, 2), "TREE", 31)
        ]).unwrap();
        assert_eq!(store.avg_name_length().unwrap(), Some(6));
        assert_eq!(store.text_e_count().unwrap(), 4);
        assert_eq!(store.avg_number().unwrap(), Some(20));
        assert_eq!(store.mode_created_at().unwrap(), Some(date(2000, 1, 1)));
    }

    #[test]
    fn test_unreachable_source() {
        match BigDataStore::new(Unreachable) {
            Ok(_) => panic!("store created without a database"),
            Err(e) => {
                assert_eq!(e.message(), "database unreachable");
                assert!(e.source().is_none());
            }
        }
    }

    #[test]
    fn test_unopenable_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = BigDataStore::open(dir.path()).err().unwrap();
        assert!(err.source().is_some());
    }

    #[test]
    fn test_concurrent_insert_and_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let store = BigDataStore::open(dir.path().join("concurrent.db")).unwrap().transactional(false);
        let store = Arc::new(store);

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                store.insert_batch(300).unwrap();
            })
        };
        let reader = {
            let store = store.clone();
            thread::spawn(move || {
                let mut seen = 0;
                for _ in 0..20 {
                    let rows = store.fetch_all().unwrap();
                    assert!(rows.len() >= seen);
                    seen = rows.len();
                    for row in rows.iter() {
                        assert!(row.id >= 1 && row.id <= 300);
                        assert!(row.owner_name.len() < NAME_MAX_LEN);
                        assert!(row.text.len() < TEXT_MAX_LEN);
                        assert!(row.number >= 0);
                    }
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(store.count().unwrap(), 300);
    }

    #[test]
    fn test_fetch_all_ids_unique() {
        let (_dir, store) = temp_store();
        store.insert_batch(120).unwrap();
        store.update_batch(60).unwrap();
        let rows = store.fetch_all().unwrap();
        let mut seen = HashMap::new();
        for row in rows.iter() {
            assert!(seen.insert(row.id, ()).is_none());
        }
        assert_eq!(seen.len(), 120);
    }

    #[test]
    fn test_concurrent_transactional_batch_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(BigDataStore::open(dir.path().join("atomic.db")).unwrap());
        assert!(store.is_transactional());

        let writer = {
            let store = store.clone();
            thread::spawn(move || {
                store.insert_batch(2000).unwrap();
            })
        };
        let reader = {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let n = store.fetch_all().unwrap().len();
                    assert!(n == 0 || n == 2000, "saw {} rows of a 2000 row batch", n);
                }
            })
        };

        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(store.count().unwrap(), 2000);
    }

    #[test]
    fn test_simultaneous_open_of_new_file() {
        for round in 0..30 {
            let dir = tempfile::tempdir().unwrap();
            let path = Arc::new(dir.path().join(format!("race{}.db", round)));
            let barrier = Arc::new(Barrier::new(4));

            let openers = (0..4)
                .map(|_| {
                    let path = path.clone();
                    let barrier = barrier.clone();
                    thread::spawn(move || {
                        barrier.wait();
                        BigDataStore::open(path.as_path()).map(|_| ())
                    })
                })
                .collect::<Vec<_>>();

            for opener in openers {
                if let Err(e) = opener.join().unwrap() {
                    panic!("round {}: {}", round, e);
                }
            }
            let store = BigDataStore::open(path.as_path()).unwrap();
            assert!(store.table_exists().unwrap());
            assert_eq!(store.count().unwrap(), 0);
        }
    }
}

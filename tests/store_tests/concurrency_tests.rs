//! Concurrency tests for Store
//!
//! These tests verify:
//! - Concurrent writers never lose updates
//! - insert/delete races have exactly one winner
//! - get_all never observes a torn or regressing map
//! - Persistence serializes with concurrent writers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use memdb::{Key, Store, Value};
use tempfile::TempDir;

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_concurrent_puts_distinct_keys() {
    let store = Arc::new(Store::new());
    let mut handles = vec![];

    for t in 0..8i64 {
        let store = Arc::clone(&store);
        handles.push(thread::spawn(move || {
            for i in 0..250i64 {
                store.put(t * 1000 + i, format!("t{}-{}", t, i));
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.len(), 8 * 250);
    assert_eq!(store.get(&Key::Int(7249)), Some(Value::from("t7-249")));
}

#[test]
fn test_concurrent_insert_same_key_has_one_winner() {
    let store = Arc::new(Store::new());
    let winners = Arc::new(AtomicUsize::new(0));
    let mut handles = vec![];

    for t in 0..16i64 {
        let store = Arc::clone(&store);
        let winners = Arc::clone(&winners);
        handles.push(thread::spawn(move || {
            if store.insert("contested", t) {
                winners.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_delete_same_key_has_one_winner() {
    let store = Arc::new(Store::new());
    store.put("doomed", 1);
    let winners = Arc::new(AtomicUsize::new(0));
    let mut handles = vec![];

    for _ in 0..16 {
        let store = Arc::clone(&store);
        let winners = Arc::clone(&winners);
        handles.push(thread::spawn(move || {
            if store.delete(&Key::from("doomed")) {
                winners.fetch_add(1, Ordering::SeqCst);
            }
        }));
    }

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert!(store.is_empty());
}

// =============================================================================
// Reader Consistency Tests
// =============================================================================

#[test]
fn test_get_all_never_torn_or_regressing() {
    let store = Arc::new(Store::new());
    store.put("unrelated", "constant");

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..2000i64 {
                store.put(i, i * 2);
            }
        })
    };

    let reader = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            let mut last_seen = 0;
            for _ in 0..500 {
                let all = store.get_all();
                let ints: Vec<i64> = all.keys().filter_map(Key::as_int).collect();

                // Writes land in order, so every view is a prefix 0..n
                assert!(ints.len() >= last_seen);
                for (expected, key) in ints.iter().enumerate() {
                    assert_eq!(*key, expected as i64);
                    assert_eq!(all.get(&Key::Int(*key)), Some(&Value::Int(*key * 2)));
                }
                assert_eq!(all.get(&Key::from("unrelated")), Some(&Value::from("constant")));
                last_seen = ints.len();
            }
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(store.len(), 2001);
}

#[test]
fn test_filter_sees_consistent_view() {
    let store = Arc::new(Store::new());
    store.put("a", 0);
    store.put("b", 0);

    // Writer keeps a and b equal after every completed pair of puts
    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 1..=500i64 {
                store.put("a", i);
                store.put("b", i);
            }
        })
    };

    for _ in 0..200 {
        let view = store.filter(|_, _| true);
        let a = view[&Key::from("a")].as_i64().unwrap();
        let b = view[&Key::from("b")].as_i64().unwrap();
        assert!(a == b || a == b + 1);
    }

    writer.join().unwrap();
}

// =============================================================================
// Persistence Under Contention Tests
// =============================================================================

#[test]
fn test_snapshot_saves_during_writes_are_consistent() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("contended.json");
    let store = Arc::new(Store::new());

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..1000i64 {
                store.put(i, i);
            }
        })
    };

    let saver = {
        let store = Arc::clone(&store);
        let path = path.clone();
        thread::spawn(move || {
            for _ in 0..20 {
                assert!(store.save_snapshot(&path));
            }
        })
    };

    writer.join().unwrap();
    saver.join().unwrap();
    assert!(store.save_snapshot(&path));

    let restored = Store::new();
    assert!(restored.restore_snapshot(&path));
    assert_eq!(restored.get_all(), store.get_all());
}

#[test]
fn test_stream_saves_during_writes_produce_whole_lines() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("contended.jsonl");
    let store = Arc::new(Store::new());

    let writer = {
        let store = Arc::clone(&store);
        thread::spawn(move || {
            for i in 0..500i64 {
                store.put(format!("k{}", i), i);
            }
        })
    };

    for _ in 0..10 {
        assert!(store.save_stream(&path));
        let restored = Store::new();
        assert!(restored.restore_stream(&path));
    }

    writer.join().unwrap();
}

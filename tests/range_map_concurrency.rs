// ==============================================
// RANGE MAP CONCURRENCY TESTS (integration)
// ==============================================
use std::sync::Arc;
use std::thread;

use collkit::range::{AvlTreeRangeMap, Range};
use collkit::traits::RangeMap;

fn slot(i: i64) -> Range<i64> {
    Range::new(i * 10, i * 10 + 10).unwrap()
}

#[test]
fn disjoint_writers_all_succeed() {
    let map = Arc::new(AvlTreeRangeMap::new());
    let num_threads = 8i64;
    let per_thread = 250i64;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let map = map.clone();
            thread::spawn(move || {
                for i in 0..per_thread {
                    // interleave slots across threads
                    let idx = i * num_threads + t;
                    assert!(map.insert(slot(idx), idx).is_some());
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.size(), (num_threads * per_thread) as u64);
    map.check_invariants().unwrap();
    for idx in 0..num_threads * per_thread {
        assert_eq!(map.find(&(idx * 10 + 5)).value(), Some(&idx));
    }
}

#[test]
fn competing_writers_insert_each_range_once() {
    let map = Arc::new(AvlTreeRangeMap::new());

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let map = map.clone();
            thread::spawn(move || {
                let mut won = 0u64;
                for i in 0..500 {
                    if map.insert(slot(i), t).is_some() {
                        won += 1;
                    }
                }
                won
            })
        })
        .collect();

    let total_won: u64 = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total_won, 500);
    assert_eq!(map.size(), 500);
    map.check_invariants().unwrap();
}

#[test]
fn readers_run_alongside_writers() {
    let map = Arc::new(AvlTreeRangeMap::new());
    for i in 0..100 {
        map.insert(slot(i), i);
    }

    let writer = {
        let map = map.clone();
        thread::spawn(move || {
            for round in 0..20 {
                for i in 100..200 {
                    if round % 2 == 0 {
                        map.insert(slot(i), i);
                    } else {
                        map.remove(&slot(i));
                    }
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let map = map.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    // the stable prefix is never touched by the writer
                    for i in 0..100 {
                        let hit = map.find(&(i * 10 + 5));
                        assert_eq!(hit.value(), Some(&i));
                    }
                    let size = map.size();
                    assert!((100..=200).contains(&size));
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // 20 rounds end on a remove pass.
    assert_eq!(map.size(), 100);
    map.check_invariants().unwrap();
}

#[test]
fn trait_object_usage_across_threads() {
    let map: Arc<dyn RangeMap<i64, String> + Send + Sync> = Arc::new(AvlTreeRangeMap::new());
    let handles: Vec<_> = (0..4i64)
        .map(|t| {
            let map = map.clone();
            thread::spawn(move || {
                map.insert(slot(t), format!("owner-{}", t));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(map.size(), 4);
    assert_eq!(
        map.find(&25).value().map(String::as_str),
        Some("owner-2")
    );
    map.clear();
    assert!(map.is_empty());
}

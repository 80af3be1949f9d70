//! Example demonstrating loading lookups on the SLRU cache.
//!
//! `find_or_load` is fire-and-load: on a miss it runs the loader and stores
//! the result, then returns `Ok(None)`. A second `find` reads the value.
//!
//! Run with: cargo run --example cache_loader

use std::sync::atomic::{AtomicUsize, Ordering};

use collkit::builder::SlruCacheBuilder;
use collkit::traits::CacheLoader;

struct SquareLoader {
    calls: AtomicUsize,
}

impl CacheLoader<u64, u64> for SquareLoader {
    fn load(&self, key: &u64) -> u64 {
        self.calls.fetch_add(1, Ordering::Relaxed);
        key * key
    }
}

fn main() {
    println!("=== Cache Loader Example ===\n");

    let cache = match SlruCacheBuilder::new()
        .trial_capacity(8)
        .protected_capacity(4)
        .try_build::<u64, u64>()
    {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("invalid cache configuration: {}", err);
            return;
        },
    };

    let loader = SquareLoader {
        calls: AtomicUsize::new(0),
    };

    for key in [3, 4, 3, 4, 5] {
        let _ = cache.find_or_load(&key, Some(&loader));
    }
    println!("loader calls: {}", loader.calls.load(Ordering::Relaxed));
    println!("find(4): {:?}", cache.find(&4).as_deref());

    println!("\nA closure works as a loader too:");
    let _ = cache.find_or_load(&10, Some(&|k: &u64| k + 1));
    println!("find(10): {:?}", cache.find(&10).as_deref());

    println!("\nNo loader is an error:");
    match cache.find_or_load::<SquareLoader>(&11, None) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("error: {}", err),
    }
}

// Expected output:
// === Cache Loader Example ===
//
// loader calls: 3
// find(4): Some(16)
//
// A closure works as a loader too:
// find(10): Some(11)
//
// No loader is an error:
// error: cache loader must be set

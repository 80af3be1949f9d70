//! Example demonstrating the segmented LRU cache.
//!
//! New entries go to the trial segment. Finding an entry a second time
//! promotes it to the protected segment, and a full protected segment demotes
//! its coldest entry back to trial rather than dropping it.
//!
//! Run with: cargo run --example basic_slru

use collkit::policy::slru::SlruCache;

fn main() {
    println!("=== SLRU Cache Example ===\n");

    let cache = match SlruCache::new(5, 2) {
        Ok(cache) => cache,
        Err(err) => {
            eprintln!("invalid cache configuration: {}", err);
            return;
        },
    };
    println!(
        "Created SLRU cache: trial={}, protected={}\n",
        cache.trial_capacity(),
        cache.protected_capacity()
    );

    for i in 0..8 {
        cache.put(i, format!("{0}{0}{0}", i));
    }
    println!("Put keys 0-7 (trial holds the newest 5)");
    println!("  trial: {}, protected: {}", cache.trial_len(), cache.protected_len());
    println!("  find(0): {:?} (evicted from trial)", cache.find(&0));

    println!("\nFinding keys 3 and 4 promotes them:");
    cache.find(&3);
    cache.find(&4);
    println!("  trial: {}, protected: {}", cache.trial_len(), cache.protected_len());

    println!("\nFinding key 5 overflows protected; the coldest entry is demoted:");
    cache.find(&5);
    println!("  contains 3? {}", cache.contains(&3));
    println!("  trial: {}, protected: {}", cache.trial_len(), cache.protected_len());

    println!("\n=== Scan Resistance Demo ===\n");
    for i in 100..120 {
        cache.put(i, format!("scan-{}", i));
    }
    println!("After 20 one-time puts:");
    println!("  contains 4? {} (protected)", cache.contains(&4));
    println!("  contains 5? {} (protected)", cache.contains(&5));
    println!("  len: {}", cache.len());
}

// Expected output:
// === SLRU Cache Example ===
//
// Created SLRU cache: trial=5, protected=2
//
// Put keys 0-7 (trial holds the newest 5)
//   trial: 5, protected: 0
//   find(0): None (evicted from trial)
//
// Finding keys 3 and 4 promotes them:
//   trial: 3, protected: 2
//
// Finding key 5 overflows protected; the coldest entry is demoted:
//   contains 3? true
//   trial: 3, protected: 2
//
// === Scan Resistance Demo ===
//
// After 20 one-time puts:
//   contains 4? true (protected)
//   contains 5? true (protected)
//   len: 7

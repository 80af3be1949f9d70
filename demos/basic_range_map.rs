//! Example demonstrating the AVL range map.
//!
//! Ranges are closed intervals. Two ranges may share an endpoint, but any
//! other overlap is rejected on insert.
//!
//! Run with: cargo run --example basic_range_map

use collkit::range::{AvlTreeRangeMap, Range};

fn main() {
    println!("=== AVL Range Map Example ===\n");

    let map = AvlTreeRangeMap::new();
    let bands = [
        (0, 18, "child"),
        (18, 65, "adult"),
        (65, 130, "senior"),
    ];
    for (min, max, label) in bands {
        match Range::new(min, max) {
            Ok(range) => {
                println!("insert {} -> {:?}", range, map.insert(range.clone(), label));
            },
            Err(err) => println!("skipping band: {}", err),
        }
    }

    println!("\nOverlapping insert:");
    if let Ok(range) = Range::new(40, 70) {
        println!("insert {} -> {:?}", range, map.insert(range.clone(), "bogus"));
    }

    println!("\nLookups:");
    for age in [7, 18, 42, 99, 200] {
        let hit = map.find(&age);
        match hit.into_inner() {
            Some((range, label)) => println!("  {:>3} in {} -> {}", age, range, label),
            None => println!("  {:>3} -> no band", age),
        }
    }

    println!("\nsize: {}, height: {}", map.size(), map.height());

    if let Ok(adult) = Range::new(18, 65) {
        println!("remove [18, 65] -> {:?}", map.remove(&adult));
    }
    println!("find(42) present? {}", map.find(&42).is_present());
    println!("ranges: {:?}", map.ranges());
}

// Expected output:
// === AVL Range Map Example ===
//
// insert [0, 18] -> Some("child")
// insert [18, 65] -> Some("adult")
// insert [65, 130] -> Some("senior")
//
// Overlapping insert:
// insert [40, 70] -> None
//
// Lookups:
//     7 in [0, 18] -> child
//    18 in [18, 65] -> adult
//    42 in [18, 65] -> adult
//    99 in [65, 130] -> senior
//   200 -> no band
//
// size: 3, height: 2
// remove [18, 65] -> Some("adult")
// find(42) present? false
// ranges: [Range { min: 0, max: 18 }, Range { min: 65, max: 130 }]

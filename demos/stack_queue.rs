//! Example demonstrating the lock-free stack and the FIFO queue.
//!
//! Run with: cargo run --example stack_queue

use std::sync::Arc;
use std::thread;

use collkit::ds;
use collkit::traits::{Queue, Stack};

fn drain<S: Stack<u32>>(stack: &S) -> Vec<u32> {
    let mut out = Vec::new();
    while let Some(v) = stack.pop() {
        out.push(v);
    }
    out
}

fn main() {
    println!("=== Treiber Stack ===\n");

    let stack = Arc::new(ds::stack());
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let stack = Arc::clone(&stack);
            thread::spawn(move || {
                for i in 0..3 {
                    stack.push(t * 10 + i);
                }
            })
        })
        .collect();
    for handle in handles {
        let _ = handle.join();
    }

    println!("size after 4 threads x 3 pushes: {}", stack.size());
    let mut values = drain(&*stack);
    values.sort_unstable();
    println!("popped (sorted): {:?}", values);
    println!("empty: {}", stack.is_empty());

    println!("\n=== FIFO Queue ===\n");

    let queue = ds::fifo_queue();
    for word in ["first", "second", "third"] {
        let _ = queue.offer(word);
    }
    println!("peek: {:?}", Queue::peek(&queue));
    while let Some(word) = queue.poll() {
        println!("poll: {}", word);
    }

    let bounded = match ds::LinkedQueue::bounded(1) {
        Ok(queue) => queue,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };
    println!("\nbounded offer 1: {:?}", bounded.offer(1));
    println!("bounded offer 2: {:?}", bounded.offer(2));
}

// Expected output:
// === Treiber Stack ===
//
// size after 4 threads x 3 pushes: 12
// popped (sorted): [0, 1, 2, 10, 11, 12, 20, 21, 22, 30, 31, 32]
// empty: true
//
// === FIFO Queue ===
//
// peek: Some("first")
// poll: first
// poll: second
// poll: third
//
// bounded offer 1: Ok(())
// bounded offer 2: Err(2)

//! Benchmarks for TreiberStack and LinkedQueue.
//!
//! Run with: `cargo bench --bench stack_queue`

use std::hint::black_box;
use std::sync::Arc;
use std::thread;

use collkit::ds::{LinkedQueue, TreiberStack};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const OPS: u64 = 4096;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_queue");
    group.throughput(Throughput::Elements(OPS * 2));

    group.bench_function("treiber_push_pop", |b| {
        let stack = TreiberStack::new();
        b.iter(|| {
            for i in 0..OPS {
                stack.push(black_box(i));
            }
            for _ in 0..OPS {
                black_box(stack.pop());
            }
        })
    });

    group.bench_function("queue_offer_poll", |b| {
        let queue = LinkedQueue::new();
        b.iter(|| {
            for i in 0..OPS {
                let _ = queue.offer(black_box(i));
            }
            for _ in 0..OPS {
                black_box(queue.poll());
            }
        })
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("stack_queue");
    let threads = 4u64;
    group.throughput(Throughput::Elements(threads * OPS * 2));

    group.bench_function("treiber_contended", |b| {
        let stack = Arc::new(TreiberStack::new());
        b.iter(|| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let stack = stack.clone();
                    thread::spawn(move || {
                        for i in 0..OPS {
                            stack.push(i);
                            black_box(stack.pop());
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        })
    });

    group.bench_function("queue_contended", |b| {
        let queue = Arc::new(LinkedQueue::new());
        b.iter(|| {
            let handles: Vec<_> = (0..threads)
                .map(|_| {
                    let queue = queue.clone();
                    thread::spawn(move || {
                        for i in 0..OPS {
                            let _ = queue.offer(i);
                            black_box(queue.poll());
                        }
                    })
                })
                .collect();
            for handle in handles {
                let _ = handle.join();
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_contended);
criterion_main!(benches);

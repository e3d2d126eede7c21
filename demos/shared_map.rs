//! Sharing a bounded map between threads.
//!
//! Run with: cargo run --example shared_map --features concurrency

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use evictkit::concurrent::ConcurrentOrderedMap;
use evictkit::config::OrderingMode;

fn main() {
    println!("=== Shared map ===\n");

    let evictions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&evictions);
    let sessions = ConcurrentOrderedMap::new(Some(100), OrderingMode::Access)
        .expect("capacity is positive")
        .with_on_evict(move |_id: u64, _user: String| {
            counter.fetch_add(1, Ordering::Relaxed);
        });

    let workers: Vec<_> = (0..4u64)
        .map(|worker| {
            let sessions = sessions.clone();
            thread::spawn(move || {
                for i in 0..250u64 {
                    let id = worker * 1_000 + i;
                    sessions.put(id, format!("user-{id}"));
                    // Keep a small hot set alive.
                    sessions.get(&(worker * 1_000));
                }
            })
        })
        .collect();

    for worker in workers {
        if worker.join().is_err() {
            eprintln!("worker panicked");
        }
    }

    println!("resident sessions: {}", sessions.len());
    println!("evicted sessions:  {}", evictions.load(Ordering::Relaxed));
    for worker in 0..4u64 {
        let id = worker * 1_000;
        println!("hot session {id} resident? {}", sessions.contains(&id));
    }
}

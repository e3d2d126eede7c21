//! An access-ordered, bounded map used as an LRU cache.
//!
//! Run with: RUST_LOG=evictkit=trace cargo run --example lru_cache

use std::sync::{Arc, Mutex};

use evictkit::OrderedMapBuilder;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== LRU cache ===\n");

    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let mut cache = OrderedMapBuilder::new()
        .capacity(3)
        .access_order()
        .on_evict(move |k: u32, v: &'static str| {
            println!("   evicted {k} => {v}");
            if let Ok(mut log) = sink.lock() {
                log.push(k);
            }
        })
        .build();

    cache.put(1, "A");
    cache.put(2, "B");
    cache.put(3, "C");
    println!("after three puts:   {:?}", cache.entries());

    // Reading 1 makes it the most recently used.
    cache.get(&1);
    println!("after get(1):       {:?}", cache.entries());

    // Inserting 4 pushes out 2, the least recently used.
    cache.put(4, "D");
    println!("after put(4):       {:?}", cache.entries());

    // peek does not count as a use.
    println!("peek(3) = {:?}", cache.peek(&3));
    println!("order unchanged:    {:?}", cache.entries());

    if let Ok(log) = evicted.lock() {
        println!("\nevicted keys: {:?}", *log);
    }
}

//! An unbounded, insertion-ordered map: deterministic iteration order that
//! ignores reads and updates.
//!
//! Run with: cargo run --example insertion_order

use evictkit::OrderedEvictingMap;
use evictkit::config::OrderingMode;

fn main() {
    println!("=== Insertion order ===\n");

    let mut headers = OrderedEvictingMap::new(None, OrderingMode::Insertion)
        .expect("unbounded config is always valid");

    headers.put("host", "example.org");
    headers.put("accept", "*/*");
    headers.put("user-agent", "demo/1.0");

    // Updating keeps the original position.
    headers.put("host", "example.com");
    headers.get(&"accept");

    for (name, value) in &headers {
        println!("{name}: {value}");
    }

    println!("\nfirst inserted: {:?}", headers.peek_lru());
    println!("last inserted:  {:?}", headers.peek_mru());

    match OrderedEvictingMap::<&str, &str>::new(Some(0), OrderingMode::Insertion) {
        Ok(_) => println!("unexpected: zero capacity accepted"),
        Err(e) => println!("\nzero capacity rejected: {e}"),
    }
}

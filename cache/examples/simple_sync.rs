use std::thread;
use std::time::Duration;
use tiercache::{CacheBuilder, EvictionPolicy};

fn main() {
  // Create a cache with a capacity of 100 items, a 5-second TTL,
  // and a 1-second janitor sweep interval.
  let cache = CacheBuilder::default()
    .capacity(100)
    .policy(EvictionPolicy::Lru)
    .time_to_live(Duration::from_secs(5))
    .sweep_interval(Duration::from_secs(1))
    .build()
    .expect("Failed to build cache");

  println!("Inserting ('key1', 100) into the cache.");
  cache.insert("key1".to_string(), 100);

  match cache.get(&"key1".to_string()) {
    Some(value) => println!("Found value for key1: {}", value),
    None => println!("Value for key1 not found."),
  }

  println!("\nCache stats: {:#?}", cache.metrics());

  println!("\nWaiting for 6 seconds for the item to expire...");
  thread::sleep(Duration::from_secs(6));

  // The janitor runs every second and will have removed the expired item.
  println!("Entries left: {}", cache.len());
  match cache.get(&"key1".to_string()) {
    Some(value) => println!("Found value for key1: {}", value),
    None => println!("Value for key1 not found (as expected after TTL)."),
  }

  println!("\nCache stats after expiration: {:#?}", cache.metrics());
}

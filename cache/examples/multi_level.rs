use tiercache::{EvictionPolicy, MultiLevelCacheBuilder};

fn main() {
  let cache = MultiLevelCacheBuilder::default()
    .l1_capacity(2)
    .l2_capacity(10)
    .policy(EvictionPolicy::Lfu)
    .build()
    .expect("Failed to build cache");

  for (key, value) in [("alpha", 1), ("beta", 2), ("gamma", 3)] {
    cache.insert(key, value);
  }
  println!("L1 holds {} entries, L2 holds {}.", cache.l1().len(), cache.l2().len());

  // "alpha" fell out of L1; reading it is served by L2 and promoted.
  if let Some(value) = cache.get(&"alpha") {
    println!("alpha = {value} (promoted: {})", cache.l1().contains_key(&"alpha"));
  }

  let stats = cache.stats();
  println!("L1: {:#?}", stats.l1.snapshot());
  println!("L2: {:#?}", stats.l2.snapshot());
}

use super::{min_by_rank, Candidate, VictimSelector};

/// Evicts an already-expired entry when one exists, otherwise the oldest
/// entry by creation time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ttl;

impl VictimSelector for Ttl {
  fn select<'a, K>(&self, candidates: &'a [Candidate<K>]) -> Option<&'a Candidate<K>> {
    candidates
      .iter()
      .filter(|c| c.expired)
      .min_by_key(|c| c.seq)
      .or_else(|| min_by_rank(candidates, |c| c.created_at))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::policy::test_support::candidate;

  #[test]
  fn prefers_expired_entries() {
    let old = candidate("old", 0);
    let mut expired = candidate("expired", 5);
    expired.expired = true;
    let young = candidate("young", 9);

    assert_eq!(Ttl.select(&[old, expired, young]).unwrap().key, "expired");
  }

  #[test]
  fn falls_back_to_oldest_creation() {
    let mut hot = candidate("hot", 0);
    hot.access_count = 100;
    hot.last_accessed = 1_000;
    let cold = candidate("cold", 1);

    assert_eq!(Ttl.select(&[cold, hot]).unwrap().key, "hot");
  }
}

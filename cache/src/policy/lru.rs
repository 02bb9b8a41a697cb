use super::{min_by_rank, Candidate, VictimSelector};

/// Evicts the least recently used entry: the smallest `last_accessed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lru;

impl VictimSelector for Lru {
  fn select<'a, K>(&self, candidates: &'a [Candidate<K>]) -> Option<&'a Candidate<K>> {
    min_by_rank(candidates, |c| c.last_accessed)
  }
}

use super::{min_by_rank, Candidate, VictimSelector};

/// Evicts the least frequently used entry: the smallest `access_count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lfu;

impl VictimSelector for Lfu {
  fn select<'a, K>(&self, candidates: &'a [Candidate<K>]) -> Option<&'a Candidate<K>> {
    min_by_rank(candidates, |c| c.access_count)
  }
}

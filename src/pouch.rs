// src/pouch.rs
// The pouch of candidate entries a board is drawn from.
//
// Entries are grouped by the list they were loaded from. Each list may carry a
// cap on how many of its entries end up on one board; a draw that lands on a
// list already at its cap moves on to the next list.

use rand::Rng;
use serde::Serialize;

use crate::defs::{BOARD_SIZE, labels_needed};
use crate::error::BingoError;

/// One input list of entries with an optional draw cap (`None` = unbounded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceList {
    pub name: String,
    pub entries: Vec<String>,
    pub max_draws: Option<usize>,
}

impl SourceList {
    pub fn new(entries: Vec<String>, max_draws: Option<usize>) -> Self {
        Self::named("", entries, max_draws)
    }

    pub fn named(name: &str, entries: Vec<String>, max_draws: Option<usize>) -> Self {
        SourceList {
            name: name.to_string(),
            entries,
            max_draws,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// Sum of entries across all lists
pub fn total_entries(lists: &[SourceList]) -> usize {
    lists.iter().map(SourceList::len).sum()
}

/// Working copy of the source lists for a single board fill.
///
/// The pool owns its own copy of every entry, so drawing never touches the
/// caller's lists. Build a fresh pool for every fill.
#[derive(Debug, Clone)]
pub struct EntryPool {
    lists: Vec<Vec<String>>,
    caps: Vec<Option<usize>>,
    drawn: Vec<usize>,
}

impl EntryPool {
    /// Pool for the standard board size.
    pub fn new(lists: &[SourceList]) -> Result<Self, BingoError> {
        Self::for_board(lists, BOARD_SIZE)
    }

    /// Pool for a `size` x `size` board. Fails if the lists together hold fewer
    /// entries than the board has non-center cells.
    pub fn for_board(lists: &[SourceList], size: usize) -> Result<Self, BingoError> {
        let required = labels_needed(size);
        let available = total_entries(lists);
        if available < required {
            return Err(BingoError::InvalidInput { required, available });
        }

        Ok(EntryPool {
            lists: lists.iter().map(|list| list.entries.clone()).collect(),
            caps: lists.iter().map(|list| list.max_draws).collect(),
            drawn: vec![0; lists.len()],
        })
    }

    pub fn num_lists(&self) -> usize {
        self.lists.len()
    }

    /// Entries still available across all lists.
    pub fn remaining(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn drawn_count(&self, list: usize) -> usize {
        self.drawn.get(list).copied().unwrap_or(0)
    }

    fn is_under_cap(&self, list: usize) -> bool {
        self.caps[list].is_none_or(|max| self.drawn[list] < max)
    }

    // Walk the lists starting at `start` looking for one under its cap. When
    // every list is capped the caps stop applying and `start` is used.
    fn resolve_list(&self, start: usize) -> usize {
        let count = self.lists.len();

        let mut list = start;
        loop {
            if self.is_under_cap(list) {
                return list;
            }
            list = (list + 1) % count;
            if list == start {
                return start;
            }
        }
    }

    /// Remove one random entry from a random list, honoring caps.
    ///
    /// Uses exactly two draws from `rng` per call (list, then entry), so a
    /// seeded source reproduces the same sequence of entries. Caps only steer
    /// the choice of list: an empty list that is under its cap still gets
    /// picked and fails with `ExhaustedPool`.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String, BingoError> {
        if self.lists.is_empty() {
            return Err(BingoError::ExhaustedPool { list: 0 });
        }

        let picked = rng.random_range(0..self.lists.len());
        let list = self.resolve_list(picked);
        if self.lists[list].is_empty() {
            return Err(BingoError::ExhaustedPool { list });
        }

        let index = rng.random_range(0..self.lists[list].len());
        let entry = self.lists[list].remove(index);
        self.drawn[list] += 1;

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn words(prefix: &str, count: usize) -> Vec<String> {
        (0..count).map(|i| format!("{prefix}{i}")).collect()
    }

    fn alphabet() -> Vec<String> {
        ('A'..='Y').map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_construct_rejects_short_input() {
        let lists = vec![SourceList::new(words("w", 10), None)];
        let result = EntryPool::new(&lists);
        assert_eq!(
            result.unwrap_err(),
            BingoError::InvalidInput { required: 24, available: 10 }
        );
    }

    #[test]
    fn test_construct_accepts_exact_count() {
        let lists = vec![
            SourceList::new(words("a", 20), None),
            SourceList::new(words("b", 4), Some(1)),
        ];
        let pool = EntryPool::new(&lists).unwrap();
        assert_eq!(pool.num_lists(), 2);
        assert_eq!(pool.remaining(), 24);
    }

    #[test]
    fn test_draws_do_not_touch_source_lists() {
        let lists = vec![SourceList::new(alphabet(), None)];
        let mut pool = EntryPool::new(&lists).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..24 {
            pool.draw_one(&mut rng).unwrap();
        }
        assert_eq!(lists[0].entries, alphabet());
        assert_eq!(pool.remaining(), 1);
    }

    #[test]
    fn test_draws_are_unique_until_empty() {
        let lists = vec![SourceList::new(words("a", 29), None)];
        let mut pool = EntryPool::new(&lists).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut seen = HashSet::new();
        for _ in 0..29 {
            let entry = pool.draw_one(&mut rng).unwrap();
            assert!(seen.insert(entry), "entry drawn twice");
        }
        assert!(pool.is_empty());
        assert_eq!(
            pool.draw_one(&mut rng),
            Err(BingoError::ExhaustedPool { list: 0 })
        );
    }

    #[test]
    fn test_emptied_unbounded_list_fails_when_picked_again() {
        let lists = vec![
            SourceList::new(vec!["solo".to_string()], None),
            SourceList::new(words("w", 30), None),
        ];
        for seed in 0..20 {
            let mut pool = EntryPool::new(&lists).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);

            let mut solo_drawn = false;
            let mut failed = false;
            for _ in 0..24 {
                match pool.draw_one(&mut rng) {
                    Ok(entry) => solo_drawn |= entry == "solo",
                    Err(err) => {
                        assert_eq!(err, BingoError::ExhaustedPool { list: 0 });
                        assert!(solo_drawn);
                        failed = true;
                        break;
                    }
                }
            }
            assert!(failed, "seed {seed} never picked the emptied list");
        }
    }

    #[test]
    fn test_zero_cap_list_is_skipped() {
        let lists = vec![
            SourceList::new(vec!["never".to_string()], Some(0)),
            SourceList::new(words("w", 30), None),
        ];
        let mut pool = EntryPool::new(&lists).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..24 {
            let entry = pool.draw_one(&mut rng).unwrap();
            assert_ne!(entry, "never");
        }
        assert_eq!(pool.drawn_count(0), 0);
        assert_eq!(pool.drawn_count(1), 24);
    }

    #[test]
    fn test_caps_are_honored_while_capacity_remains() {
        let lists = vec![
            SourceList::new(words("a", 10), Some(3)),
            SourceList::new(words("b", 10), Some(5)),
            SourceList::new(words("c", 30), None),
        ];
        for seed in 0..20 {
            let mut pool = EntryPool::new(&lists).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            for _ in 0..24 {
                pool.draw_one(&mut rng).unwrap();
            }
            assert!(pool.drawn_count(0) <= 3);
            assert!(pool.drawn_count(1) <= 5);
            assert_eq!(pool.drawn_count(0) + pool.drawn_count(1) + pool.drawn_count(2), 24);
        }
    }

    #[test]
    fn test_caps_become_advisory_when_all_saturated() {
        let lists = vec![
            SourceList::new(words("a", 30), Some(2)),
            SourceList::new(words("b", 30), Some(2)),
        ];
        let mut pool = EntryPool::new(&lists).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..24 {
            pool.draw_one(&mut rng).unwrap();
        }
        assert_eq!(pool.drawn_count(0) + pool.drawn_count(1), 24);
        assert_eq!(pool.remaining(), 36);
    }

    // Step-by-step rendition of a draw: pick a list, walk forward past capped
    // lists, stay on the picked list if all are capped, then pick an entry.
    fn replay_draws(lists: &[SourceList], seed: u64, draws: usize) -> Vec<Result<String, usize>> {
        let mut entries: Vec<Vec<String>> = lists.iter().map(|l| l.entries.clone()).collect();
        let mut drawn = vec![0; lists.len()];
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut out = Vec::new();

        for _ in 0..draws {
            let picked = rng.random_range(0..lists.len());
            let mut list = picked;
            while lists[list].max_draws.is_some_and(|max| drawn[list] >= max) {
                list = (list + 1) % lists.len();
                if list == picked {
                    break;
                }
            }
            if entries[list].is_empty() {
                out.push(Err(list));
                break;
            }
            let index = rng.random_range(0..entries[list].len());
            out.push(Ok(entries[list].remove(index)));
            drawn[list] += 1;
        }
        out
    }

    #[test]
    fn test_saturated_draws_stay_on_picked_list() {
        let lists = vec![
            SourceList::new(words("a", 20), Some(2)),
            SourceList::new(words("b", 20), Some(3)),
            SourceList::new(words("c", 20), Some(1)),
        ];
        for seed in 0..50 {
            let expected = replay_draws(&lists, seed, 24);

            let mut pool = EntryPool::new(&lists).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let mut actual = Vec::new();
            for _ in 0..24 {
                match pool.draw_one(&mut rng) {
                    Ok(entry) => actual.push(Ok(entry)),
                    Err(BingoError::ExhaustedPool { list }) => {
                        actual.push(Err(list));
                        break;
                    }
                    Err(err) => panic!("unexpected error {err}"),
                }
            }
            assert_eq!(actual, expected, "seed {seed}");
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let lists = vec![
            SourceList::new(words("a", 15), Some(6)),
            SourceList::new(words("b", 30), None),
        ];
        let draw_all = |seed: u64| {
            let mut pool = EntryPool::new(&lists).unwrap();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (0..24).map(|_| pool.draw_one(&mut rng).unwrap()).collect::<Vec<_>>()
        };
        assert_eq!(draw_all(99), draw_all(99));
    }
}

//! An ordered set over `0..capacity` with O(1) membership, add and remove.
//!
//! Represented as a permutation of `0..capacity` split by a pivot: the
//! prefix `perm[0..size]` is the "in" partition, the suffix is "out". Adding
//! or removing an index swaps it across the pivot instead of shifting
//! anything, which is what keeps every operation but `shuffle_in`/`clear`/
//! `fill` O(1).

use crate::error::bug;
use rand::Rng;

/// Indexed set over `0..capacity`, see the module documentation.
#[derive(Debug, Clone)]
pub struct IndexedSet {
    /// `perm[0..size]` are the members, `perm[size..]` are the non-members.
    perm: Vec<usize>,
    /// Inverse of `perm`: `pos[i]` is the slot in `perm` holding `i`.
    pos: Vec<usize>,
    size: usize,
}

impl IndexedSet {
    /// Creates an empty indexed set over `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        let perm: Vec<usize> = (0..capacity).collect();
        let pos = perm.clone();
        Self {
            perm,
            pos,
            size: 0,
        }
    }

    /// Total number of indices tracked (members + non-members).
    pub fn capacity(&self) -> usize {
        self.perm.len()
    }

    /// Number of members currently "in".
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `i` is currently a member.
    pub fn contains(&self, i: usize) -> bool {
        self.pos[i] < self.size
    }

    /// Adds `i` to the set.
    ///
    /// Panics (a programmer error in the caller) if `i` is already a member.
    pub fn add(&mut self, i: usize) {
        if self.contains(i) {
            bug!("IndexedSet::add: index {i} is already in the set");
        }
        self.swap_to(i, self.size);
        self.size += 1;
    }

    /// Removes `i` from the set.
    ///
    /// Panics (a programmer error in the caller) if `i` is not a member.
    pub fn remove(&mut self, i: usize) {
        if !self.contains(i) {
            bug!("IndexedSet::remove: index {i} is not in the set");
        }
        self.size -= 1;
        self.swap_to(i, self.size);
    }

    /// Removes every member, leaving `out` with everything.
    pub fn clear(&mut self) {
        self.size = 0;
    }

    /// Adds every index, leaving `in` with everything.
    pub fn fill(&mut self) {
        self.size = self.perm.len();
    }

    /// Iterates over the current members. Order is arbitrary but stable
    /// between mutations.
    pub fn iter_in(&self) -> impl Iterator<Item = usize> + '_ {
        self.perm[0..self.size].iter().copied()
    }

    /// Iterates over the current non-members.
    pub fn iter_out(&self) -> impl Iterator<Item = usize> + '_ {
        self.perm[self.size..].iter().copied()
    }

    /// Fisher-Yates shuffle restricted to the "in" partition. O(size).
    pub fn shuffle_in<R: Rng>(&mut self, rng: &mut R) {
        for i in (1..self.size).rev() {
            let j = rng.random_range(0..=i);
            self.perm.swap(i, j);
            self.pos[self.perm[i]] = i;
            self.pos[self.perm[j]] = j;
        }
    }

    /// Swaps `i`'s slot with slot `target`, updating both permutation arrays.
    fn swap_to(&mut self, i: usize, target: usize) {
        let slot = self.pos[i];
        if slot == target {
            return;
        }
        let other = self.perm[target];
        self.perm.swap(slot, target);
        self.pos[i] = target;
        self.pos[other] = slot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn add_remove_contains() {
        let mut s = IndexedSet::new(5);
        assert_eq!(s.size(), 0);
        s.add(2);
        s.add(4);
        assert!(s.contains(2) && s.contains(4));
        assert!(!s.contains(0));
        assert_eq!(s.size(), 2);
        s.remove(2);
        assert!(!s.contains(2));
        assert_eq!(s.size(), 1);
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn double_add_panics() {
        let mut s = IndexedSet::new(3);
        s.add(0);
        s.add(0);
    }

    #[test]
    #[should_panic(expected = "invariant violation")]
    fn double_remove_panics() {
        let mut s = IndexedSet::new(3);
        s.remove(0);
    }

    #[test]
    fn clear_and_fill() {
        let mut s = IndexedSet::new(4);
        s.fill();
        assert_eq!(s.size(), 4);
        let mut members: Vec<_> = s.iter_in().collect();
        members.sort();
        assert_eq!(members, vec![0, 1, 2, 3]);
        s.clear();
        assert_eq!(s.size(), 0);
        assert_eq!(s.iter_out().count(), 4);
    }

    #[test]
    fn shuffle_preserves_membership() {
        let mut s = IndexedSet::new(10);
        for i in 0..6 {
            s.add(i);
        }
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        s.shuffle_in(&mut rng);
        let mut members: Vec<_> = s.iter_in().collect();
        members.sort();
        assert_eq!(members, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn add_after_remove_reuses_slot() {
        let mut s = IndexedSet::new(5);
        for i in 0..5 {
            s.add(i);
        }
        s.remove(2);
        s.add(2);
        assert_eq!(s.size(), 5);
        let mut members: Vec<_> = s.iter_in().collect();
        members.sort();
        assert_eq!(members, vec![0, 1, 2, 3, 4]);
    }
}

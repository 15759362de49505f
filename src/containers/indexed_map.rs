//! A map over `0..capacity` that iterates only over indices holding a
//! non-default value, in O(1) amortized per `set`.
//!
//! Built on top of [`IndexedSet`] to track which indices currently differ
//! from the default; the values themselves live in a plain `Vec` indexed
//! directly so reads are O(1) regardless of membership.

use super::indexed_set::IndexedSet;

/// Indexed map over `0..capacity` with a designated default value.
#[derive(Debug, Clone)]
pub struct IndexedMap<V> {
    values: Vec<V>,
    non_default: IndexedSet,
    default: V,
}

impl<V: Clone + PartialEq> IndexedMap<V> {
    /// Creates a map over `0..capacity`, every index starting at `default`.
    pub fn new(capacity: usize, default: V) -> Self {
        Self {
            values: vec![default.clone(); capacity],
            non_default: IndexedSet::new(capacity),
            default,
        }
    }

    /// Total number of indices.
    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    /// Current value at `i`.
    pub fn get(&self, i: usize) -> &V {
        &self.values[i]
    }

    /// Sets the value at `i`, updating the non-default tracking set.
    pub fn set(&mut self, i: usize, value: V) {
        let was_default = !self.non_default.contains(i);
        let becomes_default = value == self.default;
        self.values[i] = value;
        match (was_default, becomes_default) {
            (true, false) => self.non_default.add(i),
            (false, true) => self.non_default.remove(i),
            _ => {}
        }
    }

    /// Resets every index back to the default value.
    pub fn clear(&mut self) {
        for i in self.non_default.iter_in().collect::<Vec<_>>() {
            self.values[i] = self.default.clone();
        }
        self.non_default.clear();
    }

    /// Number of indices currently holding a non-default value.
    pub fn size(&self) -> usize {
        self.non_default.size()
    }

    /// Iterates over `(index, value)` pairs for every non-default index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &V)> {
        self.non_default.iter_in().map(move |i| (i, &self.values[i]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_and_get() {
        let mut m: IndexedMap<i32> = IndexedMap::new(5, 0);
        m.set(2, 7);
        assert_eq!(*m.get(2), 7);
        assert_eq!(*m.get(0), 0);
        assert_eq!(m.size(), 1);
    }

    #[test]
    fn setting_back_to_default_untracks() {
        let mut m: IndexedMap<i32> = IndexedMap::new(5, 0);
        m.set(1, 3);
        m.set(1, 0);
        assert_eq!(m.size(), 0);
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut m: IndexedMap<i32> = IndexedMap::new(5, -1);
        m.set(0, 4);
        m.set(3, 9);
        m.clear();
        assert_eq!(m.size(), 0);
        assert_eq!(*m.get(0), -1);
        assert_eq!(*m.get(3), -1);
    }
}

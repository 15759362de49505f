//! Indexed ordered containers underpinning the rest of the crate.
//!
//! [`IndexedSet`] and [`IndexedMap`] give O(1) membership/assignment with
//! stable iteration over the "in"/non-default partition; [`DoublyIndexedMap`]
//! generalizes to more than two classes (used by the unconfined reduction
//! rule's confining-set bookkeeping).

mod doubly_indexed_map;
mod indexed_map;
mod indexed_set;

pub use doubly_indexed_map::DoublyIndexedMap;
pub use indexed_map::IndexedMap;
pub use indexed_set::IndexedSet;

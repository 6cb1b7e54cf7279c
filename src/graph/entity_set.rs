//! Immutable sets of entity handles with set algebra

use super::container::Entity;
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHasher};
use std::hash::{Hash, Hasher};
use std::ops::{BitAnd, BitOr, BitXor, Sub};

type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

/// A set of entities, compared as a set
///
/// The view only references its entities; cloning the view clones handles,
/// never the entities behind them. Iteration follows first-insertion order.
#[derive(Debug, Clone)]
pub struct EntitySetView<E: Entity> {
    entities: FxIndexSet<E>,
}

impl<E: Entity> EntitySetView<E> {
    /// Build a view over any collection of entities; duplicates collapse
    pub fn new<I: IntoIterator<Item = E>>(entities: I) -> Self {
        entities.into_iter().collect()
    }

    pub fn empty() -> Self {
        EntitySetView {
            entities: FxIndexSet::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.entities.contains(entity)
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, E> {
        self.entities.iter()
    }

    pub fn union(&self, other: &Self) -> Self {
        self.iter().chain(other.iter()).cloned().collect()
    }

    pub fn intersection(&self, other: &Self) -> Self {
        self.iter().filter(|e| other.contains(e)).cloned().collect()
    }

    pub fn difference(&self, other: &Self) -> Self {
        self.iter().filter(|e| !other.contains(e)).cloned().collect()
    }

    pub fn symmetric_difference(&self, other: &Self) -> Self {
        self.difference(other).union(&other.difference(self))
    }

    pub fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.iter().all(|e| other.contains(e))
    }

    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().all(|e| !other.contains(e))
    }

    /// XOR of every member's hash; independent of iteration order
    pub(crate) fn xor_hash(&self) -> u64 {
        self.entities.iter().fold(0, |acc, entity| {
            let mut hasher = FxHasher::default();
            entity.hash(&mut hasher);
            acc ^ hasher.finish()
        })
    }
}

impl<E: Entity> Default for EntitySetView<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E: Entity> PartialEq for EntitySetView<E> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl<E: Entity> Eq for EntitySetView<E> {}

impl<E: Entity> Hash for EntitySetView<E> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.xor_hash());
    }
}

impl<E: Entity> FromIterator<E> for EntitySetView<E> {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        EntitySetView {
            entities: iter.into_iter().collect(),
        }
    }
}

impl<E: Entity> IntoIterator for EntitySetView<E> {
    type Item = E;
    type IntoIter = indexmap::set::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntitySetView<E> {
    type Item = &'a E;
    type IntoIter = indexmap::set::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

impl<E: Entity> BitOr for &EntitySetView<E> {
    type Output = EntitySetView<E>;

    fn bitor(self, rhs: Self) -> EntitySetView<E> {
        self.union(rhs)
    }
}

impl<E: Entity> BitAnd for &EntitySetView<E> {
    type Output = EntitySetView<E>;

    fn bitand(self, rhs: Self) -> EntitySetView<E> {
        self.intersection(rhs)
    }
}

impl<E: Entity> Sub for &EntitySetView<E> {
    type Output = EntitySetView<E>;

    fn sub(self, rhs: Self) -> EntitySetView<E> {
        self.difference(rhs)
    }
}

impl<E: Entity> BitXor for &EntitySetView<E> {
    type Output = EntitySetView<E>;

    fn bitxor(self, rhs: Self) -> EntitySetView<E> {
        self.symmetric_difference(rhs)
    }
}

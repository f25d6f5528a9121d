use std::collections::HashMap;
use std::sync::Arc;

use bit_set::BitSet;

use crate::{
    error::{Error, Result},
    model::value::Value,
};

/// The immutable universe a domain draws its values from.
///
/// Shared between a domain and all of its copies; never mutated after
/// construction.
#[derive(Debug)]
struct Universe<V> {
    values: Vec<V>,
    index: HashMap<V, usize>,
}

/// The set of candidate values for a variable, with support for
/// reversible pruning.
///
/// Active membership is tracked by a bitmask over the universe, so
/// `contains`, `remove` and `restore` are O(1). [`checkpoint`]
/// (Domain::checkpoint) pushes a snapshot of the mask that a later
/// [`rollback`](Domain::rollback) restores exactly; this is what makes
/// domains usable inside backtracking search and arc-consistency
/// propagation.
#[derive(Debug)]
pub struct Domain<V: Value> {
    universe: Arc<Universe<V>>,
    active: BitSet,
    size: usize,
    checkpoints: Vec<BitSet>,
}

impl<V: Value> Domain<V> {
    /// Creates a domain over the given values. Duplicates are ignored;
    /// the first occurrence fixes a value's position in the universe.
    pub fn new<I: IntoIterator<Item = V>>(values: I) -> Self {
        let mut universe = Vec::new();
        let mut index = HashMap::new();
        for value in values {
            if !index.contains_key(&value) {
                index.insert(value.clone(), universe.len());
                universe.push(value);
            }
        }
        let mut active = BitSet::with_capacity(universe.len());
        for i in 0..universe.len() {
            active.insert(i);
        }
        let size = universe.len();
        Self {
            universe: Arc::new(Universe {
                values: universe,
                index,
            }),
            active,
            size,
            checkpoints: Vec::new(),
        }
    }

    /// Creates a domain holding a single value.
    pub fn singleton(value: V) -> Self {
        Self::new([value])
    }

    /// Returns the number of active values.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_singleton(&self) -> bool {
        self.size == 1
    }

    /// Returns true if the value is currently active.
    pub fn contains(&self, value: &V) -> bool {
        match self.universe.index.get(value) {
            Some(&i) => self.active.contains(i),
            None => false,
        }
    }

    /// Removes a value. Returns true if it was active.
    pub fn remove(&mut self, value: &V) -> bool {
        match self.universe.index.get(value) {
            Some(&i) if self.active.contains(i) => {
                self.active.remove(i);
                self.size -= 1;
                true
            }
            _ => false,
        }
    }

    /// Restores a previously removed value. Returns true if it was
    /// inactive and part of the universe.
    pub fn restore(&mut self, value: &V) -> bool {
        match self.universe.index.get(value) {
            Some(&i) if !self.active.contains(i) => {
                self.active.insert(i);
                self.size += 1;
                true
            }
            _ => false,
        }
    }

    /// Reduces the domain to exactly one value.
    ///
    /// Fails if the value is not part of the universe; it does not have
    /// to be currently active.
    pub fn reduce_to(&mut self, value: &V) -> Result<()> {
        let &i = self
            .universe
            .index
            .get(value)
            .ok_or(Error::ValueNotInUniverse)?;
        self.active.clear();
        self.active.insert(i);
        self.size = 1;
        Ok(())
    }

    /// The first active value in universe order, if any.
    pub fn first(&self) -> Option<&V> {
        self.active.iter().next().map(|i| &self.universe.values[i])
    }

    /// Iterates the active values in universe order.
    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.active.iter().map(|i| &self.universe.values[i])
    }

    /// The active values as an owned list, in universe order.
    pub fn values(&self) -> Vec<V> {
        self.iter().cloned().collect()
    }

    /// Removes every active value for which the predicate returns
    /// false, returning how many were removed.
    ///
    /// This is the in-place filtering the propagators use while
    /// scanning a domain.
    pub fn retain<F: FnMut(&V) -> bool>(&mut self, mut keep: F) -> usize {
        let mut removed = 0;
        for i in 0..self.universe.values.len() {
            if self.active.contains(i) && !keep(&self.universe.values[i]) {
                self.active.remove(i);
                self.size -= 1;
                removed += 1;
            }
        }
        removed
    }

    /// Saves the current active set for a later [`rollback`](Domain::rollback).
    pub fn checkpoint(&mut self) {
        self.checkpoints.push(self.active.clone());
    }

    /// Restores the most recently saved active set.
    pub fn rollback(&mut self) -> Result<()> {
        let mask = self.checkpoints.pop().ok_or(Error::NoCheckpoint)?;
        self.size = mask.len();
        self.active = mask;
        Ok(())
    }

    /// Discards the most recent checkpoint without restoring it.
    pub fn commit(&mut self) {
        self.checkpoints.pop();
    }

    /// Number of saved checkpoints.
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn clear_checkpoints(&mut self) {
        self.checkpoints.clear();
    }

    /// Creates an independent copy sharing the immutable universe.
    ///
    /// The copy starts with a fresh (empty) checkpoint stack.
    pub fn copy(&self) -> Self {
        Self {
            universe: Arc::clone(&self.universe),
            active: self.active.clone(),
            size: self.size,
            checkpoints: Vec::new(),
        }
    }
}

impl<V: Value + Ord> Domain<V> {
    /// The smallest active value, if any.
    pub fn min_value(&self) -> Option<&V> {
        self.iter().min()
    }

    /// The largest active value, if any.
    pub fn max_value(&self) -> Option<&V> {
        self.iter().max()
    }
}

impl Domain<i64> {
    /// Creates an integer range domain over `min..=max`.
    pub fn range(min: i64, max: i64) -> Self {
        Self::new(min..=max)
    }
}

impl<V: Value> Clone for Domain<V> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

/// Equality is over the current active values, independent of the
/// backing universe.
impl<V: Value> PartialEq for Domain<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.iter().eq(other.iter())
    }
}

impl<V: Value> Eq for Domain<V> {}

impl<V: Value> std::hash::Hash for Domain<V> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for value in self.iter() {
            value.hash(state);
        }
    }
}

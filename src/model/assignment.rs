use bit_set::BitSet;

use crate::model::{value::Value, VariableId};

/// A partial or complete mapping from variables to values.
///
/// Storage is dense and sized to the problem's variable count, so
/// lookups by variable index are O(1). The search owns exactly one
/// working assignment; published solutions are independent clones.
#[derive(Debug, Clone)]
pub struct Assignment<V: Value> {
    values: Vec<Option<V>>,
    assigned: BitSet,
    size: usize,
}

impl<V: Value> Assignment<V> {
    /// Creates an empty assignment for a problem with `num_variables`
    /// variables.
    pub fn new(num_variables: usize) -> Self {
        Self {
            values: vec![None; num_variables],
            assigned: BitSet::with_capacity(num_variables),
            size: 0,
        }
    }

    /// Assigns a value to a variable, replacing any previous value.
    pub fn assign(&mut self, variable: VariableId, value: V) {
        if self.assigned.insert(variable) {
            self.size += 1;
        }
        self.values[variable] = Some(value);
    }

    /// Removes the value assigned to a variable, if any.
    pub fn unassign(&mut self, variable: VariableId) {
        if self.assigned.remove(variable) {
            self.values[variable] = None;
            self.size -= 1;
        }
    }

    pub fn is_assigned(&self, variable: VariableId) -> bool {
        self.assigned.contains(variable)
    }

    /// The value assigned to a variable, or `None` if unassigned.
    pub fn value(&self, variable: VariableId) -> Option<&V> {
        self.values[variable].as_ref()
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// True once every variable has a value.
    pub fn is_complete(&self) -> bool {
        self.size == self.values.len()
    }

    /// Total number of variables, assigned or not.
    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    /// Iterates `(variable, value)` pairs for the assigned variables,
    /// in index order.
    pub fn iter(&self) -> impl Iterator<Item = (VariableId, &V)> + '_ {
        self.assigned
            .iter()
            .map(move |i| (i, self.values[i].as_ref().unwrap()))
    }
}

impl<V: Value> PartialEq for Assignment<V> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.values.len() == other.values.len()
            && self.values == other.values
    }
}

impl<V: Value> Eq for Assignment<V> {}

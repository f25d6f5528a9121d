use std::collections::{HashMap, HashSet};

use crate::{
    constraint::{Arc, Constraint},
    model::{ConstraintId, Value, VariableId},
};

/// Precomputed adjacency over a problem's constraints.
///
/// Built once when the [`Csp`](crate::model::Csp) is finalized and
/// immutable afterwards, so lookups during search are plain slice
/// accesses.
#[derive(Debug)]
pub struct ConstraintNetwork {
    constraints_on: Vec<Vec<ConstraintId>>,
    binary_between: HashMap<(VariableId, VariableId), Vec<ConstraintId>>,
    neighbors: Vec<Vec<VariableId>>,
    arcs: Vec<Vec<Arc>>,
}

impl ConstraintNetwork {
    pub fn build<V: Value>(
        num_variables: usize,
        constraints: &[Box<dyn Constraint<V>>],
    ) -> Self {
        let mut constraints_on: Vec<Vec<ConstraintId>> = vec![Vec::new(); num_variables];
        let mut binary_between: HashMap<(VariableId, VariableId), Vec<ConstraintId>> =
            HashMap::new();
        let mut neighbor_sets: Vec<HashSet<VariableId>> = vec![HashSet::new(); num_variables];
        let mut arcs: Vec<Vec<Arc>> = Vec::with_capacity(constraints.len());

        for (id, constraint) in constraints.iter().enumerate() {
            let scope = constraint.scope();

            for &var in scope {
                constraints_on[var].push(id);
            }

            for (i, &u) in scope.iter().enumerate() {
                for &v in &scope[i + 1..] {
                    neighbor_sets[u].insert(v);
                    neighbor_sets[v].insert(u);
                    if constraint.arity() == 2 {
                        binary_between.entry(pair_key(u, v)).or_default().push(id);
                    }
                }
            }

            arcs.push(
                constraint
                    .arcs()
                    .into_iter()
                    .map(|(x, y)| Arc::new(x, y, id))
                    .collect(),
            );
        }

        // Sorted neighbor lists keep iteration deterministic.
        let neighbors = neighbor_sets
            .into_iter()
            .map(|set| {
                let mut list: Vec<VariableId> = set.into_iter().collect();
                list.sort_unstable();
                list
            })
            .collect();

        Self {
            constraints_on,
            binary_between,
            neighbors,
            arcs,
        }
    }

    /// All constraints involving the given variable.
    pub fn constraints_on(&self, variable: VariableId) -> &[ConstraintId] {
        &self.constraints_on[variable]
    }

    /// All binary constraints linking the unordered pair `(u, v)`.
    pub fn constraints_between(&self, u: VariableId, v: VariableId) -> &[ConstraintId] {
        self.binary_between
            .get(&pair_key(u, v))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Variables sharing at least one constraint with `variable`.
    pub fn neighbors(&self, variable: VariableId) -> &[VariableId] {
        &self.neighbors[variable]
    }

    /// Number of constraints the variable participates in.
    pub fn degree(&self, variable: VariableId) -> usize {
        self.constraints_on[variable].len()
    }

    /// The directed arcs contributed by one constraint.
    pub fn arcs_of(&self, constraint: ConstraintId) -> &[Arc] {
        &self.arcs[constraint]
    }

    /// All arcs of all constraints, in constraint order.
    pub fn all_arcs(&self) -> impl Iterator<Item = Arc> + '_ {
        self.arcs.iter().flatten().copied()
    }
}

fn pair_key(u: VariableId, v: VariableId) -> (VariableId, VariableId) {
    if u <= v {
        (u, v)
    } else {
        (v, u)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        constraint::{all_different::AllDifferent, not_equal::NotEqual},
        model::{Csp, Domain},
    };

    fn triangle() -> crate::model::Csp<i64> {
        let mut builder = Csp::builder("triangle");
        let a = builder.variable("A", Domain::range(0, 2)).unwrap();
        let b = builder.variable("B", Domain::range(0, 2)).unwrap();
        let c = builder.variable("C", Domain::range(0, 2)).unwrap();
        builder.constraint(NotEqual::new(a, b)).unwrap();
        builder.constraint(NotEqual::new(b, c)).unwrap();
        builder
            .constraint(AllDifferent::new(vec![a, b, c]))
            .unwrap();
        builder.build()
    }

    #[test]
    fn per_variable_index() {
        let csp = triangle();
        let network = csp.network();

        assert_eq!(network.constraints_on(0), &[0, 2]);
        assert_eq!(network.constraints_on(1), &[0, 1, 2]);
        assert_eq!(network.degree(1), 3);
    }

    #[test]
    fn binary_index_is_order_independent() {
        let csp = triangle();
        let network = csp.network();

        assert_eq!(network.constraints_between(0, 1), &[0]);
        assert_eq!(network.constraints_between(1, 0), &[0]);
        // The AllDifferent is not binary, so (0, 2) has no entry.
        assert!(network.constraints_between(0, 2).is_empty());
    }

    #[test]
    fn neighbors_are_sorted_and_deduped() {
        let csp = triangle();
        let network = csp.network();

        assert_eq!(network.neighbors(0), &[1, 2]);
        assert_eq!(network.neighbors(1), &[0, 2]);
    }

    #[test]
    fn arcs_cover_both_directions() {
        let csp = triangle();
        let network = csp.network();

        let arcs: Vec<_> = network.arcs_of(0).to_vec();
        assert_eq!(arcs.len(), 2);
        assert_eq!((arcs[0].x, arcs[0].y), (0, 1));
        assert_eq!((arcs[1].x, arcs[1].y), (1, 0));

        // AllDifferent over three variables contributes 6 ordered pairs.
        assert_eq!(network.arcs_of(2).len(), 6);
        assert_eq!(network.all_arcs().count(), 2 + 2 + 6);
    }
}

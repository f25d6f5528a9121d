use crate::{
    constraint::{binary, domain_pair, Constraint},
    model::{Assignment, Domain, Value, VariableId},
};

/// Binary constraint `x != y`.
#[derive(Debug, Clone)]
pub struct NotEqual {
    vars: [VariableId; 2],
}

impl NotEqual {
    pub fn new(x: VariableId, y: VariableId) -> Self {
        Self { vars: [x, y] }
    }
}

impl<V: Value> Constraint<V> for NotEqual {
    fn scope(&self) -> &[VariableId] {
        &self.vars
    }

    fn name(&self) -> String {
        format!("v{} != v{}", self.vars[0], self.vars[1])
    }

    fn is_satisfied(&self, assignment: &Assignment<V>) -> bool {
        binary::is_satisfied(self.vars, assignment, |a, b| a != b)
    }

    fn is_consistent(&self, assignment: &Assignment<V>) -> bool {
        binary::is_consistent(self.vars, assignment, |a, b| a != b)
    }

    fn is_consistent_with(
        &self,
        variable: VariableId,
        value: &V,
        assignment: &Assignment<V>,
    ) -> bool {
        binary::is_consistent_with(self.vars, variable, value, assignment, |a, b| a != b)
    }

    fn propagate(
        &self,
        assigned: VariableId,
        domains: &mut [Domain<V>],
        assignment: &Assignment<V>,
    ) -> bool {
        binary::propagate(self.vars, assigned, domains, assignment, |a, b| a != b)
    }

    fn revise(&self, x: VariableId, y: VariableId, domains: &mut [Domain<V>]) -> bool {
        // Pruning is only possible once the supporting domain is a
        // singleton.
        let (dx, dy) = domain_pair(domains, x, y);
        if !dy.is_singleton() {
            return false;
        }
        let value = dy.first().cloned();
        match value {
            Some(value) => dx.remove(&value),
            None => false,
        }
    }
}

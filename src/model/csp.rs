use std::collections::HashMap;

use crate::{
    constraint::{network::ConstraintNetwork, Constraint},
    error::{Error, Result},
    model::{assignment::Assignment, domain::Domain, value::Value, variable::Variable, ConstraintId, VariableId},
};

/// A constraint satisfaction problem: variables, constraints, and the
/// adjacency indexes derived from them.
///
/// A `Csp` is immutable once built and can be shared read-only between
/// concurrent solves; each solve creates its own working domains and
/// assignment.
#[derive(Debug)]
pub struct Csp<V: Value> {
    name: String,
    variables: Vec<Variable<V>>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    network: ConstraintNetwork,
    by_name: HashMap<String, VariableId>,
}

impl<V: Value> Csp<V> {
    /// Starts building a problem.
    pub fn builder(name: impl Into<String>) -> CspBuilder<V> {
        CspBuilder {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variables(&self) -> &[Variable<V>] {
        &self.variables
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable(&self, id: VariableId) -> &Variable<V> {
        &self.variables[id]
    }

    pub fn variable_by_name(&self, name: &str) -> Option<&Variable<V>> {
        self.by_name.get(name).map(|&id| &self.variables[id])
    }

    pub fn constraints(&self) -> &[Box<dyn Constraint<V>>] {
        &self.constraints
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraint(&self, id: ConstraintId) -> &dyn Constraint<V> {
        self.constraints[id].as_ref()
    }

    pub fn network(&self) -> &ConstraintNetwork {
        &self.network
    }

    /// Fresh working domains, one copy of each variable's initial
    /// domain, indexed by variable.
    pub fn working_domains(&self) -> Vec<Domain<V>> {
        self.variables
            .iter()
            .map(Variable::working_domain)
            .collect()
    }

    /// An empty assignment sized to this problem.
    pub fn empty_assignment(&self) -> Assignment<V> {
        Assignment::new(self.variables.len())
    }

    /// Converts an assignment into a variable-name → value map, the
    /// shape external layers consume.
    pub fn solution_map(&self, assignment: &Assignment<V>) -> HashMap<String, V> {
        assignment
            .iter()
            .map(|(id, value)| (self.variables[id].name().to_string(), value.clone()))
            .collect()
    }

    /// True if the complete assignment satisfies every constraint.
    pub fn is_solution(&self, assignment: &Assignment<V>) -> bool {
        assignment.is_complete() && self.constraints.iter().all(|c| c.is_satisfied(assignment))
    }
}

impl<V: Value> std::fmt::Display for Csp<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} variables, {} constraints",
            self.name,
            self.variables.len(),
            self.constraints.len()
        )
    }
}

/// Builder assigning dense variable indices and validating constraint
/// scopes as they are added.
pub struct CspBuilder<V: Value> {
    name: String,
    variables: Vec<Variable<V>>,
    constraints: Vec<Box<dyn Constraint<V>>>,
    by_name: HashMap<String, VariableId>,
}

impl<V: Value> CspBuilder<V> {
    /// Adds a variable and returns its index.
    pub fn variable(&mut self, name: impl Into<String>, domain: Domain<V>) -> Result<VariableId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(Error::DuplicateVariable(name));
        }
        let id = self.variables.len();
        self.by_name.insert(name.clone(), id);
        self.variables.push(Variable::new(name, domain, id));
        Ok(id)
    }

    /// Adds a constraint. Every variable in its scope must already
    /// exist in this builder.
    pub fn constraint(&mut self, constraint: impl Constraint<V> + 'static) -> Result<ConstraintId> {
        for &var in constraint.scope() {
            if var >= self.variables.len() {
                return Err(Error::VariableOutOfRange {
                    index: var,
                    num_variables: self.variables.len(),
                });
            }
        }
        let id = self.constraints.len();
        self.constraints.push(Box::new(constraint));
        Ok(id)
    }

    /// Looks up a previously added variable by name.
    pub fn var_id(&self, name: &str) -> Result<VariableId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownVariable(name.to_string()))
    }

    /// The variable record for an index added earlier, for constraint
    /// constructors that need initial-domain information.
    pub fn get(&self, id: VariableId) -> &Variable<V> {
        &self.variables[id]
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    /// Finalizes the problem, computing the constraint network.
    pub fn build(self) -> Csp<V> {
        let network = ConstraintNetwork::build(self.variables.len(), &self.constraints);
        Csp {
            name: self.name,
            variables: self.variables,
            constraints: self.constraints,
            network,
            by_name: self.by_name,
        }
    }
}

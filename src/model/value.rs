/// The base trait for any value in a domain.
///
/// The solver only relies on equality and hashing, so anything from
/// integers to color names to problem-specific enums qualifies. The
/// `Send + Sync` bounds let a built [`Csp`](crate::model::Csp) be
/// shared read-only between concurrent solves.
pub trait Value: Clone + std::fmt::Debug + Eq + std::hash::Hash + Send + Sync + 'static {}
impl<T> Value for T where T: Clone + std::fmt::Debug + Eq + std::hash::Hash + Send + Sync + 'static {}

/// A capability trait for values with a total order, required by bounds
/// reasoning (`LessThanOrEqual`, linear constraints).
pub trait OrdValue: Value + Ord {}
impl<T> OrdValue for T where T: Value + Ord {}

//! Vinculum is a finite-domain constraint satisfaction problem (CSP)
//! solver.
//!
//! A problem is a set of named variables, each with a finite domain of
//! candidate values, plus a set of constraints restricting which value
//! combinations are admissible. The solver finds one or more complete
//! assignments satisfying every constraint, or proves that none exists
//! within a time budget.
//!
//! # Core Concepts
//!
//! - **[`Domain`](model::Domain)**: a reversible set of candidate
//!   values backed by a bitmask, with checkpoint/rollback for search.
//! - **[`Csp`](model::Csp)**: the immutable problem container, built
//!   through [`Csp::builder`](model::Csp::builder).
//! - **[`Constraint`](constraint::Constraint)**: the uniform contract
//!   every relation implements, from binary `!=` to global sums.
//! - **[`BacktrackingSolver`](solver::BacktrackingSolver)**: recursive
//!   search parameterized by variable/value heuristics (MRV, Degree,
//!   Dom/WDeg, LCV) and a propagation engine (forward checking or
//!   AC-3), with AC-3 preprocessing on by default.
//! - **[`problems`]**: curated builders for N-Queens, Sudoku, map and
//!   graph coloring, and cryptarithmetic. Large N-Queens instances are
//!   served by a min-conflicts local search instead of backtracking.
//!
//! # Example: map coloring in miniature
//!
//! Color two adjacent regions with two colors:
//!
//! ```
//! use vinculum::constraint::not_equal::NotEqual;
//! use vinculum::model::{Csp, Domain};
//! use vinculum::solver::{BacktrackingSolver, Solver, SolverConfig};
//!
//! # fn main() -> vinculum::error::Result<()> {
//! let mut builder = Csp::builder("two-regions");
//! let left = builder.variable("Left", Domain::new(["Red", "Green"].map(String::from)))?;
//! let right = builder.variable("Right", Domain::new(["Red"].map(String::from)))?;
//! builder.constraint(NotEqual::new(left, right))?;
//! let csp = builder.build();
//!
//! let solver = BacktrackingSolver::with_config(SolverConfig::default());
//! let result = solver.solve(&csp);
//!
//! assert!(result.is_satisfiable());
//! let colors = csp.solution_map(result.solution().unwrap());
//! assert_eq!(colors["Left"], "Green");
//! assert_eq!(colors["Right"], "Red");
//! # Ok(())
//! # }
//! ```

pub mod constraint;
pub mod error;
pub mod model;
pub mod problems;
pub mod propagation;
pub mod solver;

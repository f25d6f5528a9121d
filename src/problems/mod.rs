//! Curated problem builders: each turns a problem description into a
//! ready-to-solve [`Csp`](crate::model::Csp).

pub mod cryptarithmetic;
pub mod graph_coloring;
pub mod map_coloring;
pub mod n_queens;
pub mod sudoku;

pub use cryptarithmetic::Cryptarithmetic;
pub use graph_coloring::GraphColoring;
pub use map_coloring::MapColoring;
pub use n_queens::NQueens;
pub use sudoku::Sudoku;

use crate::{error::Result, model::{Csp, Value}};

/// A named problem family that can be instantiated as a CSP. This is
/// the hook benchmark and service layers drive builders through.
pub trait Problem<V: Value> {
    /// Builds the CSP, validating the problem input.
    fn build(&self) -> Result<Csp<V>>;

    fn name(&self) -> String;

    fn description(&self) -> String;
}

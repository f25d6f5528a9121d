use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{
    constraint::not_equal::NotEqual,
    error::{Error, Result},
    model::{Csp, Domain},
    problems::Problem,
};

/// Graph coloring: one variable per node over colors `0..k-1`, one
/// [`NotEqual`] per edge.
pub struct GraphColoring {
    name: String,
    nodes: Vec<String>,
    edges: Vec<(usize, usize)>,
    num_colors: usize,
}

impl GraphColoring {
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<String>,
        edges: Vec<(usize, usize)>,
        num_colors: usize,
    ) -> Self {
        Self {
            name: name.into(),
            nodes,
            edges,
            num_colors,
        }
    }

    /// The Petersen graph with three colors.
    pub fn petersen() -> Self {
        let nodes = ["O0", "O1", "O2", "O3", "O4", "I0", "I1", "I2", "I3", "I4"]
            .map(String::from)
            .to_vec();
        let edges = vec![
            // Outer pentagon.
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            // Inner pentagram.
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
            // Spokes.
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
        ];
        Self::new("Petersen", nodes, edges, 3)
    }

    /// The complete graph K_n, which needs exactly n colors.
    pub fn complete(n: usize) -> Self {
        let nodes = (0..n).map(|i| format!("N{}", i)).collect();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in i + 1..n {
                edges.push((i, j));
            }
        }
        Self::new(format!("K{}", n), nodes, edges, n)
    }

    /// The cycle C_n: two colors suffice when n is even, three when odd.
    pub fn cycle(n: usize) -> Self {
        let nodes = (0..n).map(|i| format!("N{}", i)).collect();
        let edges = (0..n).map(|i| (i, (i + 1) % n)).collect();
        let colors = if n % 2 == 0 { 2 } else { 3 };
        Self::new(format!("C{}", n), nodes, edges, colors)
    }

    /// A seeded random graph: each pair becomes an edge with
    /// probability `edge_probability`.
    pub fn random(num_nodes: usize, edge_probability: f64, num_colors: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let nodes = (0..num_nodes).map(|i| format!("N{}", i)).collect();
        let mut edges = Vec::new();
        for i in 0..num_nodes {
            for j in i + 1..num_nodes {
                if rng.gen::<f64>() < edge_probability {
                    edges.push((i, j));
                }
            }
        }
        Self::new("RandomGraph", nodes, edges, num_colors)
    }

    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }
}

impl Problem<i64> for GraphColoring {
    fn build(&self) -> Result<Csp<i64>> {
        if self.num_colors == 0 {
            return Err(Error::InvalidInput("at least one color is required".into()));
        }

        let mut builder = Csp::builder(self.name.clone());
        for node in &self.nodes {
            builder.variable(node.clone(), Domain::range(0, self.num_colors as i64 - 1))?;
        }
        for &(u, v) in &self.edges {
            builder.constraint(NotEqual::new(u, v))?;
        }
        Ok(builder.build())
    }

    fn name(&self) -> String {
        format!(
            "{} ({} nodes, {} edges, {} colors)",
            self.name,
            self.nodes.len(),
            self.edges.len(),
            self.num_colors
        )
    }

    fn description(&self) -> String {
        format!(
            "Color {} nodes with {} colors such that no adjacent nodes share a color.",
            self.nodes.len(),
            self.num_colors
        )
    }
}

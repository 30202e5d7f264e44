use super::*;

impl<G: GraphView> GraphMetrics<G> {
    /// Returns Newman's degree assortativity: the correlation coefficient between the degrees
    /// at both ends of each edge.
    ///
    /// If every edge joins two nodes of equal degree (in particular for regular and edgeless
    /// graphs) the coefficient is defined as `1.0`.
    pub fn degree_assortativity(&self) -> f64 {
        *self.assortativity.get_or_init(|| {
            let degrees = self.degrees();

            let mut num_edges = 0.0;
            let mut product_sum = 0.0;
            let mut mean_sum = 0.0;
            let mut square_sum = 0.0;
            let mut all_equal = true;

            for Edge(u, v) in self.graph.edges() {
                let j = degrees[index_of(u)] as f64;
                let k = degrees[index_of(v)] as f64;
                all_equal &= j == k;

                num_edges += 1.0;
                product_sum += j * k;
                mean_sum += 0.5 * (j + k);
                square_sum += 0.5 * (j * j + k * k);
            }

            if all_equal {
                return 1.0;
            }

            let mean = mean_sum / num_edges;
            (product_sum / num_edges - mean * mean) / (square_sum / num_edges - mean * mean)
        })
    }

    /// Returns the Jaccard index of the neighborhoods of both endpoints of every edge slot
    pub fn edge_jaccard_similarities(&self) -> &[f64] {
        self.jaccard.get_or_init(|| {
            let neighbors = self.neighbor_sets();
            self.graph
                .edges()
                .map(|Edge(u, v)| {
                    let (a, b) = (&neighbors[index_of(u)], &neighbors[index_of(v)]);
                    let shared = a.intersection(b).count();
                    shared as f64 / (a.len() + b.len() - shared) as f64
                })
                .collect()
        })
    }

    /// Returns the Jaccard index of the neighborhoods of the endpoints of `slot`
    /// ** Panics if `slot >= m` **
    pub fn edge_jaccard_similarity(&self, slot: EdgeSlot) -> f64 {
        self.edge_jaccard_similarities()[slot]
    }

    /// Returns `2 * t(e) / (deg(u) + deg(v) - 2)` for every edge slot `e = (u, v)`, where
    /// `t(e)` is the number of triangles the slot realizes.
    /// Slots whose endpoints both have degree one yield `NaN`.
    pub fn edge_triangle_densities(&self) -> &[f64] {
        self.triangle_density.get_or_init(|| {
            let degrees = self.degrees();
            let triangles = self.triangle_sets();
            self.graph
                .edges()
                .enumerate()
                .map(|(slot, Edge(u, v))| {
                    let open = degrees[index_of(u)] + degrees[index_of(v)] - 2;
                    (2 * triangles.of_edge(slot).len()) as f64 / open as f64
                })
                .collect()
        })
    }

    /// Returns the triangle density of the edge in `slot`
    /// ** Panics if `slot >= m` **
    pub fn edge_triangle_density(&self, slot: EdgeSlot) -> f64 {
        self.edge_triangle_densities()[slot]
    }
}

use itertools::Either;
use rand::Rng;
use rand_distr::{Distribution, Geometric};

use crate::{gens::*, utils::*};

/// A G(n, p) graph can be defined by either a probability or the average degree which is more
/// common in practice
#[derive(Debug, Copy, Clone, Default)]
enum GnpType {
    /// No value has been set yet
    #[default]
    NotSet,
    /// Direct probability value
    Prob(f64),
    /// Average degree of a node
    AvgDeg(f64),
}

/// `G(n,p)` generators emit every ordered pair `(u, v)` of ids in `0..n` independently with
/// probability `p`, in ascending order.
///
/// Instead of one coin flip per pair, the generator draws the gaps between successive edges from
/// a geometric distribution. Self-loops are included; filtering is up to the caller.
#[derive(Debug, Copy, Clone, Default)]
pub struct Gnp {
    n: NumNodes,
    p: GnpType,
}

impl Gnp {
    /// Creates a new empty `G(n,p)` generator
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates `p` directly
    pub fn prob(mut self, prob: f64) -> Self {
        assert!(prob.is_valid_probability(), "{prob} is not a probability");
        self.p = GnpType::Prob(prob);
        self
    }

    fn probability(&self) -> f64 {
        match self.p {
            GnpType::NotSet => panic!("Probability of Gnp was not set!"),
            GnpType::Prob(p) => p,
            GnpType::AvgDeg(d) => {
                let p = d / self.n as f64;
                assert!(
                    p.is_valid_probability(),
                    "The average degree is invalid for the given n!"
                );
                p
            }
        }
    }
}

impl NumNodesGen for Gnp {
    /// Updates `n`
    fn nodes(mut self, n: NumNodes) -> Self {
        self.n = n;
        self
    }
}

impl AverageDegreeGen for Gnp {
    /// Updates `p` such that `p = d/n`.
    /// The conversion happens when calling `stream/generate`.
    fn avg_deg(mut self, deg: f64) -> Self {
        self.p = GnpType::AvgDeg(deg);
        self
    }
}

impl GraphGenerator for Gnp {
    fn stream<R: Rng>(&self, rng: &mut R) -> impl Iterator<Item = Edge> {
        let p = self.probability();
        let n = self.n as u64;
        let max_value = n * n;
        let to_edge = move |x: u64| Edge((x / n) as NodeId, (x % n) as NodeId);

        if p == 0.0 {
            Either::Left(Either::Left(std::iter::empty()))
        } else if p == 1.0 {
            Either::Left(Either::Right((0..max_value).map(to_edge)))
        } else {
            Either::Right(GeometricSkips::new(p, max_value, rng).map(to_edge))
        }
    }
}

/// Yields the successes of a sequence of independent Bernoulli trials below `stop`
struct GeometricSkips<'a, R> {
    rng: &'a mut R,
    distr: Geometric,
    next: u64,
    stop: u64,
}

impl<'a, R: Rng> GeometricSkips<'a, R> {
    /// ** Panics if `p` is not in `(0, 1)` **
    fn new(p: f64, stop: u64, rng: &'a mut R) -> Self {
        Self {
            rng,
            distr: Geometric::new(p).expect("probability lies in (0, 1)"),
            next: 0,
            stop,
        }
    }
}

impl<R: Rng> Iterator for GeometricSkips<'_, R> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next >= self.stop {
            return None;
        }

        let failures = self.distr.sample(&mut *self.rng);
        let value = self.next.saturating_add(failures);
        if value >= self.stop {
            self.next = self.stop;
            return None;
        }

        self.next = value + 1;
        Some(value)
    }
}

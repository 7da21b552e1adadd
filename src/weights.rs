//! The weight tensor and its two initialization policies.

use crate::error::{Error, Result};
use crate::matrix::Mat;
use crate::topology::Topology;

use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// Where a network's starting weights come from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightSource {
    /// Explicit values in canonical order (see [`Weights::from_values`]).
    Values(Vec<f64>),
    /// Independent uniform draws from `[lower, upper)`.
    Random { lower: f64, upper: f64 },
}

impl WeightSource {
    /// Builds a weight tensor for `topology` according to this policy.
    pub fn build<R: Rng + ?Sized>(&self, topology: &Topology, rng: &mut R) -> Result<Weights> {
        match self {
            WeightSource::Values(values) => Weights::from_values(topology, values),
            WeightSource::Random { lower, upper } => {
                Weights::random(topology, *lower, *upper, rng)
            }
        }
    }
}

/// One `max_nodes x max_nodes` matrix per connectivity layer.
///
/// `get(m, prev, next)` is the weight from node `prev` of layer `m` to node
/// `next` of layer `m + 1`. Every accessor asserts `prev < size(m)` and
/// `next < size(m + 1)`, so the padding is never read or written.
#[derive(Clone, Debug, PartialEq)]
pub struct Weights {
    topology: Topology,
    layers: Vec<Mat>,
}

impl Weights {
    /// Returns an all-zero tensor for `topology`.
    pub fn zeros(topology: &Topology) -> Self {
        let n = topology.max_nodes();
        Weights {
            topology: topology.clone(),
            layers: (0..topology.connectivity_count())
                .map(|_| Mat::zeros(n, n))
                .collect(),
        }
    }

    /// Fills the tensor from `values` in canonical order: connectivity layer
    /// `m` outermost, then `prev`, then `next`.
    ///
    /// Fails with `Error::DataFormat` on a non-finite value and with
    /// `Error::DataShape` if fewer than `topology.weight_count()` values are
    /// given. Surplus values are ignored.
    pub fn from_values(topology: &Topology, values: &[f64]) -> Result<Self> {
        let required = topology.weight_count();
        if values.len() < required {
            return Err(Error::DataShape(format!(
                "topology {:?} needs {} weights, got {}",
                topology.layer_sizes(),
                required,
                values.len()
            )));
        }
        if values.len() > required {
            warn!(
                "ignoring {} weight value(s) beyond the {} required",
                values.len() - required,
                required
            );
        }

        let mut weights = Weights::zeros(topology);
        let mut values = values.iter();
        for m in 0..topology.connectivity_count() {
            for prev in 0..topology.size(m) {
                for (next, &value) in (0..topology.size(m + 1)).zip(&mut values) {
                    if !value.is_finite() {
                        return Err(Error::DataFormat(format!(
                            "weight ({}, {}, {}) is {}, not a finite number",
                            m, prev, next, value
                        )));
                    }
                    weights.set(m, prev, next, value);
                }
            }
        }
        Ok(weights)
    }

    /// Draws every weight independently and uniformly from `[lower, upper)`.
    pub fn random<R: Rng + ?Sized>(
        topology: &Topology,
        lower: f64,
        upper: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if !(lower.is_finite() && upper.is_finite() && lower < upper) {
            return Err(Error::Configuration(format!(
                "random weight bounds must be finite with lower < upper, got [{}, {})",
                lower, upper
            )));
        }
        let between = Uniform::new(lower, upper);
        let mut weights = Weights::zeros(topology);
        for m in 0..topology.connectivity_count() {
            for prev in 0..topology.size(m) {
                for next in 0..topology.size(m + 1) {
                    weights.set(m, prev, next, between.sample(rng));
                }
            }
        }
        Ok(weights)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    fn check(&self, m: usize, prev: usize, next: usize) {
        assert!(
            m < self.layers.len()
                && prev < self.topology.size(m)
                && next < self.topology.size(m + 1),
            "weight ({}, {}, {}) is outside topology {:?}",
            m,
            prev,
            next,
            self.topology.layer_sizes()
        );
    }

    #[inline]
    pub fn get(&self, m: usize, prev: usize, next: usize) -> f64 {
        self.check(m, prev, next);
        self.layers[m][(prev, next)]
    }

    #[inline]
    pub fn set(&mut self, m: usize, prev: usize, next: usize, value: f64) {
        self.check(m, prev, next);
        self.layers[m][(prev, next)] = value;
    }

    #[inline]
    pub fn add(&mut self, m: usize, prev: usize, next: usize, delta: f64) {
        self.check(m, prev, next);
        self.layers[m][(prev, next)] += delta;
    }

    /// The meaningful weights of connectivity layer `m`, `prev` then `next`.
    pub fn layer_values(&self, m: usize) -> Vec<f64> {
        let (prevs, nexts) = (self.topology.size(m), self.topology.size(m + 1));
        let mut values = Vec::with_capacity(prevs * nexts);
        for prev in 0..prevs {
            values.extend_from_slice(&self.layers[m].row(prev)[..nexts]);
        }
        values
    }

    /// All meaningful weights in canonical order; the inverse of
    /// [`Weights::from_values`].
    pub fn values(&self) -> Vec<f64> {
        (0..self.topology.connectivity_count())
            .flat_map(|m| self.layer_values(m))
            .collect()
    }

    /// Raw padded matrix for connectivity layer `m`.
    #[cfg(test)]
    pub(crate) fn padded(&self, m: usize) -> &Mat {
        &self.layers[m]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn topology() -> Topology {
        Topology::new(2, &[3], 1).unwrap()
    }

    #[test]
    fn values_land_in_canonical_order() {
        let t = Topology::new(2, &[2], 1).unwrap();
        let w = Weights::from_values(&t, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        assert_eq!(w.get(0, 0, 0), 1.0);
        assert_eq!(w.get(0, 0, 1), 2.0);
        assert_eq!(w.get(0, 1, 0), 3.0);
        assert_eq!(w.get(0, 1, 1), 4.0);
        assert_eq!(w.get(1, 0, 0), 5.0);
        assert_eq!(w.get(1, 1, 0), 6.0);
        assert_eq!(w.values(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(w.layer_values(1), vec![5.0, 6.0]);
    }

    #[test]
    fn too_few_values() {
        match Weights::from_values(&topology(), &[0.5; 8]) {
            Err(Error::DataShape(_)) => {}
            other => panic!("expected a shape error, got {:?}", other),
        }
    }

    #[test]
    fn surplus_values_are_ignored() {
        let mut values = vec![0.25; 9];
        values.push(42.0);
        let w = Weights::from_values(&topology(), &values).unwrap();
        assert_eq!(w.values(), vec![0.25; 9]);
    }

    #[test]
    fn non_finite_value() {
        let mut values = vec![0.0; 9];
        values[4] = f64::NAN;
        assert!(matches!(
            Weights::from_values(&topology(), &values),
            Err(Error::DataFormat(_))
        ));
        assert!(matches!(
            Weights::from_values(&topology(), &[f64::INFINITY; 9]),
            Err(Error::DataFormat(_))
        ));
    }

    #[test]
    fn random_weights_stay_in_bounds_and_padding_stays_zero() {
        let t = Topology::new(1, &[4], 2).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let w = Weights::random(&t, -1.5, 1.5, &mut rng).unwrap();
        assert!(w.values().iter().all(|&v| (-1.5..1.5).contains(&v)));
        // layer 0 connects 1 -> 4 nodes: rows 1.. are padding
        for prev in 1..4 {
            assert!(w.padded(0).row(prev).iter().all(|&v| v == 0.0));
        }
        // layer 1 connects 4 -> 2 nodes: columns 2.. are padding
        for prev in 0..4 {
            assert!(w.padded(1).row(prev)[2..].iter().all(|&v| v == 0.0));
        }
    }

    #[test]
    fn random_weights_are_reproducible_with_a_seed() {
        let a = Weights::random(&topology(), -1.0, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        let b = Weights::random(&topology(), -1.0, 1.0, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bad_random_bounds() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            Weights::random(&topology(), 1.0, 1.0, &mut rng),
            Err(Error::Configuration(_))
        ));
        assert!(Weights::random(&topology(), 2.0, -2.0, &mut rng).is_err());
        assert!(Weights::random(&topology(), f64::NEG_INFINITY, 0.0, &mut rng).is_err());
    }

    #[test]
    #[should_panic]
    fn reading_padding_panics() {
        let w = Weights::zeros(&Topology::new(1, &[4], 2).unwrap());
        w.get(1, 0, 3);
    }

    #[test]
    fn source_builds_either_policy() {
        let mut rng = StdRng::seed_from_u64(1);
        let loaded = WeightSource::Values(vec![1.0; 9])
            .build(&topology(), &mut rng)
            .unwrap();
        assert_eq!(loaded.values(), vec![1.0; 9]);
        let random = WeightSource::Random { lower: 0.0, upper: 0.5 }
            .build(&topology(), &mut rng)
            .unwrap();
        assert!(random.values().iter().all(|&v| (0.0..0.5).contains(&v)));
    }
}

//! A [Feedforward neural network](https://en.wikipedia.org/wiki/Feedforward_neural_network).
//!
//! # Example
//!
//! Let's run a tiny `2-1-1` network with hand-picked weights:
//!
//! ```
//! # use perceptron::{Network, Topology, Weights};
//! let topology = Topology::new(2, &[1], 1).unwrap();
//! let weights = Weights::from_values(&topology, &[1.0, 1.0, 1.0]).unwrap();
//! let network = Network::new(weights);
//!
//! let output = network.run(&[1.0, 0.0]).unwrap();
//! let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
//! assert!((output[0] - sigmoid(sigmoid(1.0))).abs() < 1e-12);
//! ```

use crate::activator::Activator;
use crate::error::{Error, Result};
use crate::matrix::Mat;
use crate::topology::Topology;
use crate::weights::Weights;

/// A feed-forward network: a topology, its weight tensor and the activation
/// function applied at every non-input node.
#[derive(Clone, Debug, PartialEq)]
pub struct Network {
    pub(crate) weights: Weights,
    pub(crate) activator: Activator,
}

impl Network {
    /// Wraps a weight tensor into a sigmoid network of the same topology.
    pub fn new(weights: Weights) -> Self {
        Network {
            weights,
            activator: Activator::Sigmoid,
        }
    }

    /// Sets the activation function used by every hidden and output node.
    pub fn with_activator(mut self, activator: Activator) -> Self {
        self.activator = activator;
        self
    }

    pub fn topology(&self) -> &Topology {
        self.weights.topology()
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn activator(&self) -> Activator {
        self.activator
    }

    /// Returns an activation table sized for this network.
    pub fn activations(&self) -> Activations {
        Activations::new(self.topology())
    }

    /// Feeds the provided `input` through the network, returning the output
    /// layer.
    pub fn run(&self, input: &[f64]) -> Result<Vec<f64>> {
        let mut activations = self.activations();
        self.feed_forward(input, &mut activations)?;
        Ok(activations.output().to_vec())
    }

    /// Feeds the provided `input` through the network, storing the raw and
    /// activated values of every layer in `activations`.
    ///
    /// For every layer `l > 0` and node `n`:
    /// `raw[l][n] = Σ_w transformed[l-1][w] * weight[l-1][w][n]` and
    /// `transformed[l][n] = f(raw[l][n])`. The input layer is copied as is.
    pub fn feed_forward(&self, input: &[f64], activations: &mut Activations) -> Result<()> {
        let topology = self.topology();
        if input.len() != topology.input_len() {
            return Err(Error::DataShape(format!(
                "expected {} input(s), got {}",
                topology.input_len(),
                input.len()
            )));
        }
        activations.check_sized_for(topology)?;

        activations.clear();
        activations.raw.row_mut(0)[..input.len()].copy_from_slice(input);
        activations.transformed.row_mut(0)[..input.len()].copy_from_slice(input);

        for layer in 1..topology.layer_count() {
            let prev_len = topology.size(layer - 1);
            for node in 0..topology.size(layer) {
                let mut sum = 0.0;
                for (w, &a) in activations.transformed.row(layer - 1)[..prev_len]
                    .iter()
                    .enumerate()
                {
                    sum += a * self.weights.get(layer - 1, w, node);
                }
                activations.raw[(layer, node)] = sum;
                activations.transformed[(layer, node)] = self.activator.f(sum);
            }
        }
        Ok(())
    }
}

/// Per-run node values: the raw weighted sums and their activated values.
///
/// Both tables are `layer_count x max_nodes`; slots past a layer's size are
/// never read. Every forward pass overwrites the whole table.
#[derive(Clone, Debug)]
pub struct Activations {
    layer_sizes: Vec<usize>,
    raw: Mat,
    transformed: Mat,
}

impl Activations {
    pub fn new(topology: &Topology) -> Self {
        let (rows, cols) = (topology.layer_count(), topology.max_nodes());
        Activations {
            layer_sizes: topology.layer_sizes().to_vec(),
            raw: Mat::zeros(rows, cols),
            transformed: Mat::zeros(rows, cols),
        }
    }

    /// Weighted sums of layer `layer`, before the activation function.
    pub fn raw(&self, layer: usize) -> &[f64] {
        &self.raw.row(layer)[..self.layer_sizes[layer]]
    }

    /// Activated values of layer `layer`.
    pub fn transformed(&self, layer: usize) -> &[f64] {
        &self.transformed.row(layer)[..self.layer_sizes[layer]]
    }

    /// The network output: the activated values of the last layer.
    pub fn output(&self) -> &[f64] {
        self.transformed(self.layer_sizes.len() - 1)
    }

    /// Fails with `Error::Configuration` unless this table was built for
    /// `topology`.
    pub(crate) fn check_sized_for(&self, topology: &Topology) -> Result<()> {
        if self.layer_sizes != topology.layer_sizes() {
            return Err(Error::Configuration(format!(
                "activation table sized for {:?}, network is {:?}",
                self.layer_sizes,
                topology.layer_sizes()
            )));
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.raw.clear();
        self.transformed.clear();
    }
}

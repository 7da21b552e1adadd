//! Network shape: the number of nodes in every layer.

use crate::error::{Error, Result};

use std::convert::TryFrom;

/// The ordered layer sizes of a network: input, hidden layers, output.
///
/// A `Topology` is validated on construction and never changes afterwards;
/// every table and weight tensor built from it is sized to `max_nodes()`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    layer_sizes: Vec<usize>,
    max_nodes: usize,
}

impl Topology {
    /// Creates a topology from the input count, the hidden layer sizes in
    /// order, and the output count.
    ///
    /// Fails with `Error::Configuration` if any layer would be empty.
    pub fn new(inputs: usize, hidden: &[usize], outputs: usize) -> Result<Self> {
        let mut sizes = Vec::with_capacity(hidden.len() + 2);
        sizes.push(inputs);
        sizes.extend_from_slice(hidden);
        sizes.push(outputs);
        Topology::from_layer_sizes(&sizes)
    }

    /// Creates a topology from the full sequence of layer sizes.
    pub fn from_layer_sizes(sizes: &[usize]) -> Result<Self> {
        if sizes.len() < 2 {
            return Err(Error::Configuration(format!(
                "a network needs at least an input and an output layer, got {} layer(s)",
                sizes.len()
            )));
        }
        if let Some(layer) = sizes.iter().position(|&size| size == 0) {
            return Err(Error::Configuration(format!(
                "layer {} has no nodes",
                layer
            )));
        }
        Ok(Topology {
            layer_sizes: sizes.to_vec(),
            max_nodes: sizes.iter().copied().max().unwrap_or(0),
        })
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Number of layers, input and output included.
    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    /// Number of weight matrices, one between each pair of adjacent layers.
    pub fn connectivity_count(&self) -> usize {
        self.layer_sizes.len() - 1
    }

    /// Size of the largest layer; the width of every padded table.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Number of nodes in layer `layer`.
    pub fn size(&self, layer: usize) -> usize {
        self.layer_sizes[layer]
    }

    pub fn input_len(&self) -> usize {
        self.layer_sizes[0]
    }

    pub fn output_len(&self) -> usize {
        self.layer_sizes[self.layer_sizes.len() - 1]
    }

    /// Number of meaningful weights: `Σ_m size(m) * size(m + 1)`.
    pub fn weight_count(&self) -> usize {
        self.layer_sizes.windows(2).map(|w| w[0] * w[1]).sum()
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = Error;

    fn try_from(sizes: Vec<usize>) -> Result<Self> {
        Topology::from_layer_sizes(&sizes)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.layer_sizes
    }
}

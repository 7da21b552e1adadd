//! Generalized backpropagation for networks of any depth.
//!
//! For a network whose last layer is `L`, one step works from the output
//! backwards:
//!
//! * `omega[L][k] = target[k] - actual[k]`
//! * `omega[l][j] = Σ_k psi[l+1][k] * weight[l][j][k]` for `l < L`
//! * `psi[l][j] = omega[l][j] * f'(raw[l][j])`
//! * `weight[l][j][k] += lambda * transformed[l][j] * psi[l+1][k]`
//!
//! `omega[l]` must be read from the weights of connectivity layer `l` before
//! that same layer is updated.

use crate::error::{Error, Result};
use crate::feed_forward::{Activations, Network};
use crate::matrix::Mat;
use crate::topology::Topology;

use itertools::izip;

/// Per-case error signals, `omega` and `psi`, for every node.
///
/// Laid out like the activation tables. The values are rebuilt from scratch on
/// every call to [`Network::feed_backward`] and carry nothing between cases.
#[derive(Clone, Debug)]
pub struct ErrorTerms {
    layer_sizes: Vec<usize>,
    omega: Mat,
    psi: Mat,
}

impl ErrorTerms {
    pub fn new(topology: &Topology) -> Self {
        let (rows, cols) = (topology.layer_count(), topology.max_nodes());
        ErrorTerms {
            layer_sizes: topology.layer_sizes().to_vec(),
            omega: Mat::zeros(rows, cols),
            psi: Mat::zeros(rows, cols),
        }
    }

    /// Backpropagated error at each node of `layer`, before the derivative.
    pub fn omega(&self, layer: usize) -> &[f64] {
        &self.omega.row(layer)[..self.layer_sizes[layer]]
    }

    /// `omega` scaled by the activation derivative at each node of `layer`.
    pub fn psi(&self, layer: usize) -> &[f64] {
        &self.psi.row(layer)[..self.layer_sizes[layer]]
    }
}

impl Network {
    /// Feeds the provided `target` back through the network and updates the
    /// weights in place with learning rate `lambda`.
    ///
    /// `activations` must hold the forward pass for the same training case;
    /// its output layer is the actual output compared against `target`.
    pub fn feed_backward(
        &mut self,
        activations: &Activations,
        target: &[f64],
        lambda: f64,
        terms: &mut ErrorTerms,
    ) -> Result<()> {
        let topology = self.weights.topology().clone();
        if target.len() != topology.output_len() {
            return Err(Error::DataShape(format!(
                "expected {} target value(s), got {}",
                topology.output_len(),
                target.len()
            )));
        }
        activations.check_sized_for(&topology)?;
        if terms.layer_sizes != topology.layer_sizes() {
            return Err(Error::Configuration(format!(
                "error terms sized for {:?}, network is {:?}",
                terms.layer_sizes,
                topology.layer_sizes()
            )));
        }

        terms.omega.clear();
        terms.psi.clear();

        let last = topology.layer_count() - 1;
        for (k, (&t, &actual, &raw)) in
            izip!(target, activations.output(), activations.raw(last)).enumerate()
        {
            let omega = t - actual;
            terms.omega[(last, k)] = omega;
            terms.psi[(last, k)] = omega * self.activator.fprime(raw);
        }

        for layer in (0..last).rev() {
            let (len, next_len) = (topology.size(layer), topology.size(layer + 1));

            for j in 0..len {
                let mut omega = 0.0;
                for k in 0..next_len {
                    omega += terms.psi[(layer + 1, k)] * self.weights.get(layer, j, k);
                }
                terms.omega[(layer, j)] = omega;
                terms.psi[(layer, j)] = omega * self.activator.fprime(activations.raw(layer)[j]);
            }

            // omega[layer] is complete, so weight[layer] may change now
            for (j, &a) in activations.transformed(layer).iter().enumerate() {
                for k in 0..next_len {
                    let psi = terms.psi[(layer + 1, k)];
                    self.weights.add(layer, j, k, lambda * a * psi);
                }
            }
        }
        Ok(())
    }
}

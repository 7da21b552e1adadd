//! Utilities for training neural networks.
//!
//! # Example
//!
//! Let's train a simple neural network to compute the XOR function:
//!
//! ```
//! # use perceptron::*;
//! # use rand::SeedableRng;
//! let xor = [([0.0, 0.0], [0.0]),
//!            ([0.0, 1.0], [1.0]),
//!            ([1.0, 0.0], [1.0]),
//!            ([1.0, 1.0], [0.0])];
//!
//! let topology = Topology::new(2, &[3], 1).unwrap();
//! let examples = TrainingSet::from_pairs(&topology, &xor).unwrap();
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let weights = Weights::random(&topology, -1.5, 1.5, &mut rng).unwrap();
//! let mut network = Network::new(weights);
//!
//! let report = Trainer::new()
//!     .learning_rate(0.5)
//!     .max_iterations(20_000)
//!     .stopping_error(0.001)
//!     .logging(Logging::Silent)
//!     .train(&mut network, &examples)
//!     .unwrap();
//!
//! assert!(report.summary.iterations <= 20_000);
//! assert_eq!(report.cases.len(), 4);
//! ```

use crate::backprop::ErrorTerms;
use crate::dataset::{TrainingCase, TrainingSet};
use crate::error::{Error, Result};
use crate::feed_forward::Network;

use itertools::Itertools;
use std::time::{Duration, Instant};

/// A builder for training sessions.
#[derive(Copy, Clone, Debug)]
pub struct Trainer {
    learning_rate: f64,
    max_iterations: usize,
    stopping_error: f64,
    logging: Logging,
}

impl Default for Trainer {
    fn default() -> Self {
        Trainer::new()
    }
}

impl Trainer {
    /// Creates a new Trainer instance.
    ///
    /// The trainer is initialized with some default values. These defaults are:
    ///
    /// * A learning rate of 0.5.
    /// * Stops after 100000 training iterations.
    /// * Stops once the total error drops below 0.001.
    /// * Logs on training completion.
    pub fn new() -> Self {
        Trainer {
            learning_rate: 0.5,
            max_iterations: 100_000,
            stopping_error: 0.001,
            logging: Logging::Completion,
        }
    }

    /// Sets the learning rate (lambda) to use during gradient descent.
    pub fn learning_rate(mut self, rate: f64) -> Self {
        self.learning_rate = rate;
        self
    }

    /// Sets the maximum number of epochs to run.
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Sets the total error below which training stops.
    pub fn stopping_error(mut self, error: f64) -> Self {
        self.stopping_error = error;
        self
    }

    /// Sets the type of logging to be emitted during training.
    pub fn logging(mut self, logging: Logging) -> Self {
        self.logging = logging;
        self
    }

    /// Trains `network` in place on `examples` by per-case gradient descent.
    ///
    /// Every epoch runs forward and backward over each case in order, then
    /// computes the total error. Training stops once the total error drops
    /// below the stopping error or the iteration cap is hit; the network is
    /// then evaluated once more on every case for the report.
    pub fn train(&self, network: &mut Network, examples: &TrainingSet) -> Result<TrainingReport> {
        self.validate(network, examples)?;

        let start_time = Instant::now();
        let mut activations = network.activations();
        let mut terms = ErrorTerms::new(network.topology());
        let mut case_errors = vec![0.0; examples.len()];

        let mut iterations = 0;
        let mut total_error = f64::MAX;
        while total_error >= self.stopping_error && iterations < self.max_iterations {
            for (case, error) in examples.iter().zip(case_errors.iter_mut()) {
                network.feed_forward(&case.input, &mut activations)?;
                *error = case_error(&case.target, activations.output());
                network.feed_backward(&activations, &case.target, self.learning_rate, &mut terms)?;
            }
            total_error = total_error_of(&case_errors);
            iterations += 1;

            self.logging.iteration(iterations, total_error);
        }

        let stop_reason = if iterations == self.max_iterations {
            StopReason::MaxIterationsReached
        } else {
            StopReason::ErrorThresholdReached
        };

        let (cases, total_error) = evaluate(network, examples)?;
        let summary = TrainingSummary {
            iterations,
            stop_reason,
            total_error,
            elapsed: start_time.elapsed(),
        };
        self.logging.completion(&summary);
        Ok(TrainingReport { summary, cases })
    }

    /// Verifies that the hyperparameters and the data fit the network,
    /// returning an error if something is wrong.
    fn validate(&self, network: &Network, examples: &TrainingSet) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(Error::Configuration(format!(
                "learning rate must be finite and positive, got {}",
                self.learning_rate
            )));
        }
        if !(self.stopping_error.is_finite() && self.stopping_error >= 0.0) {
            return Err(Error::Configuration(format!(
                "stopping error must be finite and non-negative, got {}",
                self.stopping_error
            )));
        }
        let topology = network.topology();
        if examples.input_len() != topology.input_len() {
            return Err(Error::DataShape(format!(
                "network takes {} input(s), training set has {}",
                topology.input_len(),
                examples.input_len()
            )));
        }
        if examples.output_len() != topology.output_len() {
            return Err(Error::Configuration(format!(
                "network has {} output(s), training set targets have {}",
                topology.output_len(),
                examples.output_len()
            )));
        }
        Ok(())
    }
}

/// Runs every case forward once, returning the per-case results and the
/// total error. The network is not modified.
pub fn evaluate(network: &Network, examples: &TrainingSet) -> Result<(Vec<CaseResult>, f64)> {
    let mut activations = network.activations();
    let mut results = Vec::with_capacity(examples.len());
    let mut case_errors = Vec::with_capacity(examples.len());
    for TrainingCase { input, target } in examples {
        network.feed_forward(input, &mut activations)?;
        let actual = activations.output().to_vec();
        case_errors.push(case_error(target, &actual));
        results.push(CaseResult {
            input: input.clone(),
            target: target.clone(),
            actual,
        });
    }
    Ok((results, total_error_of(&case_errors)))
}

/// Error of a single case: `0.5 * Σ_k (target[k] - actual[k])²`.
///
/// Callers pass vectors already checked against the topology.
pub(crate) fn case_error(target: &[f64], actual: &[f64]) -> f64 {
    debug_assert_eq!(target.len(), actual.len());
    0.5 * target
        .iter()
        .zip(actual)
        .map(|(t, a)| (t - a) * (t - a))
        .sum::<f64>()
}

/// Total error of an epoch: the root of the sum of squared case errors.
pub fn total_error_of(case_errors: &[f64]) -> f64 {
    case_errors.iter().map(|e| e * e).sum::<f64>().sqrt()
}

/// Why a training session ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopReason {
    /// The total error fell below the stopping error
    ErrorThresholdReached,
    /// The iteration cap was hit, whatever the error
    MaxIterationsReached,
}

/// Aggregate outcome of a training session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub iterations: usize,
    pub stop_reason: StopReason,
    /// Total error of the trained network over the whole set.
    pub total_error: f64,
    pub elapsed: Duration,
}

/// Network output for one training case after training.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
    pub actual: Vec<f64>,
}

#[derive(Clone, Debug)]
pub struct TrainingReport {
    pub summary: TrainingSummary,
    pub cases: Vec<CaseResult>,
}

/// Logging frequency to use during training
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Logging {
    /// No logs will be emitted
    Silent,
    /// A summary will be logged at completion
    Completion,
    /// A summary will be logged after every `n` training iterations
    Iterations(usize),
}

impl Logging {
    /// Performs logging at the current `iteration` of training.
    fn iteration(self, iteration: usize, total_error: f64) {
        match self {
            Logging::Iterations(freq) if freq > 0 && iteration % freq == 0 => {
                info!("iteration {}: total error {}", iteration, total_error);
            }
            Logging::Silent => {}
            _ => debug!("iteration {}: total error {}", iteration, total_error),
        }
    }

    /// Performs logging at the end of training.
    fn completion(self, summary: &TrainingSummary) {
        if let Logging::Silent = self {
            return;
        }
        info!(
            "ran {} iterations in {:.3} seconds ({:?})",
            summary.iterations,
            summary.elapsed.as_secs_f64(),
            summary.stop_reason
        );
        info!("final total error: {}", summary.total_error);
    }
}

impl CaseResult {
    /// One-line rendering used by the command-line report.
    pub fn describe(&self) -> String {
        format!(
            "input [{}] target [{}] actual [{}]",
            self.input.iter().join(", "),
            self.target.iter().join(", "),
            self.actual.iter().map(|v| format!("{:.6}", v)).join(", ")
        )
    }
}

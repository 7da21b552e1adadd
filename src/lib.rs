//! Fully-connected feed-forward networks trained by per-case backpropagation.

#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod activator;
pub mod backprop;
pub mod config;
pub mod dataset;
pub mod error;
pub mod feed_forward;
pub mod files;
pub mod topology;
pub mod trainer;
pub mod weights;

mod matrix;

pub use activator::Activator;
pub use backprop::ErrorTerms;
pub use config::{RunConfig, WeightsConfig};
pub use dataset::{TrainingCase, TrainingSet};
pub use error::{Error, Result};
pub use feed_forward::{Activations, Network};
pub use topology::Topology;
pub use trainer::{
    evaluate, CaseResult, Logging, StopReason, Trainer, TrainingReport, TrainingSummary,
};
pub use weights::{WeightSource, Weights};

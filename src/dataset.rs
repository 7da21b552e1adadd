//! Shape-checked training data.

use crate::error::{Error, Result};
use crate::topology::Topology;

/// One labelled example: network input and expected output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingCase {
    pub input: Vec<f64>,
    pub target: Vec<f64>,
}

impl TrainingCase {
    pub fn new<I, O>(input: I, target: O) -> Self
    where
        I: Into<Vec<f64>>,
        O: Into<Vec<f64>>,
    {
        TrainingCase {
            input: input.into(),
            target: target.into(),
        }
    }
}

/// An ordered, non-empty list of training cases whose vectors all match one
/// topology. The order is kept exactly as given.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingSet {
    input_len: usize,
    output_len: usize,
    cases: Vec<TrainingCase>,
}

impl TrainingSet {
    /// Validates `cases` against `topology`.
    ///
    /// Fails with `Error::DataShape` if the set is empty or an input has the
    /// wrong length, and with `Error::Configuration` if a target's width does
    /// not match the output layer. Nothing is truncated or padded.
    pub fn new(topology: &Topology, cases: Vec<TrainingCase>) -> Result<Self> {
        if cases.is_empty() {
            return Err(Error::DataShape(
                "a training set needs at least one case".to_owned(),
            ));
        }
        for (i, case) in cases.iter().enumerate() {
            if case.input.len() != topology.input_len() {
                return Err(Error::DataShape(format!(
                    "expected {} input(s), but case {} has {}",
                    topology.input_len(),
                    i,
                    case.input.len()
                )));
            }
            if case.target.len() != topology.output_len() {
                return Err(Error::Configuration(format!(
                    "network has {} output(s), but case {} has {} target value(s)",
                    topology.output_len(),
                    i,
                    case.target.len()
                )));
            }
        }
        Ok(TrainingSet {
            input_len: topology.input_len(),
            output_len: topology.output_len(),
            cases,
        })
    }

    /// Builds a set from `(input, target)` pairs, e.g. a truth table.
    pub fn from_pairs<I, O>(topology: &Topology, pairs: &[(I, O)]) -> Result<Self>
    where
        I: AsRef<[f64]>,
        O: AsRef<[f64]>,
    {
        let cases = pairs
            .iter()
            .map(|(input, target)| TrainingCase::new(input.as_ref(), target.as_ref()))
            .collect();
        TrainingSet::new(topology, cases)
    }

    pub fn input_len(&self) -> usize {
        self.input_len
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn cases(&self) -> &[TrainingCase] {
        &self.cases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrainingCase> {
        self.cases.iter()
    }
}

impl<'a> IntoIterator for &'a TrainingSet {
    type Item = &'a TrainingCase;
    type IntoIter = std::slice::Iter<'a, TrainingCase>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

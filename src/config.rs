//! Run configuration for file-driven training sessions.
//!
//! A configuration is either the line-oriented text format, one value per
//! line:
//!
//! ```text
//! 2                  input nodes
//! 2                  hidden layer sizes, space separated (blank for none)
//! 1                  output nodes
//! 0.5                learning rate
//! 100000             max iterations
//! randomize          weights file, or "randomize"
//! files/inputs.txt   inputs file
//! files/targets.txt  targets file
//! -1.5 1.5           random weight bounds
//! 0.001              stopping error (optional)
//! ```
//!
//! or the same fields as JSON, see [`RunConfig::from_json`].

use crate::activator::Activator;
use crate::dataset::TrainingSet;
use crate::error::{Error, Result};
use crate::files;
use crate::topology::Topology;
use crate::trainer::Trainer;
use crate::weights::WeightSource;

use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_STOPPING_ERROR: f64 = 0.001;
pub const DEFAULT_OUTPUTS_FILE: &str = "outputs.txt";
pub const DEFAULT_WEIGHTS_OUT_FILE: &str = "weights_out.txt";

/// How the starting weights are obtained in a configured run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightsConfig {
    /// Read from a weights file.
    File(PathBuf),
    /// Drawn uniformly from `[lower, upper)`.
    Random { lower: f64, upper: f64 },
}

/// Everything needed to run one training session from files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub inputs: usize,
    #[serde(default)]
    pub hidden: Vec<usize>,
    pub outputs: usize,
    pub learning_rate: f64,
    pub max_iterations: usize,
    #[serde(default = "default_stopping_error")]
    pub stopping_error: f64,
    pub weights: WeightsConfig,
    pub inputs_file: PathBuf,
    pub targets_file: PathBuf,
    #[serde(default)]
    pub activator: Activator,
    /// Seed for random weights; fresh entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_outputs_file")]
    pub outputs_file: PathBuf,
    #[serde(default = "default_weights_out_file")]
    pub weights_out_file: PathBuf,
}

fn default_stopping_error() -> f64 {
    DEFAULT_STOPPING_ERROR
}

fn default_outputs_file() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUTS_FILE)
}

fn default_weights_out_file() -> PathBuf {
    PathBuf::from(DEFAULT_WEIGHTS_OUT_FILE)
}

/// Positional lines of the text format.
const FIELDS: [&str; 10] = [
    "input node count",
    "hidden layer sizes",
    "output node count",
    "learning rate",
    "max iterations",
    "weights file",
    "inputs file",
    "targets file",
    "random weight bounds",
    "stopping error",
];

struct Lines<'a> {
    lines: Vec<&'a str>,
}

impl<'a> Lines<'a> {
    fn get(&self, field: usize) -> Result<&'a str> {
        self.lines.get(field).map(|line| line.trim()).ok_or_else(|| {
            Error::Configuration(format!(
                "line {} ({}) is missing",
                field + 1,
                FIELDS[field]
            ))
        })
    }

    fn optional(&self, field: usize) -> Option<&'a str> {
        self.get(field).ok().filter(|line| !line.is_empty())
    }

    fn required(&self, field: usize) -> Result<&'a str> {
        let line = self.get(field)?;
        if line.is_empty() {
            return Err(Error::Configuration(format!(
                "line {} ({}) is empty",
                field + 1,
                FIELDS[field]
            )));
        }
        Ok(line)
    }

    fn number<T: std::str::FromStr>(&self, field: usize) -> Result<T> {
        let line = self.required(field)?;
        parse_token(line, field)
    }
}

fn parse_token<T: std::str::FromStr>(token: &str, field: usize) -> Result<T> {
    token.parse().map_err(|_| {
        Error::DataFormat(format!(
            "line {} ({}): {:?} is not a valid number",
            field + 1,
            FIELDS[field],
            token
        ))
    })
}

impl RunConfig {
    /// Parses the line-oriented text format.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().map_or(false, |line| line.trim().is_empty()) {
            lines.pop();
        }
        let lines = Lines { lines };

        let inputs = lines.number(0)?;
        let hidden = lines
            .get(1)?
            .split_whitespace()
            .map(|token| parse_token(token, 1))
            .collect::<Result<Vec<usize>>>()?;
        let outputs = lines.number(2)?;
        let learning_rate = lines.number(3)?;
        let max_iterations = lines.number(4)?;

        let weights = match lines.required(5)? {
            "randomize" => {
                let bounds = lines
                    .required(8)?
                    .split_whitespace()
                    .map(|token| parse_token(token, 8))
                    .collect::<Result<Vec<f64>>>()?;
                match bounds[..] {
                    [lower, upper] => WeightsConfig::Random { lower, upper },
                    _ => {
                        return Err(Error::Configuration(format!(
                            "line 9 ({}) needs exactly two values, got {}",
                            FIELDS[8],
                            bounds.len()
                        )))
                    }
                }
            }
            path => WeightsConfig::File(PathBuf::from(path)),
        };

        let inputs_file = PathBuf::from(lines.required(6)?);
        let targets_file = PathBuf::from(lines.required(7)?);
        let stopping_error = match lines.optional(9) {
            Some(token) => parse_token(token, 9)?,
            None => DEFAULT_STOPPING_ERROR,
        };

        Ok(RunConfig {
            inputs,
            hidden,
            outputs,
            learning_rate,
            max_iterations,
            stopping_error,
            weights,
            inputs_file,
            targets_file,
            activator: Activator::default(),
            seed: None,
            outputs_file: default_outputs_file(),
            weights_out_file: default_weights_out_file(),
        })
    }

    /// Parses the JSON format. Field names match the struct; `weights` is
    /// either `{"file": "path"}` or `{"random": {"lower": l, "upper": u}}`.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map_err(|e| Error::Configuration(format!("invalid JSON config: {}", e)))
    }

    /// Reads a configuration file; `.json` files use the JSON format, every
    /// other file the text format.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::from_io(e, path.to_path_buf()))?;
        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            RunConfig::from_json(&text)
        } else {
            RunConfig::parse(&text)
        }
    }

    pub fn topology(&self) -> Result<Topology> {
        Topology::new(self.inputs, &self.hidden, self.outputs)
    }

    /// A trainer carrying this configuration's hyperparameters.
    pub fn trainer(&self) -> Trainer {
        Trainer::new()
            .learning_rate(self.learning_rate)
            .max_iterations(self.max_iterations)
            .stopping_error(self.stopping_error)
    }

    /// Resolves the weights setting, reading the weights file if there is one.
    pub fn weight_source(&self) -> Result<WeightSource> {
        match &self.weights {
            WeightsConfig::File(path) => Ok(WeightSource::Values(files::read_numbers(path)?)),
            WeightsConfig::Random { lower, upper } => Ok(WeightSource::Random {
                lower: *lower,
                upper: *upper,
            }),
        }
    }

    /// Reads the inputs and targets files into a set shaped for `topology`.
    pub fn training_set(&self, topology: &Topology) -> Result<TrainingSet> {
        files::read_training_set(&self.inputs_file, &self.targets_file, topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "2\n4\n3\n0.5\n1000000\nrandomize\nfiles/inputs.txt\nfiles/all.txt\n-1.0 1.0\n";

    #[test]
    fn parses_text_format() {
        let config = RunConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.inputs, 2);
        assert_eq!(config.hidden, vec![4]);
        assert_eq!(config.outputs, 3);
        assert_eq!(config.learning_rate, 0.5);
        assert_eq!(config.max_iterations, 1_000_000);
        assert_eq!(
            config.weights,
            WeightsConfig::Random {
                lower: -1.0,
                upper: 1.0
            }
        );
        assert_eq!(config.inputs_file, PathBuf::from("files/inputs.txt"));
        assert_eq!(config.targets_file, PathBuf::from("files/all.txt"));
        assert_eq!(config.stopping_error, DEFAULT_STOPPING_ERROR);
        assert_eq!(config.topology().unwrap().layer_sizes(), &[2, 4, 3]);
    }

    #[test]
    fn multiple_and_no_hidden_layers() {
        let deep = SAMPLE.replacen("\n4\n", "\n5 3 2\n", 1);
        assert_eq!(RunConfig::parse(&deep).unwrap().hidden, vec![5, 3, 2]);

        let shallow = SAMPLE.replacen("\n4\n", "\n\n", 1);
        let config = RunConfig::parse(&shallow).unwrap();
        assert!(config.hidden.is_empty());
        assert_eq!(config.topology().unwrap().layer_count(), 2);
    }

    #[test]
    fn weights_file_and_stopping_error() {
        let text = "2\n2\n1\n0.3\n500\nfiles/weights.txt\nin.txt\nout.txt\n\n0.01\n";
        let config = RunConfig::parse(text).unwrap();
        assert_eq!(
            config.weights,
            WeightsConfig::File(PathBuf::from("files/weights.txt"))
        );
        assert_eq!(config.stopping_error, 0.01);
    }

    #[test]
    fn missing_lines() {
        match RunConfig::parse("2\n2\n1\n0.5\n") {
            Err(Error::Configuration(msg)) => assert!(msg.contains("max iterations")),
            other => panic!("expected a configuration error, got {:?}", other),
        }
        let no_bounds = "2\n2\n1\n0.5\n10\nrandomize\nin.txt\nout.txt\n";
        assert!(matches!(
            RunConfig::parse(no_bounds),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn bad_numbers() {
        let bad_lambda = SAMPLE.replacen("0.5", "fast", 1);
        assert!(matches!(
            RunConfig::parse(&bad_lambda),
            Err(Error::DataFormat(_))
        ));
        let bad_hidden = SAMPLE.replacen("\n4\n", "\n4 x\n", 1);
        assert!(matches!(
            RunConfig::parse(&bad_hidden),
            Err(Error::DataFormat(_))
        ));
        let one_bound = SAMPLE.replacen("-1.0 1.0", "-1.0", 1);
        assert!(matches!(
            RunConfig::parse(&one_bound),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn zero_sized_layer_is_rejected_by_topology() {
        let text = SAMPLE.replacen("\n4\n", "\n0\n", 1);
        let config = RunConfig::parse(&text).unwrap();
        assert!(matches!(config.topology(), Err(Error::Configuration(_))));
    }

    #[test]
    fn parses_json() {
        let json = r#"{
            "inputs": 2,
            "hidden": [2],
            "outputs": 1,
            "learning_rate": 0.5,
            "max_iterations": 100000,
            "weights": {"random": {"lower": -1.5, "upper": 1.5}},
            "inputs_file": "xor/inputs.txt",
            "targets_file": "xor/targets.txt",
            "seed": 42
        }"#;
        let config = RunConfig::from_json(json).unwrap();
        assert_eq!(config.stopping_error, DEFAULT_STOPPING_ERROR);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.activator, Activator::Sigmoid);
        assert_eq!(config.outputs_file, PathBuf::from(DEFAULT_OUTPUTS_FILE));
        assert_eq!(
            config.weight_source().unwrap(),
            WeightSource::Random {
                lower: -1.5,
                upper: 1.5
            }
        );
    }

    #[test]
    fn invalid_json() {
        assert!(matches!(
            RunConfig::from_json("{\"inputs\": 2}"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn missing_weights_file() {
        let text = "2\n2\n1\n0.5\n10\n/nonexistent/weights.txt\nin.txt\nout.txt\n";
        let config = RunConfig::parse(text).unwrap();
        assert!(matches!(
            config.weight_source(),
            Err(Error::ResourceNotFound(_))
        ));
    }
}

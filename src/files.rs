//! Plain-text data files: whitespace-separated numbers, one vector per line.
//!
//! These readers and writers sit outside the numeric core. They turn files
//! into the in-memory values the core works on and back.

use crate::dataset::{TrainingCase, TrainingSet};
use crate::error::{Error, Result};
use crate::topology::Topology;
use crate::trainer::CaseResult;
use crate::weights::Weights;

use itertools::Itertools;
use std::fs;
use std::path::Path;

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::from_io(e, path.to_path_buf()))
}

fn write(path: &Path, contents: String) -> Result<()> {
    fs::write(path, contents).map_err(|e| Error::from_io(e, path.to_path_buf()))
}

fn parse_number(token: &str, path: &Path, line: usize) -> Result<f64> {
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(Error::DataFormat(format!(
            "{}:{}: {:?} is not a number",
            path.display(),
            line,
            token
        ))),
    }
}

/// Reads every whitespace-separated number in `path`, ignoring line breaks.
///
/// This is the weights file layout: any line structure is accepted as long as
/// the values come in canonical order.
pub fn read_numbers<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let text = read(path)?;
    let mut numbers = Vec::new();
    for (i, line) in text.lines().enumerate() {
        for token in line.split_whitespace() {
            numbers.push(parse_number(token, path, i + 1)?);
        }
    }
    Ok(numbers)
}

/// Reads one vector of exactly `width` numbers per non-blank line.
pub fn read_vectors<P: AsRef<Path>>(path: P, width: usize) -> Result<Vec<Vec<f64>>> {
    let path = path.as_ref();
    let text = read(path)?;
    let mut vectors = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let vector = line
            .split_whitespace()
            .map(|token| parse_number(token, path, i + 1))
            .collect::<Result<Vec<f64>>>()?;
        if vector.len() != width {
            return Err(Error::DataShape(format!(
                "{}:{}: expected {} value(s), got {}",
                path.display(),
                i + 1,
                width,
                vector.len()
            )));
        }
        vectors.push(vector);
    }
    Ok(vectors)
}

/// Pairs the inputs file with the targets file, line by line.
pub fn read_training_set<P, Q>(inputs: P, targets: Q, topology: &Topology) -> Result<TrainingSet>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let input_vectors = read_vectors(&inputs, topology.input_len())?;
    let target_vectors = read_vectors(&targets, topology.output_len())?;
    if input_vectors.len() != target_vectors.len() {
        return Err(Error::DataShape(format!(
            "{} has {} case(s) but {} has {}",
            inputs.as_ref().display(),
            input_vectors.len(),
            targets.as_ref().display(),
            target_vectors.len()
        )));
    }
    let cases = input_vectors
        .into_iter()
        .zip(target_vectors)
        .map(|(input, target)| TrainingCase { input, target })
        .collect();
    TrainingSet::new(topology, cases)
}

/// Writes the meaningful weights, one line per connectivity layer.
pub fn write_weights<P: AsRef<Path>>(path: P, weights: &Weights) -> Result<()> {
    let contents = (0..weights.topology().connectivity_count())
        .map(|m| weights.layer_values(m).iter().join(" "))
        .join("\n");
    write(path.as_ref(), contents + "\n")
}

/// Writes the actual outputs of every case, one line per case.
pub fn write_outputs<P: AsRef<Path>>(path: P, results: &[CaseResult]) -> Result<()> {
    let contents = results
        .iter()
        .map(|result| result.actual.iter().join(" "))
        .join("\n");
    write(path.as_ref(), contents + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn topology() -> Topology {
        Topology::new(2, &[2], 1).unwrap()
    }

    #[test]
    fn reads_weights_across_lines() {
        let dir = tempdir().unwrap();
        let file = write_file(&dir, "weights.txt", "0.1 0.2 0.3 0.4\n0.5 0.6\n");
        let values = read_numbers(&file).unwrap();
        assert_eq!(values, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let weights = Weights::from_values(&topology(), &values).unwrap();
        assert_eq!(weights.get(1, 1, 0), 0.6);
    }

    #[test]
    fn non_numeric_weight() {
        let dir = tempdir().unwrap();
        let file = write_file(&dir, "bad-weights.txt", "0.1 0.2\n0.3 x 0.5 0.6\n");
        match read_numbers(&file) {
            Err(Error::DataFormat(msg)) => assert!(msg.contains(":2:")),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does-not-exist.txt");
        assert_eq!(read_numbers(&path), Err(Error::ResourceNotFound(path)));
    }

    #[test]
    fn weights_survive_a_write_and_read() {
        let dir = tempdir().unwrap();
        let topology = Topology::new(3, &[4, 2], 2).unwrap();
        let weights = Weights::random(&topology, -1.0, 1.0, &mut StdRng::seed_from_u64(9)).unwrap();
        let file = write_file(&dir, "round-trip.txt", "");
        write_weights(&file, &weights).unwrap();

        let text = fs::read_to_string(&file).unwrap();
        assert_eq!(text.lines().count(), 3);
        let back = Weights::from_values(&topology, &read_numbers(&file).unwrap()).unwrap();
        assert_eq!(back, weights);
    }

    #[test]
    fn reads_training_set() {
        let dir = tempdir().unwrap();
        let inputs = write_file(&dir, "inputs.txt", "0 0\n0 1\n\n1 0\n1 1\n");
        let targets = write_file(&dir, "targets.txt", "0\n1\n1\n0\n");
        let set = read_training_set(&inputs, &targets, &topology()).unwrap();
        assert_eq!(set.len(), 4);
        assert_eq!(set.cases()[2].input, vec![1.0, 0.0]);
        assert_eq!(set.cases()[3].target, vec![0.0]);
    }

    #[test]
    fn wrong_width_line() {
        let dir = tempdir().unwrap();
        let inputs = write_file(&dir, "wide-inputs.txt", "0 0\n0 1 1\n");
        match read_vectors(&inputs, 2) {
            Err(Error::DataShape(msg)) => assert!(msg.contains(":2:")),
            other => panic!("expected a shape error, got {:?}", other),
        }
    }

    #[test]
    fn case_counts_must_match() {
        let dir = tempdir().unwrap();
        let inputs = write_file(&dir, "short-inputs.txt", "0 0\n0 1\n");
        let targets = write_file(&dir, "long-targets.txt", "0\n1\n1\n");
        assert!(matches!(
            read_training_set(&inputs, &targets, &topology()),
            Err(Error::DataShape(_))
        ));
    }

    #[test]
    fn writes_outputs_one_line_per_case() {
        let dir = tempdir().unwrap();
        let file = write_file(&dir, "outputs.txt", "");
        let results = vec![
            CaseResult {
                input: vec![0.0, 0.0],
                target: vec![0.0],
                actual: vec![0.25],
            },
            CaseResult {
                input: vec![1.0, 1.0],
                target: vec![1.0],
                actual: vec![0.75],
            },
        ];
        write_outputs(&file, &results).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "0.25\n0.75\n");
    }
}

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use perceptron::{files, Network, RunConfig, StopReason};
use rand::rngs::StdRng;
use rand::SeedableRng;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train a feed-forward network from a config file")]
struct Args {
    /// Run configuration, line format or `.json`; prompted for when omitted
    config: Option<PathBuf>,
}

/// Asks for the config path on stdin.
fn prompt_config_path() -> Result<PathBuf> {
    print!("Config file: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let line = line.trim();
    if line.is_empty() {
        anyhow::bail!("no config file given");
    }
    Ok(PathBuf::from(line))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let path = match args.config {
        Some(path) => path,
        None => prompt_config_path()?,
    };
    let config = RunConfig::load(&path)
        .with_context(|| format!("failed to load config {}", path.display()))?;
    let topology = config.topology()?;
    info!("topology {:?}", topology.layer_sizes());

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let weights = config
        .weight_source()
        .context("failed to read starting weights")?
        .build(&topology, &mut rng)?;
    let examples = config
        .training_set(&topology)
        .context("failed to read training data")?;
    info!("loaded {} training case(s)", examples.len());

    let mut network = Network::new(weights).with_activator(config.activator);
    let report = config.trainer().train(&mut network, &examples)?;

    for case in &report.cases {
        println!("{}", case.describe());
    }
    let summary = &report.summary;
    match summary.stop_reason {
        StopReason::ErrorThresholdReached => println!("Stopped: error threshold reached"),
        StopReason::MaxIterationsReached => println!("Stopped: max iterations reached"),
    }
    println!("Iterations: {}", summary.iterations);
    println!("Total error: {}", summary.total_error);
    println!("Elapsed: {:.3}s", summary.elapsed.as_secs_f64());

    files::write_weights(&config.weights_out_file, network.weights())
        .context("failed to write trained weights")?;
    files::write_outputs(&config.outputs_file, &report.cases)
        .context("failed to write outputs")?;
    info!(
        "wrote {} and {}",
        config.weights_out_file.display(),
        config.outputs_file.display()
    );
    Ok(())
}

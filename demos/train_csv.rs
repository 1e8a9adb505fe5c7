//! Train a classifier on a numeric CSV file and report its accuracy.
//!
//! Usage:
//!   cargo run --example train_csv -- data/ionosphere.csv --target last --sizes 34,10,2
//!
//! Set `RUST_LOG=debug` to see per-epoch errors.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use mlp_classifier::{
    Activation, Classifier, ClassifierConfig, StandardScaler, TargetColumn, TrainConfig,
    partition, read_csv,
};

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Target {
    First,
    Last,
}

impl From<Target> for TargetColumn {
    fn from(t: Target) -> Self {
        match t {
            Target::First => TargetColumn::First,
            Target::Last => TargetColumn::Last,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "train_csv")]
#[command(about = "Train an MLP classifier on a CSV file")]
struct Args {
    /// Input CSV (no header)
    path: PathBuf,

    /// Column holding the label
    #[arg(long, value_enum, default_value = "last")]
    target: Target,

    /// Layer widths, input first
    #[arg(long, value_delimiter = ',', required = true)]
    sizes: Vec<usize>,

    #[arg(long, default_value = "10")]
    epochs: usize,

    #[arg(long, default_value = "0.001")]
    learning_rate: f64,

    /// sigmoid, tanh or identity
    #[arg(long, default_value = "sigmoid")]
    activation: Activation,

    #[arg(long, default_value = "0")]
    seed: u64,

    /// Standardize feature columns before training
    #[arg(long)]
    standardize: bool,

    /// Write weights_matrix<i>.csv / bias_matrix<i>.csv here after training
    #[arg(long)]
    checkpoint_dir: Option<PathBuf>,
}

/// Maps the `g`/`b` tokens found in some public datasets to `1`/`0`.
fn good_bad(cell: &str) -> String {
    match cell {
        "g" => "1".to_owned(),
        "b" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn main() -> mlp_classifier::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let rows = read_csv(&args.path, good_bad)?;
    let (mut inputs, targets) = partition(&rows, args.target.into())?;
    info!("read {} rows from {}", rows.len(), args.path.display());

    if args.standardize {
        inputs = StandardScaler::fit(&inputs)?.transform(&inputs)?;
    }

    let config = ClassifierConfig {
        learning_rate: args.learning_rate,
        activation: args.activation,
    };
    let mut net = Classifier::new_with_seed(&args.sizes, config, args.seed)?;
    let mut rng = StdRng::seed_from_u64(args.seed);
    let report = net.train(
        &inputs,
        &targets,
        &TrainConfig {
            epochs: args.epochs,
            checkpoint_dir: args.checkpoint_dir,
        },
        &mut rng,
        None,
    )?;

    let tally = net.confusion(&inputs, &targets)?;
    println!("classes={:?}", net.classes());
    println!("correct={:?} incorrect={:?}", tally.correct, tally.incorrect);
    println!(
        "steps={} final_error={:.6} accuracy={:.4}",
        report.steps,
        report.final_error,
        tally.accuracy()
    );

    if net.output_nodes() == 1 {
        let rates = net.binary_score(&inputs, &targets)?;
        println!(
            "sensitivity={:.4} specificity={:.4} efficiency={:.4}",
            rates.sensitivity, rates.specificity, rates.efficiency
        );
    }

    Ok(())
}

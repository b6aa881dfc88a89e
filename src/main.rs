//! Trains the softmax classifier on MNIST and prints the test accuracy.
//!
//! Usage:
//!   ferrite-logreg [DATA_DIR] [TRAIN_SAMPLES] [TEST_SAMPLES] [--save MODEL.json]
//!
//! DATA_DIR defaults to `mnist_data` and must contain the four standard IDX
//! files, plain or gzipped. Set `RUST_LOG=debug` for per-epoch costs.
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use log::info;

use ferrite_logreg::data::{MnistSplit, SplitKind};
use ferrite_logreg::{LogisticRegression, RegressionOptions, N_CLASSES};

const TRAIN_SAMPLES: usize = 60_000;
const TEST_SAMPLES: usize = 10_000;

struct Args {
    data_dir: PathBuf,
    train_samples: usize,
    test_samples: usize,
    save_path: Option<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut save_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--save" {
            let path = args.next().context("--save needs a file path")?;
            save_path = Some(PathBuf::from(path));
        } else {
            positional.push(arg);
        }
    }
    if positional.len() > 3 {
        bail!("expected at most 3 positional arguments, got {}", positional.len());
    }

    let count = |i: usize, default: usize| -> Result<usize> {
        match positional.get(i) {
            Some(s) => s.parse().with_context(|| format!("invalid sample count '{}'", s)),
            None => Ok(default),
        }
    };

    Ok(Args {
        data_dir: PathBuf::from(positional.first().map_or("mnist_data", String::as_str)),
        train_samples: count(1, TRAIN_SAMPLES)?,
        test_samples: count(2, TEST_SAMPLES)?,
        save_path,
    })
}

fn main() -> Result<()> {
    pretty_env_logger::init();
    let args = parse_args()?;

    let train = MnistSplit::load(&args.data_dir, SplitKind::Train, Some(args.train_samples))
        .context("loading training split")?;
    let train_labels = train.one_hot_labels(N_CLASSES)?;

    let options = RegressionOptions::default()
        .learning_rate(1.0)
        .iterations(80)
        .batch_size(500);
    let mut regression = LogisticRegression::new(&train.features, &train_labels, options)
        .context("building the model")?;
    // the training split is now held in processed form by the model
    drop(train);

    regression.train();

    let test = MnistSplit::load(&args.data_dir, SplitKind::Test, Some(args.test_samples))
        .context("loading test split")?;
    let test_labels = test.one_hot_labels(N_CLASSES)?;
    let accuracy = regression.test(&test.features, &test_labels)?;

    if let Some(path) = &args.save_path {
        regression.snapshot()?.save_json(path)
            .with_context(|| format!("saving model to {}", path.display()))?;
        info!("model saved to {}", path.display());
    }

    println!("{}", accuracy);
    Ok(())
}

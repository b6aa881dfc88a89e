use ferrite_logreg::{
    one_hot, FeatureProcessor, LogisticRegression, RegressionError, RegressionOptions,
    TrainedModel,
};
use rand::prelude::*;

fn blobs(n_per_class: usize, seed: u64) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::new();
    for class in 0..2u8 {
        let centre = if class == 0 { -2.0 } else { 2.0 };
        for _ in 0..n_per_class {
            let x = vec![centre + rng.gen_range(-1.0..1.0), centre + rng.gen_range(-1.0..1.0)];
            rows.push((x, class));
        }
    }
    rows.shuffle(&mut rng);
    let labels: Vec<u8> = rows.iter().map(|(_, c)| *c).collect();
    let features = rows.into_iter().map(|(x, _)| x).collect();
    (features, one_hot(&labels, 2).unwrap())
}

#[test]
fn separable_blobs_converge_full_batch() {
    let (features, labels) = blobs(50, 11);
    let options = RegressionOptions::default()
        .batch_size(features.len())
        .iterations(100)
        .learning_rate(0.5);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();

    let (test_features, test_labels) = blobs(50, 12);
    let accuracy = model.test(&test_features, &test_labels).unwrap();
    assert!(accuracy >= 0.95, "accuracy {}", accuracy);
    assert!(model.cost_history().last().unwrap() < model.cost_history().first().unwrap());
}

#[test]
fn unit_square_or_reaches_full_accuracy() {
    let features = vec![vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![1.0, 1.0]];
    let labels = one_hot(&[0, 1, 1, 1], 2).unwrap();
    let options = RegressionOptions::default()
        .batch_size(4)
        .iterations(50)
        .learning_rate(0.5);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();

    assert_eq!(model.predict(&features).unwrap(), vec![0, 1, 1, 1]);
    assert_eq!(model.test(&features, &labels).unwrap(), 1.0);
}

#[test]
fn costs_stay_finite_and_non_negative() {
    let (features, labels) = blobs(20, 3);
    let options = RegressionOptions::default().batch_size(5).iterations(60).learning_rate(10.0);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();
    for cost in model.cost_history() {
        assert!(cost.is_finite() && *cost >= 0.0, "cost {}", cost);
    }
}

#[test]
fn diverging_run_is_not_reported_as_converged() {
    let (features, labels) = blobs(10, 4);
    let options = RegressionOptions::default().batch_size(1).iterations(6).learning_rate(1e307);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();

    let history = model.cost_history();
    assert!(history.iter().any(|c| !c.is_finite()), "history {:?}", history);
    assert!(!history.contains(&0.0), "history {:?}", history);

    let stats = model.epoch_stats();
    for k in 2..stats.len() {
        if !stats[k - 1].cost.is_finite() {
            assert_eq!(stats[k].learning_rate, stats[k - 1].learning_rate / 2.0);
        }
    }
}

#[test]
fn remainder_samples_are_dropped() {
    let features: Vec<Vec<f64>> = (0..7).map(|i| vec![i as f64, (i * i) as f64]).collect();
    let labels = one_hot(&[0, 1, 0, 1, 0, 1, 0], 2).unwrap();
    let mut flipped = labels.clone();
    flipped[6] = vec![0.0, 1.0];

    let options = RegressionOptions::default().batch_size(3).iterations(1);
    let mut a = LogisticRegression::new(&features, &labels, options.clone()).unwrap();
    let mut b = LogisticRegression::new(&features, &flipped, options).unwrap();
    a.train();
    b.train();

    assert_eq!(a.epoch_stats()[0].samples_used, 6);
    // the 7th label never reached a gradient update
    assert_eq!(a.weights(), b.weights());
}

#[test]
fn predict_on_empty_observations() {
    let (features, labels) = blobs(5, 1);
    let options = RegressionOptions::default().batch_size(10).iterations(2);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();
    assert_eq!(model.predict(&[]).unwrap(), Vec::<usize>::new());
}

#[test]
fn processor_output_shape_and_reuse() {
    let raw = vec![vec![4.0, 1.0, 0.5], vec![4.0, 3.0, 0.25], vec![4.0, 8.0, 0.0]];
    let mut processor = FeatureProcessor::new();
    let first = processor.process(&raw).unwrap();
    let second = processor.process(&raw).unwrap();

    assert_eq!(first.cols, raw[0].len() + 1);
    assert!(first.data.iter().all(|row| row[0] == 1.0));
    assert!(first.data.iter().all(|row| row[1] == 0.0));
    assert_eq!(first, second);
}

#[test]
fn invalid_configuration_fails_fast() {
    let (features, labels) = blobs(5, 2);
    let cases = [
        RegressionOptions::default().batch_size(11),
        RegressionOptions::default().iterations(0),
        RegressionOptions::default().learning_rate(0.0),
    ];
    for options in cases {
        assert!(matches!(
            LogisticRegression::new(&features, &labels, options),
            Err(RegressionError::InvalidConfiguration { .. })
        ));
    }
}

#[test]
fn saved_model_predicts_identically() {
    let (features, labels) = blobs(30, 5);
    let options = RegressionOptions::default().batch_size(10).iterations(20);
    let mut model = LogisticRegression::new(&features, &labels, options).unwrap();
    model.train();

    let path = std::env::temp_dir().join(format!("ferrite-logreg-it-{}.json", std::process::id()));
    model.snapshot().unwrap().save_json(&path).unwrap();
    let loaded = TrainedModel::load_json(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let (unseen, unseen_labels) = blobs(10, 6);
    assert_eq!(loaded.predict(&unseen).unwrap(), model.predict(&unseen).unwrap());
    assert_eq!(loaded.test(&unseen, &unseen_labels).unwrap(), model.test(&unseen, &unseen_labels).unwrap());
}

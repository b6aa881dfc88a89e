use ferrite_logreg::{one_hot, LogisticRegression, RegressionOptions};
use rand::prelude::*;

/// Two Gaussian-ish blobs in the plane, one per class, with a clear margin.
fn blobs(n_per_class: usize, rng: &mut StdRng) -> (Vec<Vec<f64>>, Vec<u8>) {
    let mut features = Vec::with_capacity(2 * n_per_class);
    let mut labels = Vec::with_capacity(2 * n_per_class);
    for class in 0..2u8 {
        let centre = if class == 0 { -2.0 } else { 2.0 };
        for _ in 0..n_per_class {
            features.push(vec![
                centre + rng.gen_range(-1.0..1.0),
                centre + rng.gen_range(-1.0..1.0),
            ]);
            labels.push(class);
        }
    }
    (features, labels)
}

fn main() {
    let mut rng = StdRng::seed_from_u64(7);
    let (mut features, labels) = blobs(100, &mut rng);

    // shuffle so every batch sees both classes
    let mut order: Vec<usize> = (0..features.len()).collect();
    order.shuffle(&mut rng);
    features = order.iter().map(|&i| features[i].clone()).collect();
    let labels: Vec<u8> = order.iter().map(|&i| labels[i]).collect();
    let encoded = one_hot(&labels, 2).expect("labels are 0 or 1");

    let options = RegressionOptions::default()
        .learning_rate(0.5)
        .iterations(100)
        .batch_size(20);
    let mut model = LogisticRegression::new(&features, &encoded, options)
        .expect("valid training set");
    model.train();

    for stats in model.epoch_stats().iter().step_by(10) {
        println!("Epoch {}: cost = {:.6}, lr = {:.4}", stats.epoch, stats.cost, stats.learning_rate);
    }

    let accuracy = model.test(&features, &encoded).expect("test set matches");
    println!("Training accuracy: {:.3}", accuracy);

    let samples = vec![vec![-2.0, -2.0], vec![2.0, 2.0]];
    println!("Predictions for {:?}: {:?}", samples, model.predict(&samples).expect("two features"));
}

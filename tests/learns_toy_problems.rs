use mlp_classifier::{Activation, Classifier, ClassifierConfig, RangeTracker, TrainConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn two_points(copies: usize) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for _ in 0..copies {
        xs.push(vec![0.0, 0.0]);
        ys.push(vec![0.0]);
        xs.push(vec![1.0, 1.0]);
        ys.push(vec![1.0]);
    }
    (xs, ys)
}

fn config(learning_rate: f64) -> ClassifierConfig {
    ClassifierConfig {
        learning_rate,
        activation: Activation::Sigmoid,
    }
}

#[test]
fn one_hot_network_separates_two_points() {
    let (xs, ys) = two_points(10);
    let mut net = Classifier::new_with_seed(&[2, 4, 2], config(0.5), 0).unwrap();
    let mut rng = StdRng::seed_from_u64(0);

    let report = net
        .train(
            &xs,
            &ys,
            &TrainConfig {
                epochs: 200,
                ..TrainConfig::default()
            },
            &mut rng,
            None,
        )
        .unwrap();

    assert_eq!(report.steps, 200 * xs.len());
    assert_eq!(net.classes(), &[0.0, 1.0]);
    assert_eq!(net.predict(&[0.0, 0.0]).unwrap(), 0.0);
    assert_eq!(net.predict(&[1.0, 1.0]).unwrap(), 1.0);
    assert_eq!(net.score(&xs, &ys).unwrap(), 1.0);
}

#[test]
fn single_output_network_separates_two_points() {
    let (xs, ys) = two_points(10);
    let mut net = Classifier::new_with_seed(&[2, 1], config(0.5), 3).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    net.train(
        &xs,
        &ys,
        &TrainConfig {
            epochs: 300,
            ..TrainConfig::default()
        },
        &mut rng,
        None,
    )
    .unwrap();

    assert!(net.score(&xs, &ys).unwrap() > 0.9);
    let rates = net.binary_score(&xs, &ys).unwrap();
    assert!(rates.efficiency > 0.9);
}

#[test]
fn training_error_shrinks() {
    let (xs, ys) = two_points(10);
    let mut net = Classifier::new_with_seed(&[2, 3, 2], config(0.5), 7).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let one_epoch = TrainConfig {
        epochs: 1,
        ..TrainConfig::default()
    };

    let first = net.train(&xs, &ys, &one_epoch, &mut rng, None).unwrap();
    let long = TrainConfig {
        epochs: 200,
        ..TrainConfig::default()
    };
    let last = net.train(&xs, &ys, &long, &mut rng, None).unwrap();
    assert!(last.final_error < first.final_error);
}

#[test]
fn tracker_spans_whole_training_run() {
    let (xs, ys) = two_points(5);
    let mut net = Classifier::new_with_seed(&[2, 2, 2], config(0.1), 1).unwrap();
    let mut tracker = RangeTracker::new();

    net.train(
        &xs,
        &ys,
        &TrainConfig::default(),
        &mut StdRng::seed_from_u64(1),
        Some(&mut tracker),
    )
    .unwrap();

    assert!(tracker.count() > 0);
    assert!(tracker.min().unwrap() < tracker.max().unwrap());
}

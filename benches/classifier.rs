use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;

use mlp_classifier::{Classifier, ClassifierConfig, TrainConfig};

fn classifier_predict_bench(c: &mut Criterion) {
    let net = Classifier::new_with_seed(&[34, 64, 64, 2], ClassifierConfig::default(), 0).unwrap();
    let input = vec![0.1_f64; net.input_nodes()];

    c.bench_function("classifier_predict_34_64_64_2", |b| {
        b.iter(|| {
            let out = net.predict_output(black_box(&input)).unwrap();
            black_box(out);
        })
    });
}

fn classifier_train_epoch_bench(c: &mut Criterion) {
    let mut net =
        Classifier::new_with_seed(&[34, 64, 64, 2], ClassifierConfig::default(), 0).unwrap();
    let xs: Vec<Vec<f64>> = (0..64)
        .map(|i| vec![f64::from(i % 7) * 0.1; net.input_nodes()])
        .collect();
    let ys: Vec<Vec<f64>> = (0..64).map(|i| vec![f64::from(i % 2)]).collect();
    let cfg = TrainConfig {
        epochs: 1,
        ..TrainConfig::default()
    };
    let mut rng = StdRng::seed_from_u64(0);

    c.bench_function("classifier_train_epoch_64x34", |b| {
        b.iter(|| {
            let report = net
                .train(black_box(&xs), black_box(&ys), &cfg, &mut rng, None)
                .unwrap();
            black_box(report);
        })
    });
}

criterion_group!(
    benches,
    classifier_predict_bench,
    classifier_train_epoch_bench
);
criterion_main!(benches);

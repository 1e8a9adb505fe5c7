use mlp_classifier::{Classifier, ClassifierConfig, RangeTracker, TrainConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() -> mlp_classifier::Result<()> {
    env_logger::init();

    // Two points, ten copies each.
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    for _ in 0..10 {
        xs.push(vec![0.0, 0.0]);
        ys.push(vec![0.0]);
        xs.push(vec![1.0, 1.0]);
        ys.push(vec![1.0]);
    }

    // 2 -> 4 -> 2, one-hot targets, argmax decisions.
    let config = ClassifierConfig {
        learning_rate: 0.5,
        ..ClassifierConfig::default()
    };
    let mut net = Classifier::new_with_seed(&[2, 4, 2], config, 0)?;
    let mut tracker = RangeTracker::new();
    let report = net.train(
        &xs,
        &ys,
        &TrainConfig {
            epochs: 200,
            ..TrainConfig::default()
        },
        &mut StdRng::seed_from_u64(0),
        Some(&mut tracker),
    )?;

    println!(
        "steps={} final_error={:.6} accuracy={}",
        report.steps,
        report.final_error,
        net.score(&xs, &ys)?
    );
    println!(
        "value range seen during training: [{:?}, {:?}]",
        tracker.min(),
        tracker.max()
    );
    for x in [[0.0, 0.0], [1.0, 1.0]] {
        println!("x={x:?} out={:?} class={}", net.predict_output(&x)?, net.predict(&x)?);
    }

    Ok(())
}

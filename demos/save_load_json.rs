#[cfg(not(feature = "serde"))]
fn main() {
    println!("enable the `serde` feature: cargo run --example save_load_json --features serde");
}

#[cfg(feature = "serde")]
fn main() -> mlp_classifier::Result<()> {
    use mlp_classifier::{Classifier, ClassifierConfig, TrainConfig};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    let xs = vec![vec![0.0, 0.0], vec![1.0, 1.0]];
    let ys = vec![vec![0.0], vec![1.0]];

    let config = ClassifierConfig {
        learning_rate: 0.5,
        ..ClassifierConfig::default()
    };
    let mut net = Classifier::new_with_seed(&[2, 4, 2], config, 0)?;
    net.train(
        &xs,
        &ys,
        &TrainConfig {
            epochs: 500,
            ..TrainConfig::default()
        },
        &mut StdRng::seed_from_u64(0),
        None,
    )?;

    let path = "target/tmp_classifier.json";
    net.save_json(path)?;

    let loaded = Classifier::load_json(path)?;
    assert_eq!(loaded.predict_all(&xs)?, net.predict_all(&xs)?);
    println!("saved and loaded classifier: {path} classes={:?}", loaded.classes());
    Ok(())
}

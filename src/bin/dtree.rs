use rusty_dtree::data::reader::read_csv;
use rusty_dtree::metrics::confusion::ClassificationMetrics;
use rusty_dtree::trees::classifier::DecisionTreeClassifier;
use std::env;
use std::error::Error;
use std::process;

fn run(train_path: &str, test_path: &str) -> Result<(), Box<dyn Error>> {
    let train_dataset = read_csv(train_path)?;
    let mut classifier = DecisionTreeClassifier::new();
    classifier.fit(&train_dataset)?;

    let test_dataset = read_csv(test_path)?;
    if test_dataset.attributes != classifier.attributes() {
        return Err(format!(
            "Testing attributes {:?} don't match training attributes {:?}.",
            test_dataset.attributes,
            classifier.attributes()
        )
        .into());
    }

    let predictions = classifier.predict(&test_dataset.x)?;

    println!("{}", classifier.render_level_order());
    println!(
        "Accuracy: {}",
        classifier.accuracy(&test_dataset.y, &predictions)?
    );
    Ok(())
}

fn usage(args: &[String]) -> String {
    let program = args.first().map_or("dtree", String::as_str);
    format!("Usage: {} <training data> <testing data>", program)
}

fn main() {
    let args = env::args().collect::<Vec<_>>();
    if args.len() < 3 {
        eprintln!("{}", usage(&args));
        process::exit(1);
    }

    if let Err(err) = run(&args[1], &args[2]) {
        eprintln!("{}", err);
        process::exit(1);
    }
}

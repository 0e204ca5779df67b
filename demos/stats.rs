use argspec::{Cast, CommandLineSpec, Opt, Switch, Value};

fn main() {
    let parser = CommandLineSpec::new("stats")
        .description("Summarizes a series of measurements")
        .version(env!("CARGO_PKG_VERSION"))
        .switch(Switch::new("verbose").short('v').description("print every measurement"))
        .option(
            Opt::new("sample")
                .short('s')
                .cast(Cast::Float)
                .repeatable()
                .required()
                .description("a measurement"),
        )
        .option(
            Opt::new("precision")
                .short('p')
                .cast(Cast::Integer)
                .default_value("2")
                .description("decimal places to print"),
        )
        .build();

    let values = parser.parse_env();
    let samples: Vec<f64> = values
        .list("sample")
        .unwrap_or_default()
        .iter()
        .filter_map(Value::as_float)
        .collect();
    let precision = values.int("precision").unwrap_or(2).max(0) as usize;

    if values.switch("verbose") {
        for sample in &samples {
            println!("{sample:.precision$}");
        }
    }

    let count = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / count;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / count;
    println!("count: {count}");
    println!("mean: {mean:.precision$}");
    println!("stddev: {:.precision$}", variance.sqrt());
}

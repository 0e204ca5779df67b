use argspec::{Argument, Cast, CommandLineSpec, Opt, Stdin, Switch};
use std::path::PathBuf;

fn main() {
    let parser = CommandLineSpec::new("log_processor")
        .description("Log file processor")
        .version(env!("CARGO_PKG_VERSION"))
        .stdin(
            Stdin::named("log_data")
                .cast(Cast::yaml())
                .description("YAML formatted log data"),
        )
        .switch(Switch::new("debug").short('d').description("enable debugging"))
        .option(
            Opt::new("location")
                .short('r')
                .description("place where server is located"),
        )
        .option(
            Opt::new("group")
                .default_value("red")
                .default_label("colour"),
        )
        .option(
            Opt::new("limit")
                .short('l')
                .cast(Cast::Integer)
                .default_value("10")
                .description("number of entries to show"),
        )
        .argument(
            Argument::new("log")
                .cast(Cast::construct::<PathBuf>())
                .description("log file to process"),
        )
        .argument(
            Argument::new("files")
                .variadic()
                .cast(Cast::construct::<PathBuf>())
                .description("additional files to process"),
        )
        .build();

    let values = parser.parse_env();

    if values.switch("debug") {
        eprintln!("{values:?}");
    }

    let log = values
        .get_as::<PathBuf>("log")
        .expect("log is a mandatory argument");
    println!("log: {}", log.display());

    for file in values.list("files").unwrap_or_default() {
        if let Some(path) = file.downcast_ref::<PathBuf>() {
            println!("file: {}", path.display());
        }
    }

    println!("group: {}", values.str("group").unwrap_or_default());

    if let Some(location) = values.str("location") {
        println!("location: {location}");
    }

    if let Some(data) = values.stdin().and_then(|stdin| stdin.as_data()) {
        let limit = values.int("limit").unwrap_or(10).max(0) as usize;

        match data.as_mapping() {
            Some(entries) => {
                for (key, value) in entries.iter().take(limit) {
                    println!("{key:?}: {value:?}");
                }
            }
            None => println!("{data:?}"),
        }
    }
}

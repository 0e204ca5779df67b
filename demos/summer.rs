use argspec::{Argument, Cast, CommandLineSpec};

fn main() {
    let parser = CommandLineSpec::new("summer")
        .argument(
            Argument::new("items")
                .variadic()
                .cast(Cast::Integer)
                .description("the items to sum"),
        )
        .build();

    let values = parser.parse_env();
    let sum: i64 = values
        .list("items")
        .unwrap_or_default()
        .iter()
        .filter_map(|item| item.as_int())
        .sum();
    println!("Sum: {sum}");
}

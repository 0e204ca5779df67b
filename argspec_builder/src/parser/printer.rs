use crate::api::{Argument, Opt, Switch};
use crate::matcher::Registry;

/// Renders the usage text of a command.
#[derive(Debug, Clone)]
pub(crate) struct Printer {
    program: String,
    description: Option<String>,
}

impl Printer {
    pub(crate) fn new(program: impl Into<String>, description: Option<String>) -> Self {
        Self {
            program: program.into(),
            description,
        }
    }

    pub(crate) fn render(&self, registry: &Registry) -> String {
        let mut lines = vec![self.usage_line(registry)];

        if let Some(description) = &self.description {
            lines.push(description.clone());
        }

        if let Some(stdin) = registry.stdin() {
            if let Some(description) = &stdin.description {
                lines.push("Input:".to_string());
                lines.push(format!("   {} - {description}", stdin.display()));
            }
        }

        let switches: Vec<&Switch> = registry.switches().collect();
        if !switches.is_empty() {
            lines.push("Switches:".to_string());
            lines.extend(switches.into_iter().map(switch_entry));
        }

        let options: Vec<&Opt> = registry.options().collect();
        if !options.is_empty() {
            lines.push("Options:".to_string());
            lines.extend(options.into_iter().map(option_entry));
        }

        if !registry.arguments().is_empty() {
            lines.push("Arguments:".to_string());
            lines.extend(registry.arguments().iter().map(argument_entry));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }

    fn usage_line(&self, registry: &Registry) -> String {
        let mut line = format!("Usage: {}", self.program);
        let has_switches = registry.switches().next().is_some();
        let has_flags = !registry.flags().is_empty();
        let optional_options = registry.options().any(|option| !option.mandatory());

        match (has_switches, optional_options) {
            (true, true) => line.push_str(" [switches|options]"),
            (true, false) => line.push_str(" [switches]"),
            (false, true) => line.push_str(" [options]"),
            (false, false) => {}
        }

        for option in registry.options().filter(|option| option.mandatory()) {
            line.push_str(&format!(" {} <value>", option.flag()));
        }

        if !registry.arguments().is_empty() {
            if has_flags {
                line.push_str(" [--]");
            }

            for argument in registry.arguments() {
                let token = format!("{}{}", argument.display(), variadic_marker(argument.multiary));

                if argument.mandatory() {
                    line.push_str(&format!(" {token}"));
                } else {
                    line.push_str(&format!(" [{token}]"));
                }
            }
        }

        if let Some(stdin) = registry.stdin() {
            line.push_str(&format!(" < {}", stdin.display()));
        }

        line
    }
}

fn variadic_marker(multiary: bool) -> &'static str {
    if multiary {
        "*"
    } else {
        ""
    }
}

fn describe(entry: &mut String, description: &Option<String>) {
    if let Some(description) = description {
        entry.push_str(&format!(" - {description}"));
    }
}

fn switch_entry(switch: &Switch) -> String {
    let mut entry = format!("   {}", switch.flag());

    if let Some(short) = switch.short {
        entry.push_str(&format!(" (-{short})"));
    }

    if let Some(state) = switch.default {
        entry.push_str(&format!(" [{state}]"));
    }

    describe(&mut entry, &switch.description);
    entry
}

fn option_entry(option: &Opt) -> String {
    let mut entry = format!("   {}{}", option.flag(), variadic_marker(option.multiary));

    if let Some(short) = option.short {
        entry.push_str(&format!(" (-{short})"));
    }

    if option.mandatory() {
        entry.push_str(" (mandatory)");
    }

    match (&option.default_label, &option.default) {
        (Some(label), _) => entry.push_str(&format!(" [{label}]")),
        (None, Some(default)) => entry.push_str(&format!(" [{default}]")),
        (None, None) => {}
    }

    describe(&mut entry, &option.description);
    entry
}

fn argument_entry(argument: &Argument) -> String {
    let mut entry = format!("   {}{}", argument.display(), variadic_marker(argument.multiary));

    if !argument.required && argument.default.is_none() {
        entry.push_str(" (optional)");
    }

    match (&argument.default_label, &argument.default) {
        (Some(label), _) => entry.push_str(&format!(" [{label}]")),
        (None, Some(default)) => entry.push_str(&format!(" [{default}]")),
        (None, None) => {}
    }

    describe(&mut entry, &argument.description);
    entry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Cast, Stdin};
    use crate::matcher::RegistryBuilder;
    use crate::test::assert_contains;
    use rstest::rstest;

    fn with_help(builder: &mut RegistryBuilder) {
        builder.register_switch(Switch::help()).unwrap();
    }

    fn render(setup: impl FnOnce(&mut RegistryBuilder)) -> String {
        let mut builder = RegistryBuilder::default();
        setup(&mut builder);
        with_help(&mut builder);
        Printer::new("rspec", None).render(&builder.finalize())
    }

    fn first_line(text: &str) -> &str {
        text.lines().next().unwrap()
    }

    #[test]
    fn formatted_usage() {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_stdin(
                Stdin::named("log_data")
                    .cast(Cast::yaml())
                    .description("YAML formatted log data"),
            )
            .unwrap();
        builder
            .register_switch(Switch::new("debug").short('d').description("enable debugging"))
            .unwrap();
        builder
            .register_switch(Switch::new("logging").short('l'))
            .unwrap();
        builder.register_switch(Switch::new("run")).unwrap();
        builder
            .register_option(
                Opt::new("location")
                    .short('r')
                    .description("place where server is located"),
            )
            .unwrap();
        builder
            .register_option(Opt::new("group").default_value("red").default_label("colour"))
            .unwrap();
        builder
            .register_option(Opt::new("power_up").short('p').required().repeatable())
            .unwrap();
        builder
            .register_option(Opt::new("speed").short('s').cast(Cast::Integer))
            .unwrap();
        builder
            .register_option(
                Opt::new("the_number_of_the_beast")
                    .short('b')
                    .cast(Cast::Integer)
                    .default_value("666")
                    .description("The number of the beast"),
            )
            .unwrap();
        builder.register_option(Opt::new("size")).unwrap();
        builder
            .register_argument(Argument::new("log").description("log file to process"))
            .unwrap();
        builder
            .register_argument(Argument::new("magick").default_value("word"))
            .unwrap();
        builder.register_argument(Argument::new("string")).unwrap();
        builder
            .register_argument(
                Argument::new("limit")
                    .cast(Cast::Integer)
                    .optional()
                    .description("limit in seconds"),
            )
            .unwrap();
        builder
            .register_argument(Argument::new("unlock_code").cast(Cast::Integer).optional())
            .unwrap();
        builder
            .register_argument(
                Argument::new("code")
                    .cast(Cast::Integer)
                    .default_value("123")
                    .default_label("generated")
                    .description("secret code"),
            )
            .unwrap();
        builder
            .register_argument(
                Argument::new("illegal_prime")
                    .cast(Cast::Integer)
                    .description("prime number that represents information that it is forbidden to possess or distribute"),
            )
            .unwrap();
        builder
            .register_argument(
                Argument::new("files")
                    .variadic()
                    .default_values(["test", "1", "2"])
                    .description("files to process"),
            )
            .unwrap();
        builder.register_switch(Switch::help()).unwrap();
        builder.register_switch(Switch::version()).unwrap();
        let registry = builder.finalize();
        let printer = Printer::new("rspec", Some("Log file processor".to_string()));

        // Execute
        let text = printer.render(&registry);

        // Verify
        assert_eq!(
            text,
            r#"Usage: rspec [switches|options] --power-up <value> [--] log [magick] string [limit] [unlock-code] [code] illegal-prime [files*] < log-data
Log file processor
Input:
   log-data - YAML formatted log data
Switches:
   --debug (-d) - enable debugging
   --logging (-l)
   --run
   --help (-h) - display this help message
   --version - display version string
Options:
   --location (-r) - place where server is located
   --group [colour]
   --power-up* (-p) (mandatory)
   --speed (-s)
   --the-number-of-the-beast (-b) [666] - The number of the beast
   --size
Arguments:
   log - log file to process
   magick [word]
   string
   limit (optional) - limit in seconds
   unlock-code (optional)
   code [generated] - secret code
   illegal-prime - prime number that represents information that it is forbidden to possess or distribute
   files* [test 1 2] - files to process
"#
        );
    }

    #[test]
    fn only_help() {
        let text = render(|_| {});
        assert_eq!(
            text,
            "Usage: rspec [switches]\nSwitches:\n   --help (-h) - display this help message\n"
        );
    }

    #[test]
    fn arguments_line() {
        let text = render(|builder| {
            builder.register_argument(Argument::new("location")).unwrap();
        });
        assert_eq!(first_line(&text), "Usage: rspec [switches] [--] location");
    }

    #[test]
    fn optional_arguments_line() {
        let text = render(|builder| {
            builder.register_argument(Argument::new("location")).unwrap();
            builder
                .register_argument(Argument::new("size").optional())
                .unwrap();
            builder
                .register_argument(Argument::new("colour").default_value("red"))
                .unwrap();
            builder.register_argument(Argument::new("group")).unwrap();
        });
        assert_eq!(
            first_line(&text),
            "Usage: rspec [switches] [--] location [size] [colour] group"
        );
    }

    #[test]
    fn variadic_line() {
        let text = render(|builder| {
            builder
                .register_argument(Argument::new("files").variadic())
                .unwrap();
        });
        assert_eq!(first_line(&text), "Usage: rspec [switches] [--] files*");
        assert_contains!(text, "\n   files*\n");
    }

    #[rstest]
    #[case(vec![Opt::new("location").short('l')], "Usage: rspec [switches|options]")]
    #[case(vec![Opt::new("size").required(), Opt::new("group").short('g').required()], "Usage: rspec [switches] --size <value> --group <value>")]
    #[case(vec![Opt::new("location").short('l'), Opt::new("size").required(), Opt::new("group").short('g').required()], "Usage: rspec [switches|options] --size <value> --group <value>")]
    #[case(vec![Opt::new("size").required().default_value("1")], "Usage: rspec [switches|options]")]
    fn options_line(#[case] options: Vec<Opt>, #[case] expected: &str) {
        let text = render(|builder| {
            for option in options {
                builder.register_option(option).unwrap();
            }
        });
        assert_eq!(first_line(&text), expected);
    }

    #[rstest]
    #[case(Opt::new("group").default_value("red"), "   --group [red]\n")]
    #[case(Opt::new("group").default_label("blue"), "   --group [blue]\n")]
    #[case(Opt::new("group").default_label("blue").default_value("red"), "   --group [blue]\n")]
    #[case(Opt::new("tag").repeatable().default_values(["a", "b"]), "   --tag* [a b]\n")]
    #[case(Opt::new("location").short('l').description("place"), "   --location (-l) - place\n")]
    fn option_entries(#[case] option: Opt, #[case] expected: &str) {
        let text = render(|builder| builder.register_option(option).unwrap());
        assert_contains!(text, expected);
    }

    #[rstest]
    #[case(Argument::new("group").default_value("red"), "   group [red]\n")]
    #[case(Argument::new("group").default_label("blue"), "   group [blue]\n")]
    #[case(Argument::new("group").default_label("blue").default_value("red"), "   group [blue]\n")]
    #[case(Argument::new("group").optional(), "   group (optional)\n")]
    #[case(Argument::new("log").description("log file to process"), "   log - log file to process\n")]
    fn argument_entries(#[case] argument: Argument, #[case] expected: &str) {
        let text = render(|builder| builder.register_argument(argument).unwrap());
        assert_contains!(text, expected);
    }

    #[test]
    fn switch_default() {
        let text = render(|builder| {
            builder
                .register_switch(Switch::new("colour").default_value(true))
                .unwrap();
        });
        assert_contains!(text, "   --colour [true]\n");
    }

    #[rstest]
    #[case(Stdin::new(), " < data")]
    #[case(Stdin::named("log_file"), " < log-file")]
    fn stdin_line(#[case] stdin: Stdin, #[case] expected: &str) {
        let text = render(|builder| builder.register_stdin(stdin).unwrap());
        assert!(first_line(&text).ends_with(expected));
        assert!(!text.contains("Input:"));
    }

    #[test]
    fn stdin_description() {
        let text = render(|builder| {
            builder
                .register_stdin(Stdin::named("log_file").description("log file to process"))
                .unwrap();
        });
        assert_contains!(text, "Input:\n   log-file - log file to process\n");
    }
}

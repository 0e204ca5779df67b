use crate::api::{Argument, Opt, Stdin, Switch};
use crate::matcher::{DeclarationError, RegistryBuilder};
use crate::parser::{CommandParser, Parser, Printer};

/// The declaration of a command line: its switches, options, arguments and stdin binding.
///
/// Declarations are validated as they are added.
/// The first invalid declaration is reported by [`CommandLineSpec::build_parser`]; anything declared after it is ignored.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{CommandLineSpec};
///
/// let parser = CommandLineSpec::new("program")
///     // Configure with CommandLineSpec::switch, ::option, ::argument and ::stdin.
///     .build();
/// parser.parse_tokens(&[]).unwrap();
/// ```
#[derive(Debug)]
pub struct CommandLineSpec {
    program: String,
    description: Option<String>,
    version: Option<String>,
    registry: RegistryBuilder,
    deferred_error: Option<DeclarationError>,
}

impl CommandLineSpec {
    /// Create a command line spec for `program` (the name shown in the usage text).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            description: None,
            version: None,
            registry: RegistryBuilder::default(),
            deferred_error: None,
        }
    }

    /// Document the program in the usage text.
    /// If repeated, only the final description will apply.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::CommandLineSpec;
    ///
    /// let parser = CommandLineSpec::new("program")
    ///     .description("--this will get discarded--")
    ///     .description("Log file processor")
    ///     .build();
    ///
    /// assert_eq!(parser.usage(), "Usage: program [switches]\nLog file processor\nSwitches:\n   --help (-h) - display this help message\n");
    /// ```
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the version, enabling the `--version` switch.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::CommandLineSpec;
    ///
    /// let parser = CommandLineSpec::new("program")
    ///     .version("1.0.2")
    ///     .build();
    ///
    /// let values = parser.parse(&["--version"]).unwrap();
    /// assert_eq!(values.version_text(), Some("program version \"1.0.2\"\n"));
    /// ```
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version.replace(version.into());
        self
    }

    fn register(
        mut self,
        register: impl FnOnce(&mut RegistryBuilder) -> Result<(), DeclarationError>,
    ) -> Self {
        if self.deferred_error.is_none() {
            if let Err(error) = register(&mut self.registry) {
                self.deferred_error.replace(error);
            }
        }

        self
    }

    /// Add a switch.
    pub fn switch(self, switch: Switch) -> Self {
        self.register(|registry| registry.register_switch(switch))
    }

    /// Add an option.
    pub fn option(self, option: Opt) -> Self {
        self.register(|registry| registry.register_option(option))
    }

    /// Add a positional argument.
    /// The order of arguments is their positional order during parsing.
    pub fn argument(self, argument: Argument) -> Self {
        self.register(|registry| registry.register_argument(argument))
    }

    /// Bind the input stream.
    /// If repeated, only the final binding will apply.
    pub fn stdin(self, stdin: Stdin) -> Self {
        self.register(|registry| registry.register_stdin(stdin))
    }

    /// Build the command line parser as a Result.
    /// This finalizes the declarations and checks for errors (ex: a repeated switch name).
    ///
    /// The `--help (-h)` switch, then the `--version` switch (when a version is set), are declared last.
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{CommandLineSpec, Switch};
    ///
    /// let error = CommandLineSpec::new("program")
    ///     .switch(Switch::new("help"))
    ///     .build_parser()
    ///     .unwrap_err();
    ///
    /// assert_eq!(error.to_string(), "switch --help specified twice");
    /// ```
    pub fn build_parser(self) -> Result<CommandParser, DeclarationError> {
        let versioned = self.version.is_some();
        let mut spec = self.switch(Switch::help());

        if versioned {
            spec = spec.switch(Switch::version());
        }

        let CommandLineSpec {
            program,
            description,
            version,
            registry,
            deferred_error,
        } = spec;

        if let Some(error) = deferred_error {
            return Err(error);
        }

        let printer = Printer::new(program.clone(), description);
        let parser = Parser::new(registry.finalize(), versioned);
        Ok(CommandParser::new(program, parser, printer, version))
    }

    /// Build the command line parser.
    /// This finalizes the declarations and checks for errors (ex: a repeated switch name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> CommandParser {
        match self.build_parser() {
            Ok(parser) => parser,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

use std::env;
use std::io::Read;

use crate::model::Values;
use crate::parser::base::*;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::printer::Printer;

/// A built command line parser.
///
/// The parser is immutable: it may be reused, and shared across threads, for any number of parses.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Argument, CommandLineSpec, Switch};
///
/// let parser = CommandLineSpec::new("program")
///     .switch(Switch::new("verbose").short('v'))
///     .argument(Argument::new("log"))
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse(&["-v", "/tmp/log"]).unwrap();
/// assert!(values.switch("verbose"));
/// assert_eq!(values.str("log"), Some("/tmp/log"));
/// ```
#[derive(Debug)]
pub struct CommandParser {
    program: String,
    parser: Parser,
    printer: Printer,
    version: Option<String>,
}

impl CommandParser {
    pub(crate) fn new(
        program: String,
        parser: Parser,
        printer: Printer,
        version: Option<String>,
    ) -> Self {
        Self {
            program,
            parser,
            printer,
            version,
        }
    }

    /// The rendered usage text.
    pub fn usage(&self) -> String {
        self.printer.render(self.parser.registry())
    }

    /// The formatted version string, if a version is configured.
    pub fn version(&self) -> Option<String> {
        self.version
            .as_ref()
            .map(|version| format!("{} version \"{version}\"\n", self.program))
    }

    fn resolve(&self, action: Action) -> Values {
        match action {
            Action::PrintHelp => Values::help(self.usage()),
            Action::PrintVersion => Values::version(
                self.version()
                    .expect("internal error - version requested without a version"),
            ),
            Action::Complete(values) => values,
        }
    }

    /// Parse the tokens, without an input stream.
    ///
    /// When help (or version) is requested, the result holds only the usage text (or version string).
    /// See [`Values::help_text`] and [`Values::version_text`].
    pub fn parse(&self, tokens: &[&str]) -> Result<Values, ParseError> {
        self.parser.consume(tokens, None).map(|a| self.resolve(a))
    }

    /// Parse the tokens, binding `input` to the declared stdin.
    /// When no stdin is declared, `input` is never read.
    pub fn parse_with_input(&self, tokens: &[&str], mut input: impl Read) -> Result<Values, ParseError> {
        self.parser
            .consume(tokens, Some(&mut input))
            .map(|a| self.resolve(a))
    }

    /// Parse the tokens, reporting to `user_interface`.
    ///
    /// Help and version text are printed to the output channel, answering `Err(0)`.
    /// Parse errors are printed as `Error: <message>` followed by the usage text to the error channel, answering `Err(1)`.
    pub fn parse_with_interface(
        &self,
        tokens: &[&str],
        input: Option<&mut dyn Read>,
        user_interface: &dyn UserInterface,
    ) -> Result<Values, i32> {
        match self.parser.consume(tokens, input) {
            Ok(Action::PrintHelp) => {
                user_interface.print(&self.usage());
                Err(0)
            }
            Ok(Action::PrintVersion) => {
                let version = self
                    .version()
                    .expect("internal error - version requested without a version");
                user_interface.print(&version);
                Err(0)
            }
            Ok(Action::Complete(values)) => Ok(values),
            Err(error) => {
                user_interface.print_error(&format!("Error: {error}\n{}", self.usage()));
                Err(1)
            }
        }
    }

    /// Parse the tokens against the console, without an input stream.
    /// Answers the exit code in the `Err` case (see [`CommandParser::parse_with_interface`]).
    ///
    /// ### Example
    /// ```
    /// # use argspec_builder as argspec;
    /// use argspec::{CommandLineSpec, Opt};
    ///
    /// let parser = CommandLineSpec::new("program")
    ///     .option(Opt::new("size").required())
    ///     .build_parser()
    ///     .unwrap();
    ///
    /// assert_eq!(parser.parse_tokens(&["--size", "1"]).unwrap().str("size"), Some("1"));
    /// assert_eq!(parser.parse_tokens(&["--help"]).unwrap_err(), 0);
    /// assert_eq!(parser.parse_tokens(&[]).unwrap_err(), 1);
    /// ```
    pub fn parse_tokens(&self, tokens: &[&str]) -> Result<Values, i32> {
        self.parse_with_interface(tokens, None, &ConsoleInterface::default())
    }

    /// Parse the process arguments (and standard input, when stdin is declared).
    /// Exits the process on help, version, or a parse error.
    pub fn parse_env(&self) -> Values {
        let command_input: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = command_input.iter().map(AsRef::as_ref).collect();
        let console = ConsoleInterface::default();

        let result = if self.parser.registry().stdin().is_some() {
            let mut stdin = std::io::stdin().lock();
            self.parse_with_interface(&tokens, Some(&mut stdin), &console)
        } else {
            self.parse_with_interface(&tokens, None, &console)
        };

        match result {
            Ok(values) => values,
            Err(exit_code) => std::process::exit(exit_code),
        }
    }
}

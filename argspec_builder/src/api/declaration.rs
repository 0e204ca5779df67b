use crate::api::Cast;
use crate::constant::*;

/// The raw (un-cast) default of an option or argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    /// A single default token.
    Single(String),
    /// Multiple default tokens, for repeatable options and variadic arguments.
    Many(Vec<String>),
}

impl DefaultValue {
    pub(crate) fn values(&self) -> Vec<String> {
        match self {
            DefaultValue::Single(value) => vec![value.clone()],
            DefaultValue::Many(values) => values.clone(),
        }
    }
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Single(value) => write!(f, "{value}"),
            DefaultValue::Many(values) => write!(f, "{}", values.join(" ")),
        }
    }
}

pub(crate) fn display_name(name: &str) -> String {
    name.replace('_', "-")
}

/// A boolean presence flag, matched by `--name` or its short alias `-x`.
///
/// An absent switch is unset (not `false`), unless it declares a default.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{CommandLineSpec, Switch};
///
/// let parser = CommandLineSpec::new("program")
///     .switch(Switch::new("debug").short('d').description("enable debugging"))
///     .switch(Switch::new("dry_run"))
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse(&["-d"]).unwrap();
/// assert!(values.switch("debug"));
/// assert!(!values.is_set("dry_run"));
/// ```
#[derive(Debug, Clone)]
pub struct Switch {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) description: Option<String>,
    pub(crate) default: Option<bool>,
}

impl Switch {
    /// Create a switch.
    /// The name must be identifier shaped; underscores are written as dashes on the command line (`dry_run` is `--dry-run`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            description: None,
            default: None,
        }
    }

    /// Set the single letter (or digit) alias, used as `-x`.
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Document the switch in the usage text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the state used when the switch is absent.
    pub fn default_value(mut self, state: bool) -> Self {
        self.default.replace(state);
        self
    }

    pub(crate) fn flag(&self) -> String {
        format!("--{}", display_name(&self.name))
    }

    pub(crate) fn help() -> Self {
        Switch::new(HELP_NAME)
            .short(HELP_SHORT)
            .description(HELP_MESSAGE)
    }

    pub(crate) fn version() -> Self {
        Switch::new(VERSION_NAME).description(VERSION_MESSAGE)
    }
}

/// A flag carrying a value, matched by `--name <value>` or `-x <value>`.
///
/// A repeatable option accumulates every occurrence into a list, otherwise the last occurrence wins.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Cast, CommandLineSpec, Opt, Value};
///
/// let parser = CommandLineSpec::new("program")
///     .option(Opt::new("size").short('s').cast(Cast::Integer))
///     .option(Opt::new("group").default_value("red"))
///     .option(Opt::new("tag").short('t').repeatable())
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse(&["-s", "24", "-t", "a", "-t", "b"]).unwrap();
/// assert_eq!(values.int("size"), Some(24));
/// assert_eq!(values.str("group"), Some("red"));
/// assert_eq!(values.strs("tag"), Some(vec!["a", "b"]));
/// ```
#[derive(Debug, Clone)]
pub struct Opt {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) description: Option<String>,
    pub(crate) cast: Cast,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) default_label: Option<String>,
    pub(crate) required: bool,
    pub(crate) multiary: bool,
}

impl Opt {
    /// Create an option.
    /// The name must be identifier shaped; underscores are written as dashes on the command line (`power_up` is `--power-up`).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            description: None,
            cast: Cast::Identity,
            default: None,
            default_label: None,
            required: false,
            multiary: false,
        }
    }

    /// Set the single letter (or digit) alias, used as `-x`.
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Document the option in the usage text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the conversion applied to each value.
    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Set the raw value used when the option is not given.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default.replace(DefaultValue::Single(value.into()));
        self
    }

    /// Set the raw values used when the repeatable option is not given.
    pub fn default_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default.replace(DefaultValue::Many(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Show `label` in the usage text in place of the default.
    pub fn default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label.replace(label.into());
        self
    }

    /// Require the option; parsing fails when it is neither given nor defaulted.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Allow the option to be repeated, accumulating its values in order.
    pub fn repeatable(mut self) -> Self {
        self.multiary = true;
        self
    }

    pub(crate) fn mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }

    pub(crate) fn flag(&self) -> String {
        format!("--{}", display_name(&self.name))
    }
}

/// A positional value.
///
/// Arguments are required unless declared [`Argument::optional`] or given a default.
/// At most one argument may be [`Argument::variadic`], consuming every token the other arguments do not need.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Argument, CommandLineSpec};
///
/// let parser = CommandLineSpec::new("program")
///     .argument(Argument::new("log"))
///     .argument(Argument::new("files").variadic())
///     .argument(Argument::new("target"))
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse(&["/tmp/log", "a", "b", "/out"]).unwrap();
/// assert_eq!(values.str("log"), Some("/tmp/log"));
/// assert_eq!(values.strs("files"), Some(vec!["a", "b"]));
/// assert_eq!(values.str("target"), Some("/out"));
/// ```
#[derive(Debug, Clone)]
pub struct Argument {
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) cast: Cast,
    pub(crate) default: Option<DefaultValue>,
    pub(crate) default_label: Option<String>,
    pub(crate) required: bool,
    pub(crate) multiary: bool,
}

impl Argument {
    /// Create an argument.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            cast: Cast::Identity,
            default: None,
            default_label: None,
            required: true,
            multiary: false,
        }
    }

    /// Document the argument in the usage text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the conversion applied to each value.
    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    /// Set the raw value used when no token is left for the argument.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default.replace(DefaultValue::Single(value.into()));
        self
    }

    /// Set the raw values used when no token is left for the variadic argument.
    pub fn default_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default.replace(DefaultValue::Many(
            values.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Show `label` in the usage text in place of the default.
    pub fn default_label(mut self, label: impl Into<String>) -> Self {
        self.default_label.replace(label.into());
        self
    }

    /// Allow the argument to be left out, resolving to unset (or an empty list, when variadic).
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Consume all remaining tokens into a list.
    pub fn variadic(mut self) -> Self {
        self.multiary = true;
        self
    }

    pub(crate) fn mandatory(&self) -> bool {
        self.required && self.default.is_none()
    }

    pub(crate) fn display(&self) -> String {
        display_name(&self.name)
    }
}

/// The binding of the input stream.
/// The name is only used for display.
///
/// ### Example
/// ```
/// # use argspec_builder as argspec;
/// use argspec::{Cast, CommandLineSpec, Stdin};
///
/// let parser = CommandLineSpec::new("program")
///     .stdin(Stdin::named("log_data").cast(Cast::yaml()))
///     .build_parser()
///     .unwrap();
///
/// let values = parser.parse_with_input(&[], "successes: 41".as_bytes()).unwrap();
/// let data = values.stdin().unwrap().as_data().unwrap();
/// assert_eq!(data["successes"].as_u64(), Some(41));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Stdin {
    pub(crate) name: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) cast: Cast,
}

impl Stdin {
    /// Create a binding displayed as `data`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a binding displayed as `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Document the input in the usage text.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description.replace(description.into());
        self
    }

    /// Set the conversion applied to the whole stream.
    pub fn cast(mut self, cast: Cast) -> Self {
        self.cast = cast;
        self
    }

    pub(crate) fn display(&self) -> String {
        display_name(self.name.as_deref().unwrap_or(DEFAULT_STDIN_NAME))
    }
}

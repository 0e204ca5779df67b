use std::collections::HashMap;
use thiserror::Error;

use crate::api::{display_name, Argument, DefaultValue, Opt, Stdin, Switch};

/// An error in the declaration of a command line.
/// These are programmer errors: the command line cannot be built.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeclarationError {
    /// The declaration is malformed (ex: its name is not identifier shaped).
    #[error("invalid {kind} '{name}': {reason}")]
    InvalidDeclaration {
        /// The kind of declaration (`switch`, `option`, `argument`, `stdin`).
        kind: &'static str,
        /// The declared name.
        name: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The short alias is not a single letter or digit.
    #[error("short name for {flag} has to be a single letter or digit, got '{short}'")]
    InvalidShortAlias {
        /// The long flag (ex: `--location`).
        flag: String,
        /// The rejected alias.
        short: char,
    },

    /// The long name is already used by a switch or option.
    #[error("{kinds} {flag} specified twice")]
    DuplicateLongName {
        /// The colliding kinds (ex: `switch` or `option and switch`).
        kinds: String,
        /// The long flag (ex: `--location`).
        flag: String,
    },

    /// The short alias is already used by a switch or option.
    #[error("short {kinds} {flag} specified twice")]
    DuplicateShortAlias {
        /// The colliding kinds (ex: `switch` or `option and switch`).
        kinds: String,
        /// The short flag (ex: `-l`).
        flag: String,
    },

    /// The argument name is already used by another argument.
    #[error("argument '{0}' specified twice")]
    DuplicateArgumentName(String),

    /// The argument name is already used by a switch or option.
    #[error("argument '{argument}' conflicts with {kind} {flag}")]
    ArgumentNameConflict {
        /// The argument name.
        argument: String,
        /// The kind of the conflicting declaration.
        kind: &'static str,
        /// The long flag of the conflicting declaration.
        flag: String,
    },

    /// More than one argument is variadic.
    #[error("only one variadic argument can be used, got: {}", .0.join(", "))]
    MultipleVariadicArguments(Vec<String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagClass {
    Switch,
    Opt,
}

impl FlagClass {
    fn describe(&self) -> &'static str {
        match self {
            FlagClass::Switch => "switch",
            FlagClass::Opt => "option",
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Flag {
    Switch(Switch),
    Opt(Opt),
}

impl Flag {
    pub(crate) fn name(&self) -> &str {
        match self {
            Flag::Switch(switch) => &switch.name,
            Flag::Opt(option) => &option.name,
        }
    }

    pub(crate) fn short(&self) -> Option<char> {
        match self {
            Flag::Switch(switch) => switch.short,
            Flag::Opt(option) => option.short,
        }
    }

    pub(crate) fn class(&self) -> FlagClass {
        match self {
            Flag::Switch(_) => FlagClass::Switch,
            Flag::Opt(_) => FlagClass::Opt,
        }
    }

    pub(crate) fn flag(&self) -> String {
        format!("--{}", display_name(self.name()))
    }
}

fn collision(existing: FlagClass, new: FlagClass) -> String {
    if existing == new {
        new.describe().to_string()
    } else {
        format!("{} and {}", existing.describe(), new.describe())
    }
}

fn validate_name(kind: &'static str, name: &str) -> Result<(), DeclarationError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(DeclarationError::InvalidDeclaration {
            kind,
            name: name.to_string(),
            reason: "name has to be an identifier".to_string(),
        })
    }
}

fn validate_short(flag: &Flag) -> Result<(), DeclarationError> {
    match flag.short() {
        Some(short) if !short.is_ascii_alphanumeric() => Err(DeclarationError::InvalidShortAlias {
            flag: flag.flag(),
            short,
        }),
        _ => Ok(()),
    }
}

fn validate_default(
    kind: &'static str,
    name: &str,
    default: &Option<DefaultValue>,
    multiary: bool,
) -> Result<(), DeclarationError> {
    match default {
        Some(DefaultValue::Many(_)) if !multiary => Err(DeclarationError::InvalidDeclaration {
            kind,
            name: name.to_string(),
            reason: format!("multiple default values require a multiary {kind}"),
        }),
        _ => Ok(()),
    }
}

/// Collects the declarations for one command, rejecting collisions as they are registered.
#[derive(Debug, Default)]
pub(crate) struct RegistryBuilder {
    flags: Vec<Flag>,
    long: HashMap<String, usize>,
    short: HashMap<char, usize>,
    arguments: Vec<Argument>,
    stdin: Option<Stdin>,
}

impl RegistryBuilder {
    pub(crate) fn register_switch(&mut self, switch: Switch) -> Result<(), DeclarationError> {
        validate_name("switch", &switch.name)?;
        self.register_flag(Flag::Switch(switch))
    }

    pub(crate) fn register_option(&mut self, option: Opt) -> Result<(), DeclarationError> {
        validate_name("option", &option.name)?;
        validate_default("option", &option.name, &option.default, option.multiary)?;
        self.register_flag(Flag::Opt(option))
    }

    fn register_flag(&mut self, flag: Flag) -> Result<(), DeclarationError> {
        validate_short(&flag)?;

        if let Some(existing) = self.long.get(flag.name()) {
            return Err(DeclarationError::DuplicateLongName {
                kinds: collision(self.flags[*existing].class(), flag.class()),
                flag: flag.flag(),
            });
        }

        if let Some(short) = flag.short() {
            if let Some(existing) = self.short.get(&short) {
                return Err(DeclarationError::DuplicateShortAlias {
                    kinds: collision(self.flags[*existing].class(), flag.class()),
                    flag: format!("-{short}"),
                });
            }
        }

        if self.arguments.iter().any(|a| a.name == flag.name()) {
            return Err(DeclarationError::ArgumentNameConflict {
                argument: flag.name().to_string(),
                kind: flag.class().describe(),
                flag: flag.flag(),
            });
        }

        let index = self.flags.len();
        self.long.insert(flag.name().to_string(), index);

        if let Some(short) = flag.short() {
            self.short.insert(short, index);
        }

        self.flags.push(flag);
        Ok(())
    }

    pub(crate) fn register_argument(&mut self, argument: Argument) -> Result<(), DeclarationError> {
        validate_name("argument", &argument.name)?;
        validate_default(
            "argument",
            &argument.name,
            &argument.default,
            argument.multiary,
        )?;

        if self.arguments.iter().any(|a| a.name == argument.name) {
            return Err(DeclarationError::DuplicateArgumentName(argument.name));
        }

        if let Some(existing) = self.long.get(&argument.name) {
            let flag = &self.flags[*existing];
            return Err(DeclarationError::ArgumentNameConflict {
                argument: argument.name.clone(),
                kind: flag.class().describe(),
                flag: flag.flag(),
            });
        }

        if argument.multiary {
            let mut variadic: Vec<String> = self
                .arguments
                .iter()
                .filter(|a| a.multiary)
                .map(|a| a.name.clone())
                .collect();

            if !variadic.is_empty() {
                variadic.push(argument.name);
                return Err(DeclarationError::MultipleVariadicArguments(variadic));
            }
        }

        self.arguments.push(argument);
        Ok(())
    }

    pub(crate) fn register_stdin(&mut self, stdin: Stdin) -> Result<(), DeclarationError> {
        if let Some(name) = &stdin.name {
            validate_name("stdin", name)?;
        }

        self.stdin.replace(stdin);
        Ok(())
    }

    pub(crate) fn finalize(self) -> Registry {
        let RegistryBuilder {
            flags,
            long,
            short,
            arguments,
            stdin,
        } = self;
        Registry {
            flags,
            long,
            short,
            arguments,
            stdin,
        }
    }
}

/// The finalized declarations for one command.
/// Read-only: parsing never mutates it.
#[derive(Debug)]
pub(crate) struct Registry {
    flags: Vec<Flag>,
    long: HashMap<String, usize>,
    short: HashMap<char, usize>,
    arguments: Vec<Argument>,
    stdin: Option<Stdin>,
}

impl Registry {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        RegistryBuilder::default().finalize()
    }

    /// Resolve a `--name` or `-x` token to the index of its switch/option.
    pub(crate) fn find(&self, token: &str) -> Option<usize> {
        if let Some(long) = token.strip_prefix("--") {
            self.long.get(&long.replace('-', "_")).copied()
        } else if let Some(short) = token.strip_prefix('-') {
            let mut chars = short.chars();
            match (chars.next(), chars.next()) {
                (Some(single), None) => self.short.get(&single).copied(),
                _ => None,
            }
        } else {
            None
        }
    }

    pub(crate) fn flags(&self) -> &[Flag] {
        &self.flags
    }

    pub(crate) fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.flags.iter().filter_map(|flag| match flag {
            Flag::Switch(switch) => Some(switch),
            Flag::Opt(_) => None,
        })
    }

    pub(crate) fn options(&self) -> impl Iterator<Item = &Opt> {
        self.flags.iter().filter_map(|flag| match flag {
            Flag::Switch(_) => None,
            Flag::Opt(option) => Some(option),
        })
    }

    pub(crate) fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    pub(crate) fn stdin(&self) -> Option<&Stdin> {
        self.stdin.as_ref()
    }
}

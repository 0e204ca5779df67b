use std::collections::VecDeque;
use thiserror::Error;

use crate::constant::*;
use crate::matcher::model::*;
use crate::matcher::registry::{Flag, Registry};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MatchError {
    #[error("missing value for option {0}")]
    MissingOptionValue(String),

    #[error("unknown switch {0}")]
    UnknownSwitch(String),

    #[error("mandatory options not specified: {}", .0.join(", "))]
    MandatoryOptionsNotSpecified(Vec<String>),

    #[error("mandatory argument '{0}' not given")]
    MandatoryArgumentNotSpecified(String),

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
}

fn is_flag_shaped(token: &str) -> bool {
    token != SEPARATOR && token.starts_with('-')
}

/// Matches a token vector against a registry, producing the raw value of every slot.
/// Nothing is cast here.
#[derive(Debug)]
pub(crate) struct TokenMatcher<'r> {
    registry: &'r Registry,
}

impl<'r> TokenMatcher<'r> {
    pub(crate) fn new(registry: &'r Registry) -> Self {
        Self { registry }
    }

    pub(crate) fn match_tokens(&self, tokens: &[&str]) -> Result<Matches, MatchError> {
        let mut queue: VecDeque<&str> = tokens.iter().copied().collect();
        let flags = self.match_flags(&mut queue)?;

        if queue.front() == Some(&SEPARATOR) {
            queue.pop_front();
        }

        let arguments = self.match_arguments(queue)?;
        Ok(Matches { flags, arguments })
    }

    fn match_flags(&self, queue: &mut VecDeque<&str>) -> Result<Vec<Option<RawValue>>, MatchError> {
        // 1. Repeatable options start out as empty sequences, everything else is unset.
        let mut slots: Vec<Option<RawValue>> = self
            .registry
            .flags()
            .iter()
            .map(|flag| match flag {
                Flag::Opt(option) if option.multiary => Some(RawValue::Multiple(Vec::default())),
                _ => None,
            })
            .collect();

        // 2. Consume switches and options up to the first positional token or separator.
        while queue.front().map_or(false, |token| is_flag_shaped(token)) {
            let token = queue
                .pop_front()
                .expect("internal error - front token must exist");
            let index = self
                .registry
                .find(token)
                .ok_or_else(|| MatchError::UnknownSwitch(token.to_string()))?;

            match &self.registry.flags()[index] {
                Flag::Switch(_) => {
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched switch '{token}'.");
                    }
                    slots[index].replace(RawValue::Switch(true));
                }
                Flag::Opt(option) => {
                    let value = queue
                        .pop_front()
                        .ok_or_else(|| MatchError::MissingOptionValue(option.flag()))?;
                    #[cfg(feature = "tracing_debug")]
                    {
                        debug!("Matched option '{}' from '{token}' with '{value}'.", option.name);
                    }

                    match slots[index].as_mut() {
                        Some(RawValue::Multiple(values)) => values.push(value.to_string()),
                        _ => {
                            slots[index].replace(RawValue::Single(value.to_string()));
                        }
                    }
                }
            }
        }

        // 3. Fill in defaults for anything not given.
        for (slot, flag) in slots.iter_mut().zip(self.registry.flags()) {
            if !RawValue::is_vacant(slot) {
                continue;
            }

            match flag {
                Flag::Switch(switch) => {
                    if let Some(state) = switch.default {
                        slot.replace(RawValue::Switch(state));
                    }
                }
                Flag::Opt(option) => {
                    if let Some(default) = &option.default {
                        slot.replace(RawValue::from_default(default, option.multiary));
                    }
                }
            }
        }

        // 4. Check every mandatory option got a value.
        let mut missing: Vec<String> = slots
            .iter()
            .zip(self.registry.flags())
            .filter_map(|(slot, flag)| match flag {
                Flag::Opt(option) if option.mandatory() && RawValue::is_vacant(slot) => {
                    Some(option.flag())
                }
                _ => None,
            })
            .collect();

        if !missing.is_empty() {
            missing.sort();
            return Err(MatchError::MandatoryOptionsNotSpecified(missing));
        }

        Ok(slots)
    }

    fn match_arguments(&self, mut queue: VecDeque<&str>) -> Result<Vec<Option<RawValue>>, MatchError> {
        let arguments = self.registry.arguments();
        let mut mandatory_after = arguments.iter().filter(|a| a.mandatory()).count();
        let mut slots = Vec::with_capacity(arguments.len());

        for argument in arguments {
            if argument.mandatory() {
                mandatory_after -= 1;
            }

            let slot = if argument.multiary {
                // Take everything the mandatory arguments after this one do not need.
                let mut take = queue.len().saturating_sub(mandatory_after);

                if take == 0 && argument.mandatory() && !queue.is_empty() {
                    take = 1;
                }

                if take > 0 {
                    let values: Vec<String> = queue.drain(..take).map(str::to_string).collect();
                    Some(RawValue::Multiple(values))
                } else if argument.mandatory() {
                    return Err(MatchError::MandatoryArgumentNotSpecified(argument.display()));
                } else {
                    match &argument.default {
                        Some(default) => Some(RawValue::from_default(default, true)),
                        None => Some(RawValue::Multiple(Vec::default())),
                    }
                }
            } else if argument.mandatory() {
                let value = queue
                    .pop_front()
                    .ok_or_else(|| MatchError::MandatoryArgumentNotSpecified(argument.display()))?;
                Some(RawValue::Single(value.to_string()))
            } else if queue.len() > mandatory_after {
                queue.pop_front().map(|value| RawValue::Single(value.to_string()))
            } else {
                argument
                    .default
                    .as_ref()
                    .map(|default| RawValue::from_default(default, false))
            };

            #[cfg(feature = "tracing_debug")]
            {
                debug!("Allocated argument '{}': {slot:?}.", argument.name);
            }

            slots.push(slot);
        }

        match queue.pop_front() {
            Some(token) => Err(MatchError::UnexpectedArgument(token.to_string())),
            None => Ok(slots),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Argument, Opt, Switch};
    use crate::matcher::registry::RegistryBuilder;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    fn single(value: &str) -> Option<RawValue> {
        Some(RawValue::Single(value.to_string()))
    }

    fn multiple(values: &[&str]) -> Option<RawValue> {
        Some(RawValue::Multiple(
            values.iter().map(|v| v.to_string()).collect(),
        ))
    }

    fn flags_registry() -> Registry {
        let mut builder = RegistryBuilder::default();
        builder
            .register_switch(Switch::new("debug").short('d'))
            .unwrap();
        builder
            .register_switch(Switch::new("colour").default_value(true))
            .unwrap();
        builder
            .register_option(Opt::new("size").short('s'))
            .unwrap();
        builder
            .register_option(Opt::new("group").default_value("red"))
            .unwrap();
        builder
            .register_option(Opt::new("tag").short('t').repeatable())
            .unwrap();
        builder
            .register_option(Opt::new("label").repeatable().default_values(["x", "y"]))
            .unwrap();
        builder.finalize()
    }

    #[test]
    fn flags_empty() {
        // Setup
        let registry = flags_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher.match_tokens(&[]).unwrap();

        // Verify
        assert_eq!(
            matches.flags,
            vec![
                None,
                Some(RawValue::Switch(true)),
                None,
                single("red"),
                multiple(&[]),
                multiple(&["x", "y"]),
            ]
        );
        assert_eq!(matches.arguments, vec![]);
    }

    #[test]
    fn flags_given() {
        // Setup
        let registry = flags_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher
            .match_tokens(&[
                "-d", "--size", "1", "-s", "2", "--group", "blue", "-t", "a", "--tag", "b",
                "--label", "z",
            ])
            .unwrap();

        // Verify
        assert_eq!(
            matches.flags,
            vec![
                Some(RawValue::Switch(true)),
                Some(RawValue::Switch(true)),
                single("2"),
                single("blue"),
                multiple(&["a", "b"]),
                multiple(&["z"]),
            ]
        );
    }

    #[test]
    fn option_value_is_verbatim() {
        // Setup
        let registry = flags_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher.match_tokens(&["--size", "--debug"]).unwrap();

        // Verify
        assert_eq!(matches.flags[0], None);
        assert_eq!(matches.flags[2], single("--debug"));
    }

    #[rstest]
    #[case(vec!["--size"], MatchError::MissingOptionValue("--size".to_string()))]
    #[case(vec!["-d", "-t"], MatchError::MissingOptionValue("--tag".to_string()))]
    #[case(vec!["--xxx"], MatchError::UnknownSwitch("--xxx".to_string()))]
    #[case(vec!["-x"], MatchError::UnknownSwitch("-x".to_string()))]
    #[case(vec!["-ds"], MatchError::UnknownSwitch("-ds".to_string()))]
    #[case(vec!["-"], MatchError::UnknownSwitch("-".to_string()))]
    #[case(vec!["abc"], MatchError::UnexpectedArgument("abc".to_string()))]
    #[case(vec!["--", "--debug"], MatchError::UnexpectedArgument("--debug".to_string()))]
    fn flags_invalid(#[case] tokens: Vec<&str>, #[case] expected: MatchError) {
        // Setup
        let registry = flags_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher.match_tokens(&tokens).unwrap_err();

        // Verify
        assert_eq!(error, expected);
    }

    #[test]
    fn mandatory_options() {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_option(Opt::new("weight").required())
            .unwrap();
        builder.register_option(Opt::new("size").required()).unwrap();
        builder
            .register_option(Opt::new("height").required().default_value("1"))
            .unwrap();
        builder
            .register_option(Opt::new("tag").required().repeatable())
            .unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher.match_tokens(&["--tag", "a"]).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "mandatory options not specified: --size, --weight"
        );
    }

    #[test]
    fn mandatory_repeatable_option() {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_option(Opt::new("tag").required().repeatable())
            .unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher.match_tokens(&[]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            MatchError::MandatoryOptionsNotSpecified(vec!["--tag".to_string()])
        );
    }

    // log, magick [word], string, limit (optional), code [generated], illegal_prime
    fn arguments_registry() -> Registry {
        let mut builder = RegistryBuilder::default();
        builder.register_argument(Argument::new("log")).unwrap();
        builder
            .register_argument(Argument::new("magick").default_value("word"))
            .unwrap();
        builder.register_argument(Argument::new("string")).unwrap();
        builder
            .register_argument(Argument::new("limit").optional())
            .unwrap();
        builder
            .register_argument(Argument::new("code").default_value("generated"))
            .unwrap();
        builder
            .register_argument(Argument::new("illegal_prime"))
            .unwrap();
        builder.finalize()
    }

    #[rstest]
    #[case(vec!["l", "s", "p"], vec![single("l"), single("word"), single("s"), None, single("generated"), single("p")])]
    #[case(vec!["l", "m", "s", "p"], vec![single("l"), single("m"), single("s"), None, single("generated"), single("p")])]
    #[case(vec!["l", "m", "s", "1", "p"], vec![single("l"), single("m"), single("s"), single("1"), single("generated"), single("p")])]
    #[case(vec!["l", "m", "s", "1", "c", "p"], vec![single("l"), single("m"), single("s"), single("1"), single("c"), single("p")])]
    fn arguments_allocation(#[case] tokens: Vec<&str>, #[case] expected: Vec<Option<RawValue>>) {
        // Setup
        let registry = arguments_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher.match_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(matches.arguments, expected);
    }

    #[rstest]
    #[case(vec![], "log")]
    #[case(vec!["l"], "string")]
    #[case(vec!["l", "s"], "illegal-prime")]
    fn arguments_mandatory_coverage(#[case] tokens: Vec<&str>, #[case] name: &str) {
        // Setup
        let registry = arguments_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher.match_tokens(&tokens).unwrap_err();

        // Verify
        assert_eq!(error, MatchError::MandatoryArgumentNotSpecified(name.to_string()));
    }

    #[test]
    fn arguments_excess() {
        // Setup
        let registry = arguments_registry();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher
            .match_tokens(&["l", "m", "s", "1", "c", "p", "extra"])
            .unwrap_err();

        // Verify
        assert_eq!(error.to_string(), "unexpected argument 'extra'");
    }

    #[rstest]
    #[case(vec![], vec![multiple(&["a", "b"])])]
    #[case(vec!["x"], vec![multiple(&["x"])])]
    #[case(vec!["x", "y", "z"], vec![multiple(&["x", "y", "z"])])]
    fn variadic_default(#[case] tokens: Vec<&str>, #[case] expected: Vec<Option<RawValue>>) {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_argument(Argument::new("files").variadic().default_values(["a", "b"]))
            .unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher.match_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(matches.arguments, expected);
    }

    #[rstest]
    #[case(vec!["l", "t"], vec![single("l"), multiple(&[]), single("t")])]
    #[case(vec!["l", "a", "t"], vec![single("l"), multiple(&["a"]), single("t")])]
    #[case(vec!["l", "a", "b", "c", "t"], vec![single("l"), multiple(&["a", "b", "c"]), single("t")])]
    fn variadic_middle(#[case] tokens: Vec<&str>, #[case] expected: Vec<Option<RawValue>>) {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder.register_argument(Argument::new("log")).unwrap();
        builder
            .register_argument(Argument::new("files").variadic().optional())
            .unwrap();
        builder.register_argument(Argument::new("target")).unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let matches = matcher.match_tokens(&tokens).unwrap();

        // Verify
        assert_eq!(matches.arguments, expected);
    }

    #[rstest]
    #[case(vec![], "files")]
    #[case(vec!["a"], "target")]
    fn variadic_mandatory(#[case] tokens: Vec<&str>, #[case] name: &str) {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_argument(Argument::new("files").variadic())
            .unwrap();
        builder.register_argument(Argument::new("target")).unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);

        // Execute
        let error = matcher.match_tokens(&tokens).unwrap_err();

        // Verify
        assert_eq!(error, MatchError::MandatoryArgumentNotSpecified(name.to_string()));
    }

    #[test]
    fn separator_law() {
        // Setup
        let mut builder = RegistryBuilder::default();
        builder
            .register_switch(Switch::new("debug").short('d'))
            .unwrap();
        builder
            .register_argument(Argument::new("rest").variadic().optional())
            .unwrap();
        let registry = builder.finalize();
        let matcher = TokenMatcher::new(&registry);
        let shapes = ["-d", "--debug", "--help", "-h", "--", "-", "--xxx", "plain"];

        for _ in 0..100 {
            let length = thread_rng().gen_range(0..6);
            let tail: Vec<&str> = (0..length)
                .map(|_| shapes[thread_rng().gen_range(0..shapes.len())])
                .collect();
            let mut tokens = vec!["-d", "--"];
            tokens.extend(tail.iter());

            // Execute
            let matches = matcher.match_tokens(&tokens).unwrap();

            // Verify
            assert_eq!(matches.flags, vec![Some(RawValue::Switch(true))]);
            assert_eq!(matches.arguments, vec![multiple(&tail)]);
        }
    }
}

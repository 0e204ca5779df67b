use crate::api::DefaultValue;

/// The un-cast value matched to a switch, option or argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawValue {
    Switch(bool),
    Single(String),
    Multiple(Vec<String>),
}

impl RawValue {
    /// Whether the value still needs a default (unset for a single value, empty for multiple values).
    pub(crate) fn is_vacant(value: &Option<RawValue>) -> bool {
        match value {
            None => true,
            Some(RawValue::Multiple(values)) => values.is_empty(),
            Some(_) => false,
        }
    }

    pub(crate) fn from_default(default: &DefaultValue, multiary: bool) -> Self {
        if multiary {
            RawValue::Multiple(default.values())
        } else {
            match default {
                DefaultValue::Single(value) => RawValue::Single(value.clone()),
                DefaultValue::Many(_) => {
                    unreachable!("internal error - multiple defaults on a single value")
                }
            }
        }
    }
}

/// The matching of tokens to declarations.
/// Slots are parallel to the registry's flags and arguments.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Matches {
    pub(crate) flags: Vec<Option<RawValue>>,
    pub(crate) arguments: Vec<Option<RawValue>>,
}

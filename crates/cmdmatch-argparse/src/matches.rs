//! The read-only result of one successful parse.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::definition::{Command, normalize_option_name};
use crate::value::Value;

/// One occurrence of an option in the token list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedOption {
    name: String,
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<Value>,
    occurrence: usize,
}

impl ParsedOption {
    pub(crate) fn new(name: &str, token: &str, value: Option<Value>, occurrence: usize) -> Self {
        Self {
            name: name.to_string(),
            token: token.to_string(),
            value,
            occurrence,
        }
    }

    /// Canonical option name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The token as it appeared in the input (`--all`, `-a11`, ...).
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    /// Number of earlier occurrences of the same option in this parse.
    pub fn occurrence(&self) -> usize {
        self.occurrence
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedArgument {
    name: String,
    position: usize,
    value: Value,
}

impl ParsedArgument {
    pub(crate) fn new(name: &str, position: usize, value: Value) -> Self {
        Self {
            name: name.to_string(),
            position,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// Options and arguments matched by [`Command::parse`].
///
/// Options are kept in input order; arguments in position order. Options may
/// be looked up by any spelling, with or without the leading minus characters.
#[derive(Debug, Clone)]
pub struct Matches<'c> {
    command: &'c Command,
    options: Vec<ParsedOption>,
    arguments: Vec<ParsedArgument>,
}

impl<'c> Matches<'c> {
    pub(crate) fn new(
        command: &'c Command,
        options: Vec<ParsedOption>,
        arguments: Vec<ParsedArgument>,
    ) -> Self {
        Self {
            command,
            options,
            arguments,
        }
    }

    fn canonical(&self, name: &str) -> Option<&'c str> {
        let command: &'c Command = self.command;
        command
            .canonical_option_name(name)
            .or_else(|| command.canonical_option_name(&normalize_option_name(name)))
    }

    fn occurrences<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s ParsedOption> + 's {
        let canonical = self.canonical(name);
        self.options
            .iter()
            .filter(move |o| canonical.is_some_and(|c| o.name == c))
    }

    pub fn option_exists(&self, name: &str) -> bool {
        self.occurrences(name).next().is_some()
    }

    /// Value of the first occurrence of the option.
    pub fn option_value(&self, name: &str) -> Option<&Value> {
        self.occurrences(name).find_map(ParsedOption::value)
    }

    pub fn option_occurrences(&self, name: &str) -> Vec<ParsedOption> {
        self.occurrences(name).cloned().collect()
    }

    /// Values of every occurrence, in input order.
    pub fn option_values(&self, name: &str) -> Vec<&Value> {
        self.occurrences(name).filter_map(ParsedOption::value).collect()
    }

    pub fn argument_value(&self, name: &str) -> Option<&Value> {
        self.arguments
            .iter()
            .find(|a| a.name == name)
            .map(ParsedArgument::value)
    }

    pub fn options(&self) -> &[ParsedOption] {
        &self.options
    }

    pub fn arguments(&self) -> &[ParsedArgument] {
        &self.arguments
    }

    pub fn command(&self) -> &'c Command {
        self.command
    }

    pub fn command_name(&self) -> &str {
        self.command.name()
    }
}

impl PartialEq for Matches<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.command.name() == other.command.name()
            && self.options == other.options
            && self.arguments == other.arguments
    }
}

impl Serialize for Matches<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Matches", 3)?;
        state.serialize_field("command", self.command.name())?;
        state.serialize_field("options", &self.options)?;
        state.serialize_field("arguments", &self.arguments)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::{ArgumentDef, OptionDef, ValueSpec};
    use crate::value::ValueType;

    fn command() -> Command {
        Command::builder("cmd")
            .option(
                OptionDef::new("a")
                    .alternative("all")
                    .value(ValueSpec::new(ValueType::Integer)),
            )
            .option(
                OptionDef::new("D")
                    .multiple()
                    .value(ValueSpec::new(ValueType::String)),
            )
            .option(OptionDef::new("c"))
            .argument(ArgumentDef::new("PID", ValueType::Integer))
            .build()
            .unwrap()
    }

    #[test]
    fn lookup_by_any_spelling() {
        let cmd = command();
        let m = cmd.parse(&["--all", "5", "100"]).unwrap();
        for name in ["-a", "a", "--all", "all"] {
            assert!(m.option_exists(name), "{name}");
            assert_eq!(m.option_value(name), Some(&Value::Integer(5)));
        }
        assert!(!m.option_exists("-c"));
        assert!(!m.option_exists("-z"));
        assert_eq!(m.option_value("-c"), None);
        assert_eq!(m.argument_value("PID"), Some(&Value::Integer(100)));
        assert_eq!(m.argument_value("NOPE"), None);
    }

    #[test]
    fn multiple_values_in_input_order() {
        let cmd = command();
        let m = cmd.parse(&["-Dx=1", "100", "-D", "y=2"]).unwrap();
        assert_eq!(m.option_value("-D"), Some(&Value::from("x=1")));
        assert_eq!(
            m.option_values("D"),
            vec![&Value::from("x=1"), &Value::from("y=2")]
        );
        let occurrences = m.option_occurrences("-D");
        assert_eq!(occurrences.len(), 2);
        assert_eq!(occurrences[1].token(), "-D");
        assert_eq!(occurrences[1].occurrence(), 1);
    }

    #[test]
    fn serializes_command_options_and_arguments() {
        let cmd = command();
        let m = cmd.parse(&["-c", "100"]).unwrap();
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "command": "cmd",
                "options": [{ "name": "-c", "token": "-c", "occurrence": 0 }],
                "arguments": [{ "name": "PID", "position": 0, "value": 100 }],
            })
        );
    }
}

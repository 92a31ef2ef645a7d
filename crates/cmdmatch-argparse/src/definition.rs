//! Option and argument definitions.
//!
//! Definitions are assembled with small builders and frozen into a [`Command`]
//! by [`CommandBuilder::build`], which is also where every registration rule is
//! enforced. A built `Command` is never mutated again, so it can be shared by
//! any number of concurrent parses.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::IndexMap;

use crate::constraint::Constraint;
use crate::driver;
use crate::error::{ConfigError, ConfigResult, Element, ParseError, ParseResult};
use crate::matches::Matches;
use crate::value::{Value, ValueType};

/// Type, default and constraint chain of an option value or argument.
#[derive(Debug, Clone)]
pub struct ValueSpec {
    value_type: ValueType,
    default: Option<Value>,
    value_name: Option<String>,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl ValueSpec {
    pub fn new(value_type: ValueType) -> Self {
        Self {
            value_type,
            default: None,
            value_name: None,
            constraints: Vec::new(),
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Placeholder shown in help output (e.g. `<FILE>`).
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = Some(name.into());
        self
    }

    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(Arc::new(constraint));
        self
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn placeholder(&self) -> Option<&str> {
        self.value_name.as_deref()
    }

    pub fn constraints(&self) -> impl Iterator<Item = &dyn Constraint> {
        self.constraints.iter().map(|c| c.as_ref())
    }

    /// Convert `raw` and run the constraint chain.
    pub(crate) fn evaluate(&self, raw: &str, element: impl Fn() -> Element) -> ParseResult<Value> {
        let value = self
            .value_type
            .convert(raw)
            .map_err(|e| ParseError::InvalidValue {
                element: element(),
                raw: e.raw,
                value_type: e.value_type,
            })?;
        self.check(&value, element)?;
        Ok(value)
    }

    pub(crate) fn check(&self, value: &Value, element: impl Fn() -> Element) -> ParseResult<()> {
        for constraint in &self.constraints {
            constraint
                .check(value)
                .map_err(|failure| ParseError::ConstraintFailure {
                    element: element(),
                    failure,
                })?;
        }
        Ok(())
    }

    fn validate_default(&self, element: impl Fn() -> Element) -> ConfigResult<()> {
        match &self.default {
            Some(value) if value.value_type() != self.value_type => {
                Err(ConfigError::DefaultTypeMismatch {
                    element: element(),
                    value: value.to_string(),
                    expected: self.value_type,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Normalize `a` to `-a` and `all` to `--all`; names already carrying minus
/// characters are kept as written.
pub(crate) fn normalize_option_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('-') {
        trimmed.to_string()
    } else if trimmed.chars().count() == 1 {
        format!("-{trimmed}")
    } else {
        format!("--{trimmed}")
    }
}

/// `-x` or `--xy[-_alnum]*` where `x` is alphabetic.
fn is_valid_option_name(name: &str) -> bool {
    if let Some(long) = name.strip_prefix("--") {
        let mut chars = long.chars();
        let Some(first) = chars.next() else {
            return false;
        };
        let rest: Vec<char> = chars.collect();
        first.is_alphabetic()
            && !rest.is_empty()
            && rest
                .iter()
                .all(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
    } else if let Some(short) = name.strip_prefix('-') {
        let mut chars = short.chars();
        matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
    } else {
        false
    }
}

#[derive(Debug, Clone)]
pub struct OptionDef {
    name: String,
    alternatives: Vec<String>,
    help: String,
    multiple: bool,
    value: Option<ValueSpec>,
}

impl OptionDef {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: normalize_option_name(name.as_ref()),
            alternatives: Vec::new(),
            help: String::new(),
            multiple: false,
            value: None,
        }
    }

    pub fn alternative(mut self, alternative: impl AsRef<str>) -> Self {
        self.alternatives
            .push(normalize_option_name(alternative.as_ref()));
        self
    }

    pub fn alternatives<I, S>(mut self, alternatives: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.alternatives.extend(
            alternatives
                .into_iter()
                .map(|a| normalize_option_name(a.as_ref())),
        );
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Allow the option to occur more than once.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Attach a typed value to the option.
    pub fn value(mut self, spec: ValueSpec) -> Self {
        self.value = Some(spec);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alternative_names(&self) -> &[String] {
        &self.alternatives
    }

    /// Canonical name followed by every alternative.
    pub fn spellings(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.alternatives.iter().map(String::as_str))
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    pub fn value_spec(&self) -> Option<&ValueSpec> {
        self.value.as_ref()
    }

    pub(crate) fn element(&self) -> Element {
        Element::Option(self.name.clone())
    }
}

#[derive(Debug, Clone)]
pub struct ArgumentDef {
    name: String,
    help: String,
    value: ValueSpec,
    optional: bool,
    position: usize,
}

impl ArgumentDef {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            value: ValueSpec::new(value_type),
            optional: false,
            position: 0,
        }
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the argument optional and use `value` when it is not supplied.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.optional = true;
        self.value = self.value.default_value(value);
        self
    }

    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value = self.value.value_name(name);
        self
    }

    pub fn constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.value = self.value.constraint(constraint);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn help_text(&self) -> &str {
        &self.help
    }

    pub fn value_spec(&self) -> &ValueSpec {
        &self.value
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Zero-based registration order.
    pub fn position(&self) -> usize {
        self.position
    }

    pub(crate) fn element(&self) -> Element {
        Element::Argument(self.name.clone())
    }
}

/// A finalized set of option and argument definitions.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    alternatives: Vec<String>,
    summary: String,
    description: String,
    options: IndexMap<String, OptionDef>,
    // Every spelling (canonical or alternative) to its canonical name.
    spellings: HashMap<String, String>,
    arguments: Vec<ArgumentDef>,
}

impl Command {
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder::new(name)
    }

    /// Match `tokens` against this command.
    ///
    /// The returned [`Matches`] borrows the definitions; nothing from the parse
    /// is retained by the command.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<Matches<'_>> {
        driver::run(self, None, tokens)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alternatives(&self) -> &[String] {
        &self.alternatives
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.options.values()
    }

    /// Look up an option by any of its spellings.
    pub fn option(&self, spelling: &str) -> Option<&OptionDef> {
        self.canonical_option_name(spelling)
            .and_then(|canonical| self.options.get(canonical))
    }

    pub fn canonical_option_name(&self, spelling: &str) -> Option<&str> {
        self.spellings.get(spelling).map(String::as_str)
    }

    /// Arguments in position order.
    pub fn arguments(&self) -> &[ArgumentDef] {
        &self.arguments
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDef> {
        self.arguments.iter().find(|a| a.name == name)
    }

    pub fn mandatory_count(&self) -> usize {
        self.arguments.iter().filter(|a| !a.optional).count()
    }

    pub fn optional_count(&self) -> usize {
        self.arguments.iter().filter(|a| a.optional).count()
    }

    /// Resolve a token to an option definition.
    ///
    /// An exact spelling wins. Otherwise the longest spelling of a
    /// value-carrying option that prefixes the token matches, and the rest of
    /// the token is returned as the combined value text (`-a11`, `--level=5`).
    pub(crate) fn resolve_option<'t>(&self, token: &'t str) -> Option<(&OptionDef, Option<&'t str>)> {
        if let Some(def) = self.option(token) {
            return Some((def, None));
        }

        let (spelling, canonical) = self
            .spellings
            .iter()
            .filter(|(spelling, _)| token.len() > spelling.len() && token.starts_with(spelling.as_str()))
            .filter(|(_, canonical)| {
                self.options
                    .get(canonical.as_str())
                    .is_some_and(|d| d.value.is_some())
            })
            .max_by_key(|(spelling, _)| spelling.len())?;

        let def = self.options.get(canonical.as_str())?;
        let mut rest = &token[spelling.len()..];
        if spelling.starts_with("--") {
            rest = rest.strip_prefix('=').unwrap_or(rest);
        }
        Some((def, Some(rest)))
    }
}

#[derive(Debug, Clone)]
pub struct CommandBuilder {
    name: String,
    alternatives: Vec<String>,
    summary: String,
    description: String,
    options: Vec<OptionDef>,
    arguments: Vec<ArgumentDef>,
    require_defaults: bool,
}

impl CommandBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alternatives: Vec::new(),
            summary: String::new(),
            description: String::new(),
            options: Vec::new(),
            arguments: Vec::new(),
            require_defaults: true,
        }
    }

    /// Another name the command can be invoked by (see [`crate::CommandSet`]).
    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    pub fn argument(mut self, argument: ArgumentDef) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Whether optional arguments must carry a default value (on by default).
    pub fn require_defaults(mut self, require: bool) -> Self {
        self.require_defaults = require;
        self
    }

    /// Validate every definition in registration order and freeze the command.
    pub fn build(self) -> ConfigResult<Command> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyName("command"));
        }

        let mut options: IndexMap<String, OptionDef> = IndexMap::new();
        let mut spellings: HashMap<String, String> = HashMap::new();
        for option in self.options {
            if option.name.is_empty() {
                return Err(ConfigError::EmptyName("option"));
            }
            if options.contains_key(&option.name) {
                return Err(ConfigError::DuplicateOptionName {
                    name: option.name.clone(),
                    first: option.name.clone(),
                    second: option.name.clone(),
                });
            }
            for spelling in option.spellings() {
                if !is_valid_option_name(spelling) {
                    return Err(ConfigError::InvalidOptionName(spelling.to_string()));
                }
                if let Some(prev) = spellings.insert(spelling.to_string(), option.name.clone()) {
                    if prev != option.name {
                        return Err(ConfigError::DuplicateOptionName {
                            name: spelling.to_string(),
                            first: prev,
                            second: option.name.clone(),
                        });
                    }
                }
            }
            if let Some(spec) = &option.value {
                spec.validate_default(|| option.element())?;
            }
            options.insert(option.name.clone(), option);
        }

        let mut arguments: Vec<ArgumentDef> = Vec::with_capacity(self.arguments.len());
        let mut names: HashSet<String> = HashSet::new();
        let mut optional_seen = 0usize;
        let mut mandatory_after_optional = false;
        for (position, mut argument) in self.arguments.into_iter().enumerate() {
            argument.name = argument.name.trim().to_string();
            if argument.name.is_empty() {
                return Err(ConfigError::EmptyName("argument"));
            }
            if !names.insert(argument.name.clone()) {
                return Err(ConfigError::DuplicateArgument(argument.name));
            }
            argument.value.validate_default(|| argument.element())?;

            if argument.optional {
                if self.require_defaults && argument.value.default.is_none() {
                    return Err(ConfigError::MissingDefault(argument.name));
                }
                optional_seen += 1;
                if optional_seen >= 2 && mandatory_after_optional {
                    return Err(ConfigError::MisplacedOptionalArgument(argument.name));
                }
            } else {
                if optional_seen >= 2 {
                    return Err(ConfigError::MisplacedOptionalArgument(argument.name));
                }
                if optional_seen == 1 {
                    mandatory_after_optional = true;
                }
            }

            argument.position = position;
            arguments.push(argument);
        }

        Ok(Command {
            name,
            alternatives: self.alternatives,
            summary: self.summary,
            description: self.description,
            options,
            spellings,
            arguments,
        })
    }
}

//! Selecting one command out of several by the first token.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::definition::Command;
use crate::driver;
use crate::error::{ConfigError, ConfigResult, ParseError, ParseResult};
use crate::matches::Matches;

/// A named group of commands, e.g. `git` with `pull` and `push`.
#[derive(Debug, Clone)]
pub struct CommandSet {
    name: String,
    commands: Vec<Command>,
}

impl CommandSet {
    /// Group `commands`, rejecting duplicate names and ambiguous aliases.
    pub fn new(name: impl Into<String>, commands: Vec<Command>) -> ConfigResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ConfigError::EmptyName("command set"));
        }

        let mut names: HashSet<&str> = HashSet::new();
        for command in &commands {
            if !names.insert(command.name()) {
                return Err(ConfigError::DuplicateCommandName(command.name().to_string()));
            }
        }

        let mut aliases: HashMap<&str, &str> = HashMap::new();
        for command in &commands {
            for alias in command.alternatives() {
                let alias = alias.trim();
                if alias.is_empty() || alias == command.name() {
                    continue;
                }
                if names.contains(alias) {
                    return Err(ConfigError::AliasConflict {
                        alias: alias.to_string(),
                        first: alias.to_string(),
                        second: command.name().to_string(),
                    });
                }
                if let Some(prev) = aliases.insert(alias, command.name()) {
                    if prev != command.name() {
                        return Err(ConfigError::AliasConflict {
                            alias: alias.to_string(),
                            first: prev.to_string(),
                            second: command.name().to_string(),
                        });
                    }
                }
            }
        }

        Ok(Self { name, commands })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Find a command by its name or one of its alternatives.
    pub fn resolve(&self, raw: &str) -> Option<&Command> {
        self.commands
            .iter()
            .find(|c| c.name() == raw)
            .or_else(|| {
                self.commands
                    .iter()
                    .find(|c| c.alternatives().iter().any(|a| a.trim() == raw))
            })
    }

    /// Select a command with the first token and parse the rest against it.
    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<Matches<'_>> {
        let Some((first, rest)) = tokens.split_first() else {
            return Err(ParseError::MissingCommand);
        };
        let raw = first.as_ref();
        let command = self.resolve(raw).ok_or_else(|| ParseError::UnknownCommand {
            name: raw.to_string(),
        })?;
        debug!(set = self.name(), command = command.name(), "dispatching");
        driver::run(command, Some(command.name()), rest)
    }
}

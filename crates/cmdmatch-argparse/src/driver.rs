//! The parse state machine.
//!
//! ```text
//! ScanningOptions --(non-option token / end of input)--> ArgumentsLocked
//! ```
//!
//! Options are accepted in both states. The positional matcher runs exactly
//! once, on the first token that does not resolve to an option (or on the
//! empty cursor if there is none); after that any non-empty token that does
//! not resolve is misplaced. Empty tokens after the run are skipped.

use tracing::debug;

use crate::cursor::TokenCursor;
use crate::definition::Command;
use crate::error::{ParseError, ParseResult};
use crate::matches::{Matches, ParsedArgument};
use crate::option::{self, OptionGuard};
use crate::positional;

#[derive(Debug)]
enum State {
    ScanningOptions,
    ArgumentsLocked(Vec<ParsedArgument>),
}

/// Match `tokens` against `command`.
///
/// `label` is the command name shown in argument-count errors when the
/// command was selected from a [`crate::CommandSet`].
pub(crate) fn run<'c, S: AsRef<str>>(
    command: &'c Command,
    label: Option<&str>,
    tokens: &[S],
) -> ParseResult<Matches<'c>> {
    let mut cursor = TokenCursor::new(tokens);
    let mut guard = OptionGuard::default();
    let mut options = Vec::new();
    let mut state = State::ScanningOptions;

    while let Some(token) = cursor.peek() {
        if let Some(parsed) = option::match_one(command, &mut cursor, &mut guard)? {
            options.push(parsed);
            continue;
        }
        match state {
            State::ScanningOptions => {
                let arguments = positional::match_run(label, &mut cursor, command.arguments())?;
                state = State::ArgumentsLocked(arguments);
            }
            State::ArgumentsLocked(_) if token.is_empty() => cursor.advance(),
            State::ArgumentsLocked(_) => {
                return Err(ParseError::MisplacedToken {
                    command: label.map(str::to_string),
                    token: token.to_string(),
                });
            }
        }
    }

    let arguments = match state {
        State::ScanningOptions => positional::match_run(label, &mut cursor, command.arguments())?,
        State::ArgumentsLocked(arguments) => arguments,
    };

    debug!(
        command = command.name(),
        options = options.len(),
        arguments = arguments.len(),
        "parse complete"
    );
    Ok(Matches::new(command, options, arguments))
}

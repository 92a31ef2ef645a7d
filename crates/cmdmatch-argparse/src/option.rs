//! Matching of a single option occurrence at the head of the cursor.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::cursor::{TokenCursor, looks_like_option};
use crate::definition::{Command, OptionDef, ValueSpec};
use crate::error::{ParseError, ParseResult};
use crate::matches::ParsedOption;
use crate::value::Value;

/// Per-parse bookkeeping of matched options.
///
/// Rejects a second occurrence of a non-multiple option and numbers the
/// occurrences of every option.
#[derive(Debug, Default)]
pub(crate) struct OptionGuard<'c> {
    seen: HashSet<&'c str>,
    counts: HashMap<&'c str, usize>,
}

impl<'c> OptionGuard<'c> {
    fn check(&self, def: &OptionDef) -> ParseResult<()> {
        if !def.is_multiple() && self.seen.contains(def.name()) {
            return Err(ParseError::DuplicateOption {
                option: def.name().to_string(),
            });
        }
        Ok(())
    }

    /// Record an occurrence and return its zero-based index.
    fn record(&mut self, def: &'c OptionDef) -> usize {
        if !def.is_multiple() {
            self.seen.insert(def.name());
        }
        let count = self.counts.entry(def.name()).or_default();
        let occurrence = *count;
        *count += 1;
        occurrence
    }
}

/// Try to match the head token as an option.
///
/// Returns `Ok(None)` without touching the cursor when the head token does
/// not resolve to a defined option.
pub(crate) fn match_one<'c>(
    command: &'c Command,
    cursor: &mut TokenCursor<'_>,
    guard: &mut OptionGuard<'c>,
) -> ParseResult<Option<ParsedOption>> {
    let Some(token) = cursor.peek() else {
        return Ok(None);
    };
    let Some((def, combined)) = command.resolve_option(token) else {
        return Ok(None);
    };

    guard.check(def)?;
    cursor.advance();

    let value = match def.value_spec() {
        Some(spec) => Some(match_value(def, spec, combined, cursor)?),
        None => None,
    };
    let occurrence = guard.record(def);
    trace!(token, option = def.name(), occurrence, "matched option");

    Ok(Some(ParsedOption::new(
        def.name(),
        token,
        value,
        occurrence,
    )))
}

fn match_value(
    def: &OptionDef,
    spec: &ValueSpec,
    combined: Option<&str>,
    cursor: &mut TokenCursor<'_>,
) -> ParseResult<Value> {
    if let Some(raw) = combined.filter(|raw| !raw.is_empty()) {
        return spec.evaluate(raw, || def.element());
    }

    // Without a default the next token is the value, whatever it looks like.
    // With one, an option-looking token is left alone and the default applies.
    match (cursor.peek(), spec.default()) {
        (Some(raw), None) => {
            cursor.advance();
            spec.evaluate(raw, || def.element())
        }
        (Some(raw), Some(_)) if !looks_like_option(raw) => {
            cursor.advance();
            spec.evaluate(raw, || def.element())
        }
        (_, Some(default)) => {
            spec.check(default, || def.element())?;
            Ok(default.clone())
        }
        (None, None) => Err(ParseError::MissingValue {
            option: def.name().to_string(),
        }),
    }
}

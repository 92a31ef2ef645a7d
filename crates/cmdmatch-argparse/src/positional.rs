//! Matching of the single run of positional arguments.

use tracing::debug;

use crate::cursor::TokenCursor;
use crate::definition::ArgumentDef;
use crate::error::{ParseError, ParseResult};
use crate::matches::ParsedArgument;

/// Consume the positional run at the head of the cursor.
///
/// Called at most once per parse. Optional arguments that receive no token
/// are filled with their defaults: with a single optional argument the
/// earliest definitions take the supplied tokens, with several (trailing)
/// optional arguments the rightmost ones default first.
pub(crate) fn match_run(
    label: Option<&str>,
    cursor: &mut TokenCursor<'_>,
    definitions: &[ArgumentDef],
) -> ParseResult<Vec<ParsedArgument>> {
    let optional_count = definitions.iter().filter(|d| d.is_optional()).count();
    let mandatory_count = definitions.len() - optional_count;
    let max_count = definitions.len();
    let available = cursor.run_length();

    if available < mandatory_count {
        return Err(ParseError::TooFewArguments {
            command: label.map(str::to_string),
            expected: mandatory_count,
            actual: available,
            interrupted: cursor.remaining() > available,
        });
    }
    if available > max_count {
        return Err(ParseError::TooManyArguments {
            command: label.map(str::to_string),
            expected: max_count,
            actual: available,
        });
    }

    let mut left = available;
    let mut parsed = Vec::with_capacity(definitions.len());
    for (idx, def) in definitions.iter().enumerate() {
        let spec = def.value_spec();
        let fill_default = def.is_optional()
            && available < max_count
            && if optional_count == 1 {
                idx + 1 < definitions.len() || left == 0
            } else {
                left == 0
            };

        let value = if fill_default {
            let Some(default) = spec.default() else {
                continue;
            };
            spec.check(default, || def.element())?;
            default.clone()
        } else {
            let raw = cursor
                .next()
                .filter(|_| left > 0)
                .ok_or_else(|| ParseError::TooFewArguments {
                    command: label.map(str::to_string),
                    expected: mandatory_count,
                    actual: available,
                    interrupted: false,
                })?;
            left -= 1;
            spec.evaluate(raw, || def.element())?
        };

        parsed.push(ParsedArgument::new(def.name(), def.position(), value));
    }

    debug!(
        supplied = available,
        matched = parsed.len(),
        "matched positional arguments"
    );
    Ok(parsed)
}

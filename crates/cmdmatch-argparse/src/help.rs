//! Help text rendering for commands and command sets.

use crate::definition::{ArgumentDef, Command, OptionDef, ValueSpec};
use crate::dispatch::CommandSet;

/// Line width used when the caller has no terminal width at hand.
pub const DEFAULT_WIDTH: usize = 80;

/// Word-wrap `text` for a column layout.
///
/// The first line is assumed to start at `first_column`; continuation lines
/// are indented to `rest_column`. Words longer than a line are split.
pub fn wrap(text: &str, first_column: usize, rest_column: usize, width: usize) -> String {
    let first_limit = width.saturating_sub(first_column).max(1);
    let rest_limit = width.saturating_sub(rest_column).max(1);

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        loop {
            let limit = if lines.is_empty() { first_limit } else { rest_limit };
            let needed = if current_len == 0 {
                word.len()
            } else {
                current_len + 1 + word.len()
            };
            if needed <= limit {
                if current_len > 0 {
                    current.push(' ');
                    current_len += 1;
                }
                current.extend(word.iter());
                current_len += word.len();
                break;
            }
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
                continue;
            }
            let rest = word.split_off(limit);
            lines.push(word.into_iter().collect());
            word = rest;
        }
    }
    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }

    lines.join(&format!("\n{}", " ".repeat(rest_column)))
}

fn placeholder(spec: &ValueSpec, fallback: &str) -> String {
    spec.placeholder().unwrap_or(fallback).to_string()
}

fn annotations(spec: &ValueSpec) -> Vec<String> {
    let mut out: Vec<String> = spec.constraints().map(|c| format!("[{}]", c.describe())).collect();
    if let Some(default) = spec.default() {
        out.insert(0, format!("[default: {default}]"));
    }
    out
}

fn join_help(help: &str, notes: Vec<String>) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !help.trim().is_empty() {
        parts.push(help.trim().to_string());
    }
    parts.extend(notes);
    parts.join(" ")
}

fn argument_left(def: &ArgumentDef) -> String {
    let name = placeholder(def.value_spec(), def.name());
    if def.is_optional() {
        format!("[{name}]")
    } else {
        format!("<{name}>")
    }
}

fn argument_help(def: &ArgumentDef) -> String {
    join_help(def.help_text(), annotations(def.value_spec()))
}

fn option_left(def: &OptionDef) -> String {
    let mut out = def.spellings().collect::<Vec<_>>().join(", ");
    if let Some(spec) = def.value_spec() {
        out.push_str(&format!(" <{}>", placeholder(spec, "VALUE")));
    }
    out
}

fn option_help(def: &OptionDef) -> String {
    let mut notes = def.value_spec().map(annotations).unwrap_or_default();
    if def.is_multiple() {
        notes.push("[multiple]".to_string());
    }
    join_help(def.help_text(), notes)
}

fn push_table(out: &mut String, title: &str, rows: Vec<(String, String)>, width: usize) {
    if rows.is_empty() {
        return;
    }
    out.push_str(&format!("\n{title}:\n"));
    let left_width = rows.iter().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let help_column = 2 + left_width + 2;
    for (left, help) in rows {
        if help.is_empty() {
            out.push_str(&format!("  {left}\n"));
        } else {
            let help = wrap(&help, help_column, help_column, width);
            out.push_str(&format!("  {left:left_width$}  {help}\n"));
        }
    }
}

fn usage(command: &Command) -> String {
    let mut parts = vec![command.name().to_string()];
    if command.options().next().is_some() {
        parts.push("[OPTIONS]".to_string());
    }
    parts.extend(command.arguments().iter().map(argument_left));
    parts.join(" ")
}

fn header(out: &mut String, name: &str, summary: &str) {
    if summary.trim().is_empty() {
        out.push_str(name);
        out.push('\n');
    } else {
        out.push_str(&format!("{name} - {}\n", summary.trim()));
    }
}

/// Render the help message of a single command.
pub fn render(command: &Command, width: usize) -> String {
    let mut out = String::new();
    header(&mut out, command.name(), command.summary());

    let usage_line = usage(command);
    out.push_str(&format!("\nUsage: {}\n", wrap(&usage_line, 7, 7, width)));

    if !command.description().trim().is_empty() {
        out.push('\n');
        out.push_str(&wrap(command.description().trim(), 0, 0, width));
        out.push('\n');
    }

    let arguments = command
        .arguments()
        .iter()
        .map(|d| (argument_left(d), argument_help(d)))
        .collect();
    push_table(&mut out, "Arguments", arguments, width);

    let options = command
        .options()
        .map(|d| (option_left(d), option_help(d)))
        .collect();
    push_table(&mut out, "Options", options, width);

    out
}

/// Render the overview of a command set: one row per command.
pub fn render_set(set: &CommandSet, width: usize) -> String {
    let mut out = String::new();
    header(&mut out, set.name(), "");
    out.push_str(&format!("\nUsage: {} <COMMAND> [ARGS]...\n", set.name()));

    let commands = set
        .commands()
        .iter()
        .map(|c| {
            let mut left = c.name().to_string();
            if !c.alternatives().is_empty() {
                left.push_str(&format!(" ({})", c.alternatives().join(", ")));
            }
            (left, c.summary().trim().to_string())
        })
        .collect();
    push_table(&mut out, "Commands", commands, width);

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Enumeration;
    use crate::value::ValueType;

    #[test]
    fn wrap_breaks_on_whitespace_and_indents() {
        assert_eq!(wrap("aaa bbb ccc", 0, 2, 7), "aaa bbb\n  ccc");
        assert_eq!(wrap("", 4, 4, 10), "");
    }

    #[test]
    fn wrap_splits_long_words() {
        assert_eq!(wrap("abcdefghij", 0, 0, 4), "abcd\nefgh\nij");
        assert_eq!(wrap("x abcdef", 2, 2, 6), "x\n  abcd\n  ef");
    }

    #[test]
    fn wrap_never_panics_on_narrow_width() {
        assert_eq!(wrap("ab", 10, 10, 5), "a\n          b");
    }

    #[test]
    fn renders_usage_and_tables() {
        let cmd = Command::builder("pull")
            .summary("Pull things")
            .option(
                OptionDef::new("a")
                    .alternative("all")
                    .help("Everything")
                    .value(ValueSpec::new(ValueType::Integer).default_value(-11)),
            )
            .option(OptionDef::new("v").multiple())
            .argument(ArgumentDef::new("PID", ValueType::Integer).help("Process"))
            .argument(
                ArgumentDef::new("MODE", ValueType::String)
                    .default_value("fast")
                    .constraint(Enumeration::new(["fast", "slow"])),
            )
            .build()
            .unwrap();

        let help = render(&cmd, DEFAULT_WIDTH);
        let expected = "\
pull - Pull things

Usage: pull [OPTIONS] <PID> [MODE]

Arguments:
  <PID>   Process
  [MODE]  [default: fast] [possible values: fast, slow]

Options:
  -a, --all <VALUE>  Everything [default: -11]
  -v                 [multiple]
";
        assert_eq!(help, expected);
    }
}

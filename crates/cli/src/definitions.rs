//! Turning a loaded [`Schema`] into matcher definitions.

use anyhow::{Context, Result, bail};
use cmdmatch_argparse::{
    ArgumentDef, Command, CommandSet, Enumeration, Length, Matches, MaxLength, MaxValue,
    MinLength, MinValue, OptionDef, ParseResult, Value, ValueSpec, ValueType, help,
};

use crate::schema::{
    ArgumentSchema, CommandSchema, ConstraintSchema, OptionSchema, Schema, ValueSchema,
};

/// A single command, or a set of commands selected by the first token.
#[derive(Debug)]
pub enum Definitions {
    Single(Command),
    Set(CommandSet),
}

impl Definitions {
    pub fn from_schema(schema: &Schema) -> Result<Self> {
        let require_defaults = schema.require_defaults.unwrap_or(true);
        if schema.commands.is_empty() {
            return Ok(Self::Single(build_command(&schema.root, require_defaults)?));
        }

        let commands = schema
            .commands
            .iter()
            .map(|c| build_command(c, require_defaults))
            .collect::<Result<Vec<_>>>()?;
        let set = CommandSet::new(schema.root.name.as_str(), commands)
            .with_context(|| format!("invalid command set '{}'", schema.root.name))?;
        Ok(Self::Set(set))
    }

    pub fn commands(&self) -> Vec<&Command> {
        match self {
            Self::Single(command) => vec![command],
            Self::Set(set) => set.commands().iter().collect(),
        }
    }

    pub fn parse<S: AsRef<str>>(&self, tokens: &[S]) -> ParseResult<Matches<'_>> {
        match self {
            Self::Single(command) => command.parse(tokens),
            Self::Set(set) => set.parse(tokens),
        }
    }

    /// Help for the whole schema, or for one command of a set.
    pub fn help(&self, command: Option<&str>, width: usize) -> Result<String> {
        match (self, command) {
            (Self::Single(single), None) => Ok(help::render(single, width)),
            (Self::Single(single), Some(name)) if name == single.name() => {
                Ok(help::render(single, width))
            }
            (Self::Single(single), Some(name)) => {
                bail!("'{name}' is not defined; the schema describes only '{}'", single.name())
            }
            (Self::Set(set), None) => Ok(help::render_set(set, width)),
            (Self::Set(set), Some(name)) => match set.resolve(name) {
                Some(command) => Ok(help::render(command, width)),
                None => bail!("Command '{name}' was not found."),
            },
        }
    }
}

fn build_command(schema: &CommandSchema, require_defaults: bool) -> Result<Command> {
    let mut builder = Command::builder(schema.name.as_str())
        .summary(schema.summary.as_str())
        .description(schema.description.as_str())
        .require_defaults(require_defaults);
    for alternative in &schema.alternatives {
        builder = builder.alternative(alternative.as_str());
    }
    for option in &schema.options {
        builder = builder.option(
            build_option(option)
                .with_context(|| format!("invalid option '{}' of '{}'", option.name, schema.name))?,
        );
    }
    for argument in &schema.arguments {
        builder = builder.argument(
            build_argument(argument).with_context(|| {
                format!("invalid argument '{}' of '{}'", argument.name, schema.name)
            })?,
        );
    }
    builder
        .build()
        .with_context(|| format!("invalid command '{}'", schema.name))
}

fn build_option(schema: &OptionSchema) -> Result<OptionDef> {
    let mut def = OptionDef::new(&schema.name)
        .alternatives(&schema.alternatives)
        .help(schema.help.as_str());
    if schema.multiple {
        def = def.multiple();
    }
    if let Some(value) = &schema.value {
        def = def.value(build_value(value)?);
    }
    Ok(def)
}

fn build_argument(schema: &ArgumentSchema) -> Result<ArgumentDef> {
    let value_type: ValueType = schema.value.value_type.parse()?;
    let mut def = ArgumentDef::new(schema.name.as_str(), value_type).help(schema.help.as_str());
    if schema.optional {
        def = def.optional();
    }
    if let Some(default) = &schema.value.default {
        def = def.default_value(typed(default, value_type).context("invalid default value")?);
    }
    if let Some(name) = &schema.value.value_name {
        def = def.value_name(name.as_str());
    }
    if let Some(constraints) = &schema.value.constraints {
        for check in checks(constraints, value_type)? {
            def = check.on_argument(def);
        }
    }
    Ok(def)
}

fn build_value(schema: &ValueSchema) -> Result<ValueSpec> {
    let value_type: ValueType = schema.value_type.parse()?;
    let mut spec = ValueSpec::new(value_type);
    if let Some(default) = &schema.default {
        spec = spec.default_value(typed(default, value_type).context("invalid default value")?);
    }
    if let Some(name) = &schema.value_name {
        spec = spec.value_name(name.as_str());
    }
    if let Some(constraints) = &schema.constraints {
        for check in checks(constraints, value_type)? {
            spec = check.on_value(spec);
        }
    }
    Ok(spec)
}

/// Convert a JSON scalar from the schema into a value of the declared type.
fn typed(json: &serde_json::Value, value_type: ValueType) -> Result<Value> {
    let value = match json {
        serde_json::Value::String(s) => value_type.convert(s)?,
        serde_json::Value::Number(n) => value_type.convert(&n.to_string())?,
        other => bail!("expected a string or a number, got: {other}"),
    };
    Ok(value)
}

enum Check {
    OneOf(Enumeration),
    Min(MinValue),
    Max(MaxValue),
    MinLength(MinLength),
    MaxLength(MaxLength),
    Length(Length),
}

impl Check {
    fn on_value(self, spec: ValueSpec) -> ValueSpec {
        match self {
            Self::OneOf(c) => spec.constraint(c),
            Self::Min(c) => spec.constraint(c),
            Self::Max(c) => spec.constraint(c),
            Self::MinLength(c) => spec.constraint(c),
            Self::MaxLength(c) => spec.constraint(c),
            Self::Length(c) => spec.constraint(c),
        }
    }

    fn on_argument(self, def: ArgumentDef) -> ArgumentDef {
        match self {
            Self::OneOf(c) => def.constraint(c),
            Self::Min(c) => def.constraint(c),
            Self::Max(c) => def.constraint(c),
            Self::MinLength(c) => def.constraint(c),
            Self::MaxLength(c) => def.constraint(c),
            Self::Length(c) => def.constraint(c),
        }
    }
}

fn checks(schema: &ConstraintSchema, value_type: ValueType) -> Result<Vec<Check>> {
    let mut checks = Vec::new();
    if !schema.one_of.is_empty() {
        let values = schema
            .one_of
            .iter()
            .map(|v| typed(v, value_type))
            .collect::<Result<Vec<_>>>()
            .context("invalid one-of constraint")?;
        checks.push(Check::OneOf(Enumeration::new(values)));
    }
    if let Some(min) = &schema.min {
        checks.push(Check::Min(MinValue(
            typed(min, value_type).context("invalid min constraint")?,
        )));
    }
    if let Some(max) = &schema.max {
        checks.push(Check::Max(MaxValue(
            typed(max, value_type).context("invalid max constraint")?,
        )));
    }
    if let Some(len) = schema.min_length {
        checks.push(Check::MinLength(MinLength(len)));
    }
    if let Some(len) = schema.max_length {
        checks.push(Check::MaxLength(MaxLength(len)));
    }
    if let Some(len) = schema.length {
        checks.push(Check::Length(Length(len)));
    }
    Ok(checks)
}

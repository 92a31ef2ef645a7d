use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_SCHEMA_NAME: &str = "cmdmatch.json";

/// Root of a `cmdmatch.json` file.
///
/// The root describes a single command unless `commands` is non-empty, in
/// which case the root only names the command set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(flatten)]
    pub root: CommandSchema,

    /// Whether optional arguments must carry a default (default: true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub require_defaults: Option<bool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub summary: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionSchema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<ArgumentSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OptionSchema {
    /// `a`, `-a`, `all` or `--all`.
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default)]
    pub multiple: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ValueSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ValueSchema {
    /// Type name such as `i32`, `f64`, `bigdecimal` or `string`.
    #[serde(rename = "type")]
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<ConstraintSchema>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ArgumentSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default)]
    pub optional: bool,
    #[serde(flatten)]
    pub value: ValueSchema,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConstraintSchema {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub one_of: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
}

impl Schema {
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("schema not found: {}", path.display());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read schema: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse schema JSON: {}", path.display()))
    }

    /// Example schema written by `cmdmatch init`.
    pub fn example(name: &str) -> Self {
        let int = |default: Option<i64>| ValueSchema {
            value_type: "i32".to_string(),
            default: default.map(serde_json::Value::from),
            ..Default::default()
        };

        Self {
            schema_version: Some(1),
            root: CommandSchema {
                name: name.to_string(),
                summary: "Example command".to_string(),
                description: "Edit cmdmatch.json to describe your own options and arguments."
                    .to_string(),
                options: vec![
                    OptionSchema {
                        name: "a".to_string(),
                        alternatives: vec!["all".to_string()],
                        help: "Option with a default value".to_string(),
                        value: Some(int(Some(-11))),
                        ..Default::default()
                    },
                    OptionSchema {
                        name: "v".to_string(),
                        alternatives: vec!["verbose".to_string()],
                        help: "May be given more than once".to_string(),
                        multiple: true,
                        ..Default::default()
                    },
                ],
                arguments: vec![
                    ArgumentSchema {
                        name: "PID".to_string(),
                        help: "Mandatory argument".to_string(),
                        value: int(None),
                        ..Default::default()
                    },
                    ArgumentSchema {
                        name: "LEVEL".to_string(),
                        help: "Optional argument".to_string(),
                        optional: true,
                        value: int(Some(-400)),
                    },
                ],
                ..Default::default()
            },
            require_defaults: None,
            commands: Vec::new(),
        }
    }
}

/// Write the example schema into `project_dir`; refuses to overwrite.
pub fn write_example_schema(project_dir: &Path) -> Result<PathBuf> {
    let dest = project_dir.join(DEFAULT_SCHEMA_NAME);
    if dest.exists() {
        bail!("{DEFAULT_SCHEMA_NAME} already exists in {}", project_dir.display());
    }

    let name = root_command_name(project_dir).unwrap_or_else(|| "my-cli".to_string());
    let mut out =
        serde_json::to_string_pretty(&Schema::example(&name)).context("failed to serialize schema")?;
    out.push('\n');

    fs::write(&dest, out.as_bytes())
        .with_context(|| format!("failed to write {}", dest.display()))?;
    Ok(dest)
}

/// Root command name for a new schema, taken from the directory name (the
/// current directory's when `dir` is `.`). Lowercased, with anything outside
/// `[a-z0-9]` turned into `-`, so the name reads like a command.
fn root_command_name(dir: &Path) -> Option<String> {
    let base = match dir.file_name() {
        Some(name) => PathBuf::from(name),
        None => std::env::current_dir().ok()?,
    };
    let name: String = base
        .file_name()?
        .to_str()?
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
        .collect();
    let name = name.trim_matches('-');
    (!name.is_empty()).then(|| name.to_string())
}

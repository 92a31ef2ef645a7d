mod definitions;
mod schema;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cmdmatch_argparse::help;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::{EnvFilter, fmt};

use crate::definitions::Definitions;
use crate::schema::{DEFAULT_SCHEMA_NAME, Schema};

#[derive(Parser)]
#[command(name = "cmdmatch")]
#[command(version, about = "Declarative command line matcher", long_about = None)]
struct Cli {
    /// Path to the cmdmatch.json schema
    #[arg(
        short,
        long,
        global = true,
        env = "CMDMATCH_SCHEMA",
        default_value = DEFAULT_SCHEMA_NAME,
        value_name = "FILE"
    )]
    schema: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write an example cmdmatch.json
    Init(InitArgs),

    /// Validate the schema and list the commands it defines
    Check,

    /// Match tokens against the schema and print the result as JSON
    Parse(ParseArgs),

    /// Print the help message generated from the schema
    Usage(UsageArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Parser)]
struct ParseArgs {
    /// Tokens to match (put them after `--`)
    #[arg(value_name = "TOKENS", trailing_var_arg = true, allow_hyphen_values = true)]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct UsageArgs {
    /// Command of a command set
    #[arg(value_name = "COMMAND")]
    command: Option<String>,

    /// Line width
    #[arg(short, long, env = "CMDMATCH_WIDTH", default_value_t = help::DEFAULT_WIDTH)]
    width: usize,
}

fn main() -> Result<()> {
    // .env may set RUST_LOG, so it is read before the subscriber is installed
    let dotenv = dotenvy::dotenv();
    init_tracing();
    if let Err(err) = dotenv
        && !err.not_found()
    {
        tracing::warn!("failed to load .env: {err}");
    }
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Check => check(&cli.schema),
        Commands::Parse(args) => parse(&cli.schema, args),
        Commands::Usage(args) => usage(&cli.schema, args),
    }
}

fn load(path: &Path) -> Result<Definitions> {
    let schema = Schema::from_file(path)?;
    tracing::debug!(
        schema = %path.display(),
        commands = schema.commands.len(),
        "loaded schema"
    );
    Definitions::from_schema(&schema)
        .with_context(|| format!("invalid schema: {}", path.display()))
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));

    fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let schema_path = schema::write_example_schema(&dir)?;

    eprintln!("Created: {}", schema_path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_SCHEMA_NAME} to describe your options and arguments");
    eprintln!("  2. Run: cmdmatch check");
    eprintln!("  3. Run: cmdmatch parse -- <TOKENS>...");

    Ok(())
}

fn check(path: &Path) -> Result<()> {
    tracing::debug!("executing check command");

    let definitions = load(path)?;
    let commands = definitions.commands();
    eprintln!("Schema: {}", path.display());
    for command in &commands {
        eprintln!(
            "  {}: {} option(s), {} argument(s) ({} optional)",
            command.name(),
            command.options().count(),
            command.arguments().len(),
            command.optional_count()
        );
    }
    eprintln!("OK: {} command(s) defined", commands.len());
    Ok(())
}

fn parse(path: &Path, args: ParseArgs) -> Result<()> {
    tracing::debug!(tokens = args.tokens.len(), "executing parse command");

    let definitions = load(path)?;
    let matches = definitions.parse(&args.tokens)?;
    println!("{}", serde_json::to_string_pretty(&matches)?);
    Ok(())
}

fn usage(path: &Path, args: UsageArgs) -> Result<()> {
    let definitions = load(path)?;
    print!("{}", definitions.help(args.command.as_deref(), args.width)?);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

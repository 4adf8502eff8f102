mod definition_file;
mod summary;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use toptions::Unrecognized;
use tracing_subscriber::{EnvFilter, fmt};

use crate::definition_file::{DEFAULT_DEFINITION_NAME, load_definition, write_default_definition};
use crate::summary::summarize;

#[derive(Parser)]
#[command(name = "toptions")]
#[command(
    version,
    about = "Classify command-line tokens against a declarative option definition",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter toptions.json
    Init(InitArgs),

    /// Parse tokens and print the resulting configuration as JSON
    Parse(ParseArgs),

    /// Validate a definition and summarize its options
    Check(CheckArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Overwrite an existing definition
    #[arg(long)]
    force: bool,
}

#[derive(Parser)]
struct ParseArgs {
    /// Path to the definition JSON
    #[arg(short, long, default_value = DEFAULT_DEFINITION_NAME, value_name = "FILE")]
    definition: PathBuf,

    /// Fail when any token is unrecognized
    #[arg(long)]
    strict: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Tokens to classify, after `--`
    #[arg(last = true, value_name = "TOKENS")]
    tokens: Vec<String>,
}

#[derive(Parser)]
struct CheckArgs {
    /// Path to the definition JSON
    #[arg(short, long, default_value = DEFAULT_DEFINITION_NAME, value_name = "FILE")]
    definition: PathBuf,

    /// Only output JSON (no human-readable output)
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Parse(args) => parse_command(args),
        Commands::Check(args) => check_command(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create directory: {}", dir.display()))?;

    let dest = write_default_definition(&dir, args.force)?;
    eprintln!("Created: {}", dest.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Edit {DEFAULT_DEFINITION_NAME} to declare your options");
    eprintln!("  2. Run: toptions check");
    eprintln!("  3. Run: toptions parse -- <TOKENS>");

    Ok(())
}

fn compile(path: &Path) -> Result<toptions::Parser> {
    let definition = load_definition(path)?;
    toptions::Parser::new(definition)
        .with_context(|| format!("invalid definition: {}", path.display()))
}

fn parse_command(args: ParseArgs) -> Result<()> {
    tracing::debug!("executing parse command");

    let parser = compile(&args.definition)?;
    let config = parser.parse(&args.tokens);

    let json = if args.compact {
        serde_json::to_string(&config)?
    } else {
        serde_json::to_string_pretty(&config)?
    };
    println!("{json}");

    if args.strict && config.has_unrecognized() {
        bail!("unrecognized input: {}", describe(config.unrecognized()));
    }

    Ok(())
}

/// Names are shown as recorded; an alias and a one-letter long name look the same.
fn describe(unrecognized: &Unrecognized) -> String {
    let named = unrecognized
        .named
        .iter()
        .map(|name| format!("option `{name}`"));
    let positional = unrecognized
        .positional
        .iter()
        .map(|p| format!("argument `{p}`"));
    named.chain(positional).collect::<Vec<_>>().join(", ")
}

fn check_command(args: CheckArgs) -> Result<()> {
    tracing::debug!("executing check command");

    let parser = compile(&args.definition)?;
    let summary = summarize(&args.definition.display().to_string(), &parser);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    eprintln!("=== Definition ===");
    eprintln!("Source: {}", summary.source);
    eprintln!("Options: {}", summary.options.len());

    let rows = summary.rows();
    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    for (left, kind) in rows {
        eprintln!("  {left:width$}  {kind}");
    }
    if !summary.positional.is_empty() {
        eprintln!("Positional order: {}", summary.positional.join(", "));
    }
    eprintln!("OK: definition is valid");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_renders_recorded_names() {
        let unrecognized = Unrecognized {
            named: vec!["x".to_string(), "Foo".to_string(), "noSuch".to_string()],
            positional: vec!["extra".to_string()],
        };
        assert_eq!(
            describe(&unrecognized),
            "option `x`, option `Foo`, option `noSuch`, argument `extra`"
        );
    }

    #[test]
    fn cli_accepts_tokens_after_separator() {
        let cli = Cli::try_parse_from([
            "toptions", "parse", "--strict", "--", "--foo", "bar", "--", "tail",
        ])
        .unwrap();
        let Commands::Parse(args) = cli.command else {
            panic!("expected parse");
        };
        assert!(args.strict);
        assert_eq!(args.definition, PathBuf::from(DEFAULT_DEFINITION_NAME));
        assert_eq!(args.tokens, ["--foo", "bar", "--", "tail"]);
    }
}

//! Parses an expression typed on the command line and prints it in another syntax.
//!
//! ```sh
//! formulate --format latex "int(x^2, x, 0, 1)"
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use formulate::{BuiltinFormat, ConstructTable, FormatTemplates, SerializeOptions, parse_text_or_literal, serialize};

/// Convert a typed expression into LaTeX, plain text or Maxima syntax
#[derive(Parser, Debug)]
#[command(name = "formulate", version)]
struct Args {
    /// The expression to convert
    #[arg(value_name = "EXPRESSION")]
    expression: String,

    /// Output syntax
    #[arg(short, long, value_enum, default_value = "latex")]
    format: FormatArg,

    /// Load the output templates from this TOML file instead
    #[arg(long, value_name = "PATH")]
    templates: Option<PathBuf>,

    /// Load the construct table from this TOML file instead of the bundled one
    #[arg(long, value_name = "PATH")]
    constructs: Option<PathBuf>,

    /// Leave out multiplication signs
    #[arg(long)]
    implicit_mult: bool,

    /// Keep whole numbers in decimal form
    #[arg(long)]
    keep_decimal: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Latex,
    Plain,
    Maxima,
}

impl From<FormatArg> for BuiltinFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Latex => BuiltinFormat::Latex,
            FormatArg::Plain => BuiltinFormat::Plain,
            FormatArg::Maxima => BuiltinFormat::Maxima,
        }
    }
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let constructs = match &args.constructs {
        Some(path) => ConstructTable::from_path(path)?,
        None => ConstructTable::builtin(),
    };
    let templates = match &args.templates {
        Some(path) => FormatTemplates::from_path(path)?,
        None => FormatTemplates::builtin(args.format.into()),
    };

    let tree = parse_text_or_literal(&args.expression, &constructs);
    info!("parsed as {}", tree);

    let options = SerializeOptions {
        implicit_mult: args.implicit_mult,
        keep_as_decimal: args.keep_decimal,
        ..SerializeOptions::default()
    };
    Ok(serialize(&tree, &templates, &options)?)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    if let Err(e) = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto) {
        eprintln!("warning: could not set up logging: {}", e);
    }

    match run(&args) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

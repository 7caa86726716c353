use std::{path::PathBuf, process::ExitCode};

use anyhow::Context;
use cfront::{
    ast::printer::dump, check_source, errors::errors::ErrorTip, read_source, render_error,
    report,
};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Lexes, parses, resolves and type-checks a source file.
#[derive(Parser, Debug)]
#[command(name = "cfront", version)]
struct Args {
    /// Source file to check
    path: PathBuf,

    /// Print the parsed syntax tree
    #[arg(long)]
    dump_ast: bool,

    /// Print every token, comments included
    #[arg(long)]
    dump_tokens: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let args = Args::parse();
    let file = args.path.display().to_string();

    let source = read_source(&args.path).with_context(|| format!("reading `{}`", file))?;

    let result = match check_source(&source, &file) {
        Ok(result) => result,
        Err(error) => {
            let position = error.get_position();
            let message = match error.get_tip() {
                ErrorTip::None => error.to_string(),
                ErrorTip::Suggestion(tip) => format!("{} ({})", error, tip),
            };
            report(&file, &source, position.line, position.col, &message)
        }
    };

    if args.dump_tokens {
        for token in &result.parse.tokens {
            println!("{}", token);
        }
    }

    if args.dump_ast {
        print!("{}", dump(&result.parse.ast));
    }

    for error in &result.parse.diagnostics {
        eprint!("{}", render_error(&file, &source, error));
    }

    for diagnostic in &result.types.diagnostics {
        eprintln!("{}", diagnostic);
    }

    if result.types.error_count > 0 {
        eprintln!(
            "{}: {} type error{}",
            file,
            result.types.error_count,
            if result.types.error_count == 1 { "" } else { "s" }
        );
    }

    if result.is_ok() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

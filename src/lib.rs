#![allow(clippy::module_inception)]

use std::{fs, path::Path, process};

use crate::{
    errors::errors::{Error, ErrorImpl, ErrorTip},
    parser::parser::{parse, ParseResult},
    scope::resolver::resolve,
    type_checker::{diagnostics::TypeReport, type_checker::type_check},
};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// A 1-based line and column in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

pub fn read_source(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|error| {
        Error::new(
            ErrorImpl::SourceUnreadable {
                path: path.display().to_string(),
                message: error.to_string(),
            },
            Position::default(),
        )
    })
}

/// The text of 1-based line `line`, without its line terminator.
pub fn get_line(source: &str, line: u32) -> Option<&str> {
    let index = (line as usize).checked_sub(1)?;
    source
        .split('\n')
        .nth(index)
        .map(|text| text.trim_end_matches('\r'))
}

/// Renders a fatal diagnostic:
///
/// ```text
/// main.c:1:9: error: unexpected character '#'
///   |
/// 1 | int a = #;
///   |         ^
/// ```
pub fn render_diagnostic(file: &str, source: &str, line: u32, col: u32, message: &str) -> String {
    let mut out = format!("{}:{}:{}: error: {}\n", file, line, col, message);

    let Some(text) = get_line(source, line) else {
        return out;
    };

    let line_number = line.to_string();
    let gutter = " ".repeat(line_number.len());

    // Tabs are kept so the caret lines up with the source as displayed.
    let padding = text
        .chars()
        .take(col.saturating_sub(1) as usize)
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect::<String>();

    out.push_str(&format!("{} |\n", gutter));
    out.push_str(&format!("{} | {}\n", line_number, text));
    out.push_str(&format!("{} | {}^\n", gutter, padding));
    out
}

/// [`render_diagnostic`] for an [`Error`], with its tip when it has one.
pub fn render_error(file: &str, source: &str, error: &Error) -> String {
    let position = error.get_position();
    let mut out = render_diagnostic(
        file,
        source,
        position.line,
        position.col,
        &error.to_string(),
    );

    if let ErrorTip::Suggestion(tip) = error.get_tip() {
        out.push_str(&format!("  = help: {}\n", tip));
    }
    out
}

/// Prints a fatal diagnostic to stderr and terminates the process.
pub fn report(file: &str, source: &str, line: u32, col: u32, message: &str) -> ! {
    eprint!("{}", render_diagnostic(file, source, line, col, message));
    process::exit(1)
}

/// Everything the four stages produced for one source file.
#[derive(Debug)]
pub struct PipelineReport {
    pub file: String,
    pub token_count: usize,
    pub parse: ParseResult,
    pub scope_count: usize,
    pub types: TypeReport,
}

impl PipelineReport {
    pub fn error_count(&self) -> usize {
        self.parse.diagnostics.len() + self.types.error_count
    }

    pub fn is_ok(&self) -> bool {
        self.error_count() == 0
    }
}

/// Runs lexing, parsing, scope resolution and type checking on `source`.
///
/// Lexical and scope errors are returned as `Err`. Syntax errors are kept in
/// the report and the recovered tree still goes through resolution and type
/// checking.
pub fn check_source(source: &str, file: &str) -> Result<PipelineReport, Error> {
    let parse = parse(source)?;
    let scopes = resolve(&parse.ast)?;
    let types = type_check(&parse.ast, &scopes);
    let scope_count = scopes.len();

    let report = PipelineReport {
        file: String::from(file),
        token_count: parse.tokens.len(),
        parse,
        scope_count,
        types,
    };

    tracing::debug!(
        file,
        tokens = report.token_count,
        scopes = report.scope_count,
        type_errors = report.types.error_count,
        "checked source"
    );
    Ok(report)
}

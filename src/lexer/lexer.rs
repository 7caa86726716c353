use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, OPERATOR_LOOKUP, RESERVED_LOOKUP};

lazy_static! {
    static ref IDENTIFIER_PATTERN: Regex = Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap();
    static ref NUMBER_PATTERN: Regex = Regex::new("^[0-9][0-9.]*").unwrap();
}

/// Characters that may directly follow a numeral without forcing a rewind.
const NUMBER_DELIMITERS: &[char] = &['(', ')', '{', '}', '[', ']', ',', ';', ':', '?'];

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[derive(Clone, Copy)]
struct Checkpoint {
    pos: usize,
    line: u32,
    col: u32,
}

/// On-demand tokenizer over a single source buffer.
///
/// The cursor only moves forward, except for the numeric-literal rewind
/// described on [`Lexer::next_token`].
#[derive(Clone)]
pub struct Lexer {
    source: String,
    pos: usize,
    line: u32,
    col: u32,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            source: source.into(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    fn peek(&self, n: usize) -> Option<char> {
        self.remainder().chars().nth(n)
    }

    /// Moves past one character, keeping line and column in step.
    fn bump(&mut self) -> Option<char> {
        let c = self.at()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(c)
    }

    /// Advances over `n` bytes of text known not to contain a newline.
    fn advance_n(&mut self, n: usize) {
        let consumed = self.remainder()[..n].chars().count() as u32;
        self.pos += n;
        self.col += consumed;
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            pos: self.pos,
            line: self.line,
            col: self.col,
        }
    }

    fn restore(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.pos;
        self.line = checkpoint.line;
        self.col = checkpoint.col;
    }

    /// Produces the next token, `EOF` once the input is exhausted.
    ///
    /// A numeral is only accepted when it is followed by whitespace, the end
    /// of input or a punctuation delimiter. Otherwise the cursor returns to
    /// the first digit and the remaining rules are tried, none of which
    /// accept a digit: `1+2` is therefore an "unexpected character" error
    /// while `1 + 2` lexes as three tokens.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        while let Some(c) = self.at() {
            if is_space(c) {
                self.bump();
                continue;
            }

            if c == '/' {
                match self.peek(1) {
                    Some('/') => return Ok(self.line_comment()),
                    Some('*') => return self.block_comment(),
                    _ => {}
                }
            }

            if c == '"' {
                return self.string_literal();
            }

            if c == '\'' {
                return self.char_literal();
            }

            if c.is_ascii_digit() {
                if let Some(token) = self.number_literal()? {
                    return Ok(token);
                }
            }

            if let Some(token) = self.symbol() {
                return Ok(token);
            }

            return self.operator();
        }

        Ok(MK_TOKEN!(TokenKind::EOF, "EOF", self.position()))
    }

    fn line_comment(&mut self) -> Token {
        let start = self.position();
        let begin = self.pos;
        while let Some(c) = self.at() {
            if c == '\n' {
                break;
            }
            self.bump();
        }

        MK_TOKEN!(TokenKind::Comment, &self.source[begin..self.pos], start)
    }

    fn block_comment(&mut self) -> Result<Token, Error> {
        let start = self.position();
        let begin = self.pos;
        self.advance_n(2);

        loop {
            if self.remainder().starts_with("*/") {
                self.advance_n(2);
                return Ok(MK_TOKEN!(TokenKind::Comment, &self.source[begin..self.pos], start));
            }
            if self.bump().is_none() {
                return Err(Error::new(ErrorImpl::UnterminatedComment, start));
            }
        }
    }

    fn string_literal(&mut self) -> Result<Token, Error> {
        let start = self.position();
        self.bump();

        let mut value = String::from("\"");
        loop {
            match self.at() {
                None | Some('\n') | Some('\r') => {
                    return Err(Error::new(ErrorImpl::UnterminatedString, start));
                }
                Some('"') => {
                    self.bump();
                    value.push('"');
                    break;
                }
                Some('\\') => {
                    self.bump();
                    let escape_position = self.position();
                    let escaped = match self.at() {
                        None => return Err(Error::new(ErrorImpl::UnterminatedString, start)),
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some('r') => '\r',
                        Some('\\') => '\\',
                        Some('"') => '"',
                        Some('0') => '\0',
                        Some(other) => {
                            return Err(Error::new(
                                ErrorImpl::InvalidEscape {
                                    ch: other,
                                    context: "string",
                                },
                                escape_position,
                            ))
                        }
                    };
                    value.push(escaped);
                    self.bump();
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }

        Ok(MK_TOKEN!(TokenKind::StringLiteral, value, start))
    }

    fn char_literal(&mut self) -> Result<Token, Error> {
        let start = self.position();
        self.bump();

        let value = match self.at() {
            None => return Err(Error::new(ErrorImpl::UnterminatedChar, start)),
            Some('\'') => return Err(Error::new(ErrorImpl::EmptyCharLiteral, start)),
            Some('\\') => {
                self.bump();
                let escape_position = self.position();
                match self.at() {
                    None => return Err(Error::new(ErrorImpl::UnterminatedChar, start)),
                    Some('n') => '\n',
                    Some('t') => '\t',
                    Some('r') => '\r',
                    Some('\\') => '\\',
                    Some('\'') => '\'',
                    Some('0') => '\0',
                    Some(other) => {
                        return Err(Error::new(
                            ErrorImpl::InvalidEscape {
                                ch: other,
                                context: "character",
                            },
                            escape_position,
                        ))
                    }
                }
            }
            Some(c) if !c.is_ascii() => {
                return Err(Error::new(ErrorImpl::NonAsciiCharLiteral { ch: c }, start))
            }
            Some(c) => c,
        };
        self.bump();

        if self.at() != Some('\'') {
            return Err(Error::new(ErrorImpl::UnterminatedChar, start));
        }
        self.bump();

        Ok(MK_TOKEN!(TokenKind::CharLiteral, value.to_string(), start))
    }

    fn number_literal(&mut self) -> Result<Option<Token>, Error> {
        let start = self.position();
        let matched = match NUMBER_PATTERN.find(self.remainder()) {
            Some(found) => found.as_str().to_string(),
            None => return Ok(None),
        };

        if matched.matches('.').count() > 1 {
            return Err(Error::new(
                ErrorImpl::InvalidNumberFormat { token: matched },
                start,
            ));
        }

        let checkpoint = self.checkpoint();
        self.advance_n(matched.len());

        let terminated = match self.at() {
            None => true,
            Some(c) => is_space(c) || NUMBER_DELIMITERS.contains(&c),
        };
        if !terminated {
            self.restore(checkpoint);
            return Ok(None);
        }

        let kind = if matched.contains('.') {
            TokenKind::FloatLiteral
        } else {
            TokenKind::IntLiteral
        };
        Ok(Some(MK_TOKEN!(kind, matched, start)))
    }

    fn symbol(&mut self) -> Option<Token> {
        let start = self.position();
        let value = IDENTIFIER_PATTERN.find(self.remainder())?.as_str().to_string();
        self.advance_n(value.len());

        let kind = RESERVED_LOOKUP
            .get(value.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        Some(MK_TOKEN!(kind, value, start))
    }

    fn operator(&mut self) -> Result<Token, Error> {
        let start = self.position();
        for width in [3, 2, 1] {
            let Some(candidate) = self.remainder().get(..width) else {
                continue;
            };
            if let Some(kind) = OPERATOR_LOOKUP.get(candidate).copied() {
                let lexeme = candidate.to_string();
                self.advance_n(width);
                return Ok(MK_TOKEN!(kind, lexeme, start));
            }
        }

        let ch = self.at().unwrap_or('\0');
        Err(Error::new(ErrorImpl::UnexpectedCharacter { ch }, start))
    }
}

/// Runs the lexer to completion, keeping comments. The final token is `EOF`.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);
        if done {
            break;
        }
    }

    tracing::debug!(count = tokens.len(), "tokenized source");
    Ok(tokens)
}

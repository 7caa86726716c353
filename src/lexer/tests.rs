//! Unit tests for the lexer module.
//!
//! Covers keywords, literals, operators, comments, positions and the
//! fatal error cases.

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};
use crate::{errors::errors::ErrorImpl, Position};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

#[test]
fn test_tokenize_keywords() {
    let tokens = kinds("int float string char bool void null fn return if else while do for print");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Int,
            TokenKind::Float,
            TokenKind::String,
            TokenKind::Char,
            TokenKind::Bool,
            TokenKind::Void,
            TokenKind::Null,
            TokenKind::Fn,
            TokenKind::Return,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::For,
            TokenKind::Print,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo baz_123 _underscore integer").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[1].lexeme, "baz_123");
    assert_eq!(tokens[2].lexeme, "_underscore");
    assert_eq!(tokens[3].kind, TokenKind::Identifier);
    assert_eq!(tokens[3].lexeme, "integer");
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_bool_literals() {
    let tokens = tokenize("true false").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[0].lexeme, "true");
    assert_eq!(tokens[1].kind, TokenKind::BoolLiteral);
    assert_eq!(tokens[1].lexeme, "false");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[0].lexeme, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[1].lexeme, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLiteral);
    assert_eq!(tokens[3].kind, TokenKind::FloatLiteral);
    assert_eq!(tokens[3].lexeme, "100.");
}

#[test]
fn test_number_followed_by_delimiter() {
    let tokens = kinds("f(1,2);");

    assert_eq!(
        tokens,
        vec![
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::IntLiteral,
            TokenKind::Comma,
            TokenKind::IntLiteral,
            TokenKind::CloseParen,
            TokenKind::Semicolon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_number_touching_operator_is_rejected() {
    let error = tokenize("1+2").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnexpectedCharacter { ch: '1' });
    assert_eq!(error.get_position(), &Position::new(1, 1));

    assert!(tokenize("1 + 2").is_ok());
}

#[test]
fn test_number_with_two_dots() {
    let error = tokenize("1.2.3").unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::InvalidNumberFormat {
            token: String::from("1.2.3")
        }
    );
}

#[test]
fn test_tokenize_strings() {
    let tokens = tokenize(r#""hello" "a\tb\n""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
    assert_eq!(tokens[0].lexeme, "\"hello\"");
    assert_eq!(tokens[1].lexeme, "\"a\tb\n\"");
}

#[test]
fn test_unterminated_string() {
    let error = tokenize("\"abc").unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString);
    assert_eq!(error.get_position(), &Position::new(1, 1));

    let error = tokenize("\"abc\ndef\"").unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedString);
}

#[test]
fn test_invalid_string_escape() {
    let error = tokenize(r#""a\qb""#).unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::InvalidEscape {
            ch: 'q',
            context: "string"
        }
    );
    assert_eq!(error.get_position(), &Position::new(1, 4));
}

#[test]
fn test_tokenize_chars() {
    let tokens = tokenize(r"'a' '\n' '\''").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::CharLiteral);
    assert_eq!(tokens[0].lexeme, "a");
    assert_eq!(tokens[1].lexeme, "\n");
    assert_eq!(tokens[2].lexeme, "'");
}

#[test]
fn test_char_errors() {
    assert_eq!(
        tokenize("''").unwrap_err().get_kind(),
        &ErrorImpl::EmptyCharLiteral
    );
    assert_eq!(
        tokenize("'ab'").unwrap_err().get_kind(),
        &ErrorImpl::UnterminatedChar
    );
    assert_eq!(
        tokenize("'é'").unwrap_err().get_kind(),
        &ErrorImpl::NonAsciiCharLiteral { ch: 'é' }
    );
}

#[test]
fn test_tokenize_operators() {
    let tokens = kinds("<<= >>= << >> <= >= == != && || ++ -- += -= *= /= %= &= |= ^= ~ !");

    assert_eq!(
        tokens,
        vec![
            TokenKind::ShiftLeftEquals,
            TokenKind::ShiftRightEquals,
            TokenKind::ShiftLeft,
            TokenKind::ShiftRight,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::And,
            TokenKind::Or,
            TokenKind::PlusPlus,
            TokenKind::MinusMinus,
            TokenKind::PlusEquals,
            TokenKind::MinusEquals,
            TokenKind::StarEquals,
            TokenKind::SlashEquals,
            TokenKind::PercentEquals,
            TokenKind::AmpersandEquals,
            TokenKind::PipeEquals,
            TokenKind::CaretEquals,
            TokenKind::Tilde,
            TokenKind::Not,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_greedy_operator_match() {
    let tokens = tokenize("a<<=b").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::ShiftLeftEquals);
    assert_eq!(tokens[1].lexeme, "<<=");
    assert_eq!(tokens[2].position, Position::new(1, 5));
}

#[test]
fn test_tokenize_comments() {
    let tokens = tokenize("// line\nx /* block\nstill */ y").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Comment);
    assert_eq!(tokens[0].lexeme, "// line");
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[2].kind, TokenKind::Comment);
    assert_eq!(tokens[3].lexeme, "y");
    assert_eq!(tokens[3].position, Position::new(3, 10));
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("x /* never closed").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnterminatedComment);
    assert_eq!(error.get_position(), &Position::new(1, 3));
}

#[test]
fn test_unexpected_character() {
    let error = tokenize("int x = #;").unwrap_err();

    assert_eq!(error.get_kind(), &ErrorImpl::UnexpectedCharacter { ch: '#' });
    assert_eq!(error.get_position(), &Position::new(1, 9));
}

#[test]
fn test_positions() {
    let tokens = tokenize("int x;\n  x = 1;").unwrap();

    assert_eq!(tokens[0].position, Position::new(1, 1));
    assert_eq!(tokens[1].position, Position::new(1, 5));
    assert_eq!(tokens[3].position, Position::new(2, 3));
    assert_eq!(tokens[5].position, Position::new(2, 7));
}

#[test]
fn test_eof_is_sticky() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);
}

#[test]
fn test_empty_source() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].position, Position::new(1, 1));
}

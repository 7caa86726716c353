use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("string", TokenKind::String);
        map.insert("char", TokenKind::Char);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("true", TokenKind::BoolLiteral);
        map.insert("false", TokenKind::BoolLiteral);
        map.insert("null", TokenKind::Null);
        map.insert("fn", TokenKind::Fn);
        map.insert("return", TokenKind::Return);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("for", TokenKind::For);
        map.insert("print", TokenKind::Print);
        map
    };

    /// Operators and punctuation, matched longest prefix first.
    pub static ref OPERATOR_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("<<=", TokenKind::ShiftLeftEquals);
        map.insert(">>=", TokenKind::ShiftRightEquals);

        map.insert("==", TokenKind::Equals);
        map.insert("!=", TokenKind::NotEquals);
        map.insert("+=", TokenKind::PlusEquals);
        map.insert("-=", TokenKind::MinusEquals);
        map.insert("*=", TokenKind::StarEquals);
        map.insert("/=", TokenKind::SlashEquals);
        map.insert("%=", TokenKind::PercentEquals);
        map.insert("&=", TokenKind::AmpersandEquals);
        map.insert("|=", TokenKind::PipeEquals);
        map.insert("^=", TokenKind::CaretEquals);
        map.insert("++", TokenKind::PlusPlus);
        map.insert("--", TokenKind::MinusMinus);
        map.insert("<<", TokenKind::ShiftLeft);
        map.insert(">>", TokenKind::ShiftRight);
        map.insert("<=", TokenKind::LessEquals);
        map.insert(">=", TokenKind::GreaterEquals);
        map.insert("&&", TokenKind::And);
        map.insert("||", TokenKind::Or);

        map.insert("+", TokenKind::Plus);
        map.insert("-", TokenKind::Dash);
        map.insert("*", TokenKind::Star);
        map.insert("/", TokenKind::Slash);
        map.insert("%", TokenKind::Percent);
        map.insert("=", TokenKind::Assignment);
        map.insert("<", TokenKind::Less);
        map.insert(">", TokenKind::Greater);
        map.insert("!", TokenKind::Not);
        map.insert("&", TokenKind::Ampersand);
        map.insert("|", TokenKind::Pipe);
        map.insert("^", TokenKind::Caret);
        map.insert("~", TokenKind::Tilde);
        map.insert("(", TokenKind::OpenParen);
        map.insert(")", TokenKind::CloseParen);
        map.insert("{", TokenKind::OpenCurly);
        map.insert("}", TokenKind::CloseCurly);
        map.insert("[", TokenKind::OpenBracket);
        map.insert("]", TokenKind::CloseBracket);
        map.insert(",", TokenKind::Comma);
        map.insert(";", TokenKind::Semicolon);
        map.insert(".", TokenKind::Dot);
        map.insert(":", TokenKind::Colon);
        map.insert("?", TokenKind::Question);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Comment,
    Identifier,

    IntLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BoolLiteral,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Ampersand,
    Pipe,
    Caret,
    Tilde,
    ShiftLeft,
    ShiftRight,

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,

    PlusPlus,
    MinusMinus,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    AmpersandEquals,
    PipeEquals,
    CaretEquals,
    ShiftLeftEquals,
    ShiftRightEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Int,
    Float,
    String,
    Char,
    Bool,
    Void,
    Null,
    Fn,
    Return,
    If,
    Else,
    While,
    Do,
    For,
    Print,
}

impl TokenKind {
    /// Whether this kind names one of the scalar types.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Int
                | TokenKind::Float
                | TokenKind::String
                | TokenKind::Char
                | TokenKind::Bool
                | TokenKind::Void
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier
            | TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::CharLiteral
            | TokenKind::BoolLiteral
            | TokenKind::Comment => write!(
                f,
                "{}:{} {} ({:?})",
                self.position.line, self.position.col, self.kind, self.lexeme
            ),
            _ => write!(
                f,
                "{}:{} {}",
                self.position.line, self.position.col, self.kind
            ),
        }
    }
}

use crate::{
    ast::expressions::{AssignOp, BinaryOp, Expr, ExprKind, UnaryOp},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{lookups::BindingPower, parser::Parser};

fn not_an_operator(token: &Token) -> Error {
    Error::new(
        ErrorImpl::ExpectedToken {
            expected: String::from("operator"),
            found: token.lexeme.clone(),
        },
        token.position,
    )
}

/// Parses a full expression.
pub fn parse_expression(parser: &mut Parser) -> Result<Expr, Error> {
    parse_expr(parser, BindingPower::Default.power())
}

/// Pratt loop: keeps extending `left` while the current token binds tighter
/// than `min_bp`. Tokens without a binding power (`;`, `)`, `,` ...) end it.
pub fn parse_expr(parser: &mut Parser, min_bp: u8) -> Result<Expr, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::ExpectedExpression {
                found: parser.current_token().lexeme.clone(),
            },
            parser.get_position(),
        ));
    };

    let mut left = nud(parser)?;

    while parser.current_binding_power().power() > min_bp {
        let binding_power = parser.current_binding_power();
        let token_kind = parser.current_token_kind();
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let position = parser.get_position();

    let kind = match parser.current_token_kind() {
        TokenKind::IntLiteral => {
            let token = parser.advance()?;
            let value = token.lexeme.parse::<i64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.lexeme.clone(),
                    },
                    position,
                )
            })?;
            ExprKind::Int(value)
        }
        TokenKind::FloatLiteral => {
            let token = parser.advance()?;
            let value = token.lexeme.parse::<f64>().map_err(|_| {
                Error::new(
                    ErrorImpl::NumberParseError {
                        token: token.lexeme.clone(),
                    },
                    position,
                )
            })?;
            ExprKind::Float(value)
        }
        TokenKind::StringLiteral => {
            let token = parser.advance()?;
            let unquoted = token
                .lexeme
                .strip_prefix('"')
                .and_then(|rest| rest.strip_suffix('"'))
                .unwrap_or(&token.lexeme);
            ExprKind::String(String::from(unquoted))
        }
        TokenKind::CharLiteral => {
            let token = parser.advance()?;
            ExprKind::Char(token.lexeme.bytes().next().unwrap_or(0))
        }
        TokenKind::BoolLiteral => ExprKind::Bool(parser.advance()?.lexeme == "true"),
        TokenKind::Identifier => {
            let is_call = parser.peek_token_kind() == TokenKind::OpenParen;
            let name = parser.advance()?.lexeme;
            if is_call {
                return parse_call_expr(parser, name, position);
            }
            ExprKind::Identifier(name)
        }
        _ => {
            return Err(Error::new(
                ErrorImpl::ExpectedExpression {
                    found: parser.current_token().lexeme.clone(),
                },
                position,
            ))
        }
    };

    Ok(Expr::new(kind, position))
}

/// `callee ( (expr ,)* )`, entered with the callee already consumed.
fn parse_call_expr(
    parser: &mut Parser,
    callee: String,
    position: Position,
) -> Result<Expr, Error> {
    parser.advance()?;

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.matches(TokenKind::Comma)? {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "`)` after call arguments")?;

    Ok(Expr::new(ExprKind::Call { callee, args }, position))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance()?;
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "`)`")?;

    Ok(expr)
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = UnaryOp::prefix(operator_token.kind).ok_or_else(|| not_an_operator(&operator_token))?;
    let operand = parse_expr(parser, BindingPower::Unary.power())?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        operator_token.position,
    ))
}

pub fn parse_postfix_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = UnaryOp::postfix(operator_token.kind).ok_or_else(|| not_an_operator(&operator_token))?;

    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(left),
        },
        operator_token.position,
    ))
}

/// Left-associative: the right operand is parsed at the operator's own power.
pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = BinaryOp::from_token(operator_token.kind).ok_or_else(|| not_an_operator(&operator_token))?;
    let right = parse_expr(parser, bp.power())?;

    Ok(Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        operator_token.position,
    ))
}

/// Right-associative: the right operand is parsed one step looser.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance()?;
    let op = AssignOp::from_token(operator_token.kind).ok_or_else(|| not_an_operator(&operator_token))?;
    let right = parse_expr(parser, bp.power() - 1)?;

    Ok(Expr::new(
        ExprKind::Assign {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        operator_token.position,
    ))
}

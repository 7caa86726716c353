use crate::{
    ast::{
        expressions::Expr,
        statements::{BlockStmt, FnDeclStmt, Param, Stmt, StmtKind},
        types::ScalarType,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
};

use super::{expr::parse_expression, parser::Parser};

/// Parses one declaration or statement.
///
/// Declarations share the statement table, so a declaration is accepted
/// wherever a statement is.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let position = parser.get_position();
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon, "`;` after expression")?;

    Ok(Stmt::new(StmtKind::Expr(expr), position))
}

fn expect_type(parser: &mut Parser, context: &'static str) -> Result<ScalarType, Error> {
    match ScalarType::from_token(parser.current_token_kind()) {
        Some(ty) => {
            parser.advance()?;
            Ok(ty)
        }
        None => Err(Error::new(
            ErrorImpl::ExpectedType {
                context,
                found: parser.current_token().lexeme.clone(),
            },
            parser.get_position(),
        )),
    }
}

fn expect_identifier(parser: &mut Parser, context: &'static str) -> Result<String, Error> {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(Error::new(
            ErrorImpl::ExpectedIdentifier {
                context,
                found: parser.current_token().lexeme.clone(),
            },
            parser.get_position(),
        ));
    }

    Ok(parser.advance()?.lexeme)
}

/// `type name (= expr)? ;`
pub fn parse_var_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.get_position();
    let type_name = expect_type(parser, "variable")?;
    let name = expect_identifier(parser, "identifier after type")?;

    if !parser.matches(TokenKind::Assignment)? {
        parser.expect(TokenKind::Semicolon, "`;` after variable declaration")?;
        return Ok(Stmt::new(
            StmtKind::VarDecl {
                type_name,
                name,
                init: None,
            },
            position,
        ));
    }

    // A broken initializer keeps the declaration, so later uses of the
    // name still resolve.
    let init = match parse_expression(parser) {
        Ok(init) => {
            parser.expect(TokenKind::Semicolon, "`;` after variable declaration")?;
            Some(init)
        }
        Err(error) => {
            parser.absorb(error)?;
            while !matches!(
                parser.current_token_kind(),
                TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF
            ) {
                parser.advance()?;
            }
            parser.matches(TokenKind::Semicolon)?;
            None
        }
    };

    Ok(Stmt::new(
        StmtKind::VarDecl {
            type_name,
            name,
            init,
        },
        position,
    ))
}

/// `fn type name ( (type name),* ) block`
pub fn parse_fn_decl_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    let return_type = expect_type(parser, "return")?;
    let name = expect_identifier(parser, "function name")?;

    parser.expect(TokenKind::OpenParen, "`(` after function name")?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            let param_position = parser.get_position();
            let ty = expect_type(parser, "parameter")?;
            let param_name = expect_identifier(parser, "parameter name")?;
            params.push(Param {
                ty,
                name: param_name,
                position: param_position,
            });

            if !parser.matches(TokenKind::Comma)? {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "`)` after parameters")?;

    let body = if parser.current_token_kind() == TokenKind::OpenCurly {
        parse_block(parser)?
    } else {
        let error = Error::new(
            ErrorImpl::ExpectedToken {
                expected: String::from("function body"),
                found: parser.current_token().lexeme.clone(),
            },
            parser.get_position(),
        );
        parser.record(error);
        BlockStmt {
            body: vec![],
            position: parser.get_position(),
        }
    };

    Ok(Stmt::new(
        StmtKind::FnDecl(FnDeclStmt {
            return_type,
            name,
            params,
            body,
            position,
        }),
        position,
    ))
}

/// Parses `{ ... }`, entered on the opening brace.
///
/// A statement that fails with a syntax error is dropped; the parser then
/// skips past the next `;`, or stops before `}` or the end of input.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let position = parser.advance()?.position;

    let mut body = vec![];
    while !matches!(
        parser.current_token_kind(),
        TokenKind::CloseCurly | TokenKind::EOF
    ) {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                parser.absorb(error)?;
                while !matches!(
                    parser.current_token_kind(),
                    TokenKind::Semicolon | TokenKind::CloseCurly | TokenKind::EOF
                ) {
                    parser.advance()?;
                }
                parser.matches(TokenKind::Semicolon)?;
            }
        }
    }

    parser.expect(TokenKind::CloseCurly, "`}`")?;

    Ok(BlockStmt { body, position })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let block = parse_block(parser)?;
    let position = block.position;

    Ok(Stmt::new(StmtKind::Block(block), position))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "`;` after return")?;

    Ok(Stmt::new(StmtKind::Return(value), position))
}

/// Parenthesised condition shared by `if` and `while`.
fn parse_condition(parser: &mut Parser, keyword: &str) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen, &format!("`(` after {}", keyword))?;
    let cond = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "`)` after condition")?;

    Ok(cond)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    let cond = parse_condition(parser, "if")?;
    let then = Box::new(parse_stmt(parser)?);

    let otherwise = if parser.matches(TokenKind::Else)? {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::new(
        StmtKind::If {
            cond,
            then,
            otherwise,
        },
        position,
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    let cond = parse_condition(parser, "while")?;
    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::new(StmtKind::While { cond, body }, position))
}

/// `for ( init? ; cond? ; update? ) stmt`, where init may declare a variable.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    parser.expect(TokenKind::OpenParen, "`(` after for")?;

    let init = if parser.matches(TokenKind::Semicolon)? {
        None
    } else if parser.current_token_kind().is_type_keyword() {
        Some(Box::new(parse_var_decl_stmt(parser)?))
    } else {
        let init_position = parser.get_position();
        let expr = parse_expression(parser)?;
        parser.expect(TokenKind::Semicolon, "`;` after loop initializer")?;
        Some(Box::new(Stmt::new(StmtKind::Expr(expr), init_position)))
    };

    let cond = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon, "`;` after loop condition")?;

    let update = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen, "`)` after for clauses")?;

    let body = Box::new(parse_stmt(parser)?);

    Ok(Stmt::new(
        StmtKind::For {
            init,
            cond,
            update,
            body,
        },
        position,
    ))
}

/// `print ( expr? ) ;` or a bare `print ;`.
pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let position = parser.advance()?.position;

    let value = if parser.matches(TokenKind::OpenParen)? {
        let value = if parser.current_token_kind() != TokenKind::CloseParen {
            Some(parse_expression(parser)?)
        } else {
            None
        };
        parser.expect(TokenKind::CloseParen, "`)` after print argument")?;
        value
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "`;` after print")?;

    Ok(Stmt::new(StmtKind::Print(value), position))
}

use crate::{
    ast::{
        ast::{FunctionDef, Param},
        expressions::Expr,
        statements::Stmt,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    type_checker::operators::Operator,
    Span,
};

use super::{parser::Parser, types::parse_type};

/// Parses one statement. Statements without a dedicated handler are
/// expression statements, assignments or augmented assignments.
pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        return handler(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let stmt = if parser.current_token_kind() == TokenKind::Assignment {
        let mut targets = vec![expr];
        parser.advance();
        let mut value = parse_expr(parser, BindingPower::Default)?;

        // `a = b = value`
        while parser.current_token_kind() == TokenKind::Assignment {
            parser.advance();
            targets.push(value);
            value = parse_expr(parser, BindingPower::Default)?;
        }

        if let Some(target) = targets.iter().find(|target| !is_assignable(target)) {
            return Err(Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: String::from("="),
                    message: String::from("only names and subscripts can be assigned to"),
                },
                target.get_span().start.clone(),
            ));
        }

        Stmt::Assign {
            span: Span {
                start,
                end: value.get_span().end.clone(),
            },
            targets,
            value,
        }
    } else if let Some(op) = Operator::from_augmented_token(parser.current_token_kind()) {
        if !is_assignable(&expr) {
            return Err(
                parser.unexpected_detailed("only names and subscripts can be updated in place")
            );
        }
        parser.advance();
        let value = parse_expr(parser, BindingPower::Default)?;

        Stmt::AugAssign {
            span: Span {
                start,
                end: value.get_span().end.clone(),
            },
            target: expr,
            op,
            value,
        }
    } else {
        Stmt::Expression {
            span: expr.get_span().clone(),
            expression: expr,
        }
    };

    parser.expect(TokenKind::Newline)?;
    Ok(stmt)
}

/// Parses the statements after a `:`: either an indented block or a single
/// statement on the same line.
pub fn parse_suite(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    parser.expect(TokenKind::Colon)?;

    if parser.current_token_kind() != TokenKind::Newline {
        return Ok(vec![parse_stmt(parser)?]);
    }

    parser.advance();
    parser.expect(TokenKind::Indent)?;

    let mut statements = Vec::new();
    while parser.current_token_kind() != TokenKind::Dedent {
        if !parser.has_tokens() {
            return Err(parser.unexpected_detailed("expected the end of the block"));
        }
        statements.push(parse_stmt(parser)?);
    }

    parser.expect(TokenKind::Dedent)?;
    Ok(statements)
}

/// Parses `if`/`elif` chains. An `elif` is stored as a nested `If` inside
/// the else branch.
pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_suite(parser)?;

    let orelse = match parser.current_token_kind() {
        TokenKind::Elif => vec![parse_if_stmt(parser)?],
        TokenKind::Else => {
            parser.advance();
            parse_suite(parser)?
        }
        _ => vec![],
    };

    Ok(Stmt::If {
        test,
        body,
        orelse,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let test = parse_expr(parser, BindingPower::Default)?;
    let body = parse_suite(parser)?;

    let orelse = if parser.current_token_kind() == TokenKind::Else {
        parser.advance();
        parse_suite(parser)?
    } else {
        vec![]
    };

    Ok(Stmt::While {
        test,
        body,
        orelse,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start_token = parser.advance().clone();

    let value = if parser.current_token_kind() != TokenKind::Newline {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    let end = match &value {
        Some(value) => value.get_span().end.clone(),
        None => start_token.span.end.clone(),
    };
    parser.expect(TokenKind::Newline)?;

    Ok(Stmt::Return {
        value,
        span: Span {
            start: start_token.span.start,
            end,
        },
    })
}

fn parse_param(parser: &mut Parser) -> Result<Param, Error> {
    let error = parser.unexpected_detailed("expected a parameter name");
    let name_token = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let annotation = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    Ok(Param {
        name: name_token.value,
        annotation,
        span: Span {
            start: name_token.span.start,
            end: parser.get_position(),
        },
    })
}

/// `def name(a: list[float], n: int) -> float: ...`
pub fn parse_function_def(parser: &mut Parser) -> Result<FunctionDef, Error> {
    let start = parser.expect(TokenKind::Def)?.span.start;

    let error = parser.unexpected_detailed("expected a function name");
    let name = parser.expect_error(TokenKind::Identifier, Some(error))?.value;

    parser.expect(TokenKind::OpenParen)?;

    let mut params = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseParen {
        params.push(parse_param(parser)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseParen {
            return Err(parser.unexpected_detailed("expected `,` or `)` after a parameter"));
        }
    }

    parser.expect(TokenKind::CloseParen)?;

    let return_annotation = if parser.current_token_kind() == TokenKind::Arrow {
        parser.advance();
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_suite(parser)?;

    Ok(FunctionDef {
        name,
        params,
        return_annotation,
        body,
        span: Span {
            start,
            end: parser.get_position(),
        },
    })
}

/// True for expressions that may appear left of `=`.
fn is_assignable(expr: &Expr) -> bool {
    matches!(expr, Expr::Name { .. } | Expr::Subscript { .. })
}

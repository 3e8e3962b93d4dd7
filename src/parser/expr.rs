use crate::{
    ast::expressions::{Expr, Literal},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    type_checker::operators::{Operator, OperatorKind},
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected()),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser.get_bp_lookup().get(&token_kind).unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

fn parse_number(parser: &mut Parser) -> Result<Literal, Error> {
    let token = parser.current_token();
    let is_float = token.value.contains(['.', 'e', 'E']);

    let literal = if is_float {
        token.value.parse::<f64>().ok().filter(|value| value.is_finite()).map(Literal::Float)
    } else {
        // integer literals are emitted as C `int`
        token.value.parse::<i32>().ok().map(|value| Literal::Int(value.into()))
    };

    literal.ok_or_else(|| {
        Error::new(
            ErrorImpl::NumberParseError {
                token: token.value.clone(),
            },
            token.span.start.clone(),
        )
    })
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = parse_number(parser)?;
            Ok(Expr::Constant {
                value,
                span: parser.advance().span.clone(),
            })
        }
        TokenKind::True | TokenKind::False => {
            let value = Literal::Bool(parser.current_token_kind() == TokenKind::True);
            Ok(Expr::Constant {
                value,
                span: parser.advance().span.clone(),
            })
        }
        TokenKind::Identifier => {
            let token = parser.advance();
            Ok(Expr::Name {
                id: token.value.clone(),
                span: token.span.clone(),
            })
        }
        _ => Err(parser.unexpected()),
    }
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let op = Operator::from_binary_token(operator_token.kind).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: operator_token.to_string(),
            },
            operator_token.span.start.clone(),
        )
    })?;

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        op,
        right: Box::new(right),
    })
}

/// `a < b <= c` becomes a single comparison node with two operators.
pub fn parse_compare_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let mut ops = vec![];
    let mut comparators = vec![];

    loop {
        let op = match Operator::from_binary_token(parser.current_token_kind()) {
            Some(op) if op.kind() == OperatorKind::Comparison => op,
            _ => break,
        };

        parser.advance();
        ops.push(op);
        comparators.push(parse_expr(parser, bp)?);
    }

    let end = match comparators.last() {
        Some(last) => last.get_span().end.clone(),
        None => return Err(parser.unexpected()),
    };

    Ok(Expr::Compare {
        span: Span {
            start: left.get_span().start.clone(),
            end,
        },
        left: Box::new(left),
        ops,
        comparators,
    })
}

/// Runs of the same boolean operator are flattened: `a and b and c`.
pub fn parse_bool_op_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let kind = parser.current_token_kind();
    let op = Operator::from_binary_token(kind).ok_or_else(|| parser.unexpected())?;

    let mut values = vec![left];
    while parser.current_token_kind() == kind {
        parser.advance();
        values.push(parse_expr(parser, bp)?);
    }

    let span = Span {
        start: values[0].get_span().start.clone(),
        end: values[values.len() - 1].get_span().end.clone(),
    };

    Ok(Expr::BoolOp { op, values, span })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let (op, bp) = match operator_token.kind {
        TokenKind::Not => (Operator::Not, BindingPower::LogicalNot),
        kind => match Operator::from_prefix_token(kind) {
            Some(op) => (op, BindingPower::Unary),
            None => {
                return Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        token: operator_token.to_string(),
                    },
                    operator_token.span.start.clone(),
                ))
            }
        },
    };

    let operand = parse_expr(parser, bp)?;

    Ok(Expr::Unary {
        span: Span {
            start: operator_token.span.start.clone(),
            end: operand.get_span().end.clone(),
        },
        op,
        operand: Box::new(operand),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

/// Comma separated expressions up to `close`, trailing comma allowed.
fn parse_expr_list(parser: &mut Parser, close: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    while parser.current_token_kind() != close {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != close {
            return Err(parser.unexpected_detailed(&format!("expected `,` or {}", close)));
        }
    }

    Ok(items)
}

pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().span.start.clone();
    let elements = parse_expr_list(parser, TokenKind::CloseBracket)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    Ok(Expr::List {
        elements,
        span: Span { start, end },
    })
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let callee = match left {
        Expr::Name { ref id, .. } => id.clone(),
        _ => return Err(parser.unexpected_detailed("only named functions can be called")),
    };

    parser.advance();
    let arguments = parse_expr_list(parser, TokenKind::CloseParen)?;
    let end = parser.expect(TokenKind::CloseParen)?.span.end;

    Ok(Expr::Call {
        span: Span {
            start: left.get_span().start.clone(),
            end,
        },
        callee,
        arguments,
    })
}

pub fn parse_subscript_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let slice = parse_expr(parser, BindingPower::Default)?;
    let end = parser.expect(TokenKind::CloseBracket)?.span.end;

    Ok(Expr::Subscript {
        span: Span {
            start: left.get_span().start.clone(),
            end,
        },
        value: Box::new(left),
        slice: Box::new(slice),
    })
}

//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Bare names (`int`, `float`)
//! - Subscripted names (`list[int]`, `List[float]`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers. Whether an annotation names a supported type is decided
//! later, by the type checker.

use std::collections::HashMap;

use crate::{ast::types::TypeAnnotation, errors::errors::Error, lexer::tokens::TokenKind};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_generic_type);
}

pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;
    Ok(TypeAnnotation::Symbol {
        name: token.value,
        position: token.span.start,
    })
}

/// `base[arg0, arg1, ...]`
pub fn parse_generic_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;

    let mut arguments = vec![];
    while parser.current_token_kind() != TokenKind::CloseBracket {
        arguments.push(parse_type(parser, BindingPower::Default)?);

        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else if parser.current_token_kind() != TokenKind::CloseBracket {
            return Err(parser.unexpected_detailed("expected `,` or `]` in a type"));
        }
    }

    parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Generic {
        position: left.get_position().clone(),
        base: Box::new(left),
        arguments,
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let nud = match parser.get_type_nud_lookup().get(&token_kind) {
        Some(nud) => *nud,
        None => return Err(parser.unexpected_detailed("expected a type")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let token_bp = *parser
            .get_type_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);
        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_lookup().get(&token_kind) {
            Some(led) => *led,
            None => return Err(parser.unexpected()),
        };
        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

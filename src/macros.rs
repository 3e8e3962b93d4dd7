//! Token construction macros shared by the lexer's pattern table.

/// Builds a `Token` from a kind, its text and its source span.
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Expands to a pattern handler for fixed-text tokens such as `+=` or `->`:
/// pushes one `$kind` token spanning `$value` and moves past it.
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer, _regex: &Regex| {
            let len = $value.len();
            let span = lexer.span_of(len);
            lexer.push(MK_TOKEN!($kind, String::from($value), span));
            lexer.advance_n(len);
        }
    };
}

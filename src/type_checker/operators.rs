//! Operator model.
//!
//! A closed set of operator tags with their target-language spelling. The
//! mapping is context free: `FloorDiv` is spelled `/` and `Div` is spelled
//! `/` too. Whether a cast is needed is decided by the node that consumes
//! the operator.

use std::fmt::Display;

use crate::lexer::tokens::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Arithmetic
    Add,
    Sub,
    Mult,
    Div,
    FloorDiv,
    Mod,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    // Boolean
    Not,
    And,
    Or,
    // Unary
    UAdd,
    USub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
    Arithmetic,
    Comparison,
    Boolean,
    Unary,
}

impl Operator {
    /// The literal target-language spelling.
    pub fn spelling(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::FloorDiv => "/",
            Operator::Mod => "%",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtE => "<=",
            Operator::Gt => ">",
            Operator::GtE => ">=",
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::UAdd => "+",
            Operator::USub => "-",
        }
    }

    /// The spelling in the source notation, used in diagnostics.
    pub fn source_spelling(self) -> &'static str {
        match self {
            Operator::Add | Operator::UAdd => "+",
            Operator::Sub | Operator::USub => "-",
            Operator::Mult => "*",
            Operator::Div => "/",
            Operator::FloorDiv => "//",
            Operator::Mod => "%",
            Operator::Eq => "==",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::LtE => "<=",
            Operator::Gt => ">",
            Operator::GtE => ">=",
            Operator::Not => "not",
            Operator::And => "and",
            Operator::Or => "or",
        }
    }

    pub fn kind(self) -> OperatorKind {
        match self {
            Operator::Add
            | Operator::Sub
            | Operator::Mult
            | Operator::Div
            | Operator::FloorDiv
            | Operator::Mod => OperatorKind::Arithmetic,
            Operator::Eq
            | Operator::NotEq
            | Operator::Lt
            | Operator::LtE
            | Operator::Gt
            | Operator::GtE => OperatorKind::Comparison,
            Operator::Not | Operator::And | Operator::Or => OperatorKind::Boolean,
            Operator::UAdd | Operator::USub => OperatorKind::Unary,
        }
    }

    /// Operator for a binary infix token.
    pub fn from_binary_token(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Dash => Some(Operator::Sub),
            TokenKind::Star => Some(Operator::Mult),
            TokenKind::Slash => Some(Operator::Div),
            TokenKind::SlashSlash => Some(Operator::FloorDiv),
            TokenKind::Percent => Some(Operator::Mod),
            TokenKind::Equals => Some(Operator::Eq),
            TokenKind::NotEquals => Some(Operator::NotEq),
            TokenKind::Less => Some(Operator::Lt),
            TokenKind::LessEquals => Some(Operator::LtE),
            TokenKind::Greater => Some(Operator::Gt),
            TokenKind::GreaterEquals => Some(Operator::GtE),
            TokenKind::And => Some(Operator::And),
            TokenKind::Or => Some(Operator::Or),
            _ => None,
        }
    }

    /// Operator for a prefix token.
    pub fn from_prefix_token(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Plus => Some(Operator::UAdd),
            TokenKind::Dash => Some(Operator::USub),
            TokenKind::Not => Some(Operator::Not),
            _ => None,
        }
    }

    /// Operator for an augmented assignment token (`+=` gives `Add`).
    pub fn from_augmented_token(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::PlusEquals => Some(Operator::Add),
            TokenKind::MinusEquals => Some(Operator::Sub),
            TokenKind::StarEquals => Some(Operator::Mult),
            TokenKind::SlashEquals => Some(Operator::Div),
            TokenKind::SlashSlashEquals => Some(Operator::FloorDiv),
            TokenKind::PercentEquals => Some(Operator::Mod),
            _ => None,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source_spelling())
    }
}

use std::rc::Rc;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

const TAB_WIDTH: usize = 8;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler
}

lazy_static! {
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler},
        RegexPattern { regex: Regex::new("^[0-9]+(\\.[0-9]*)?([eE][+-]?[0-9]+)?").unwrap(), handler: number_handler},
        RegexPattern { regex: Regex::new("^\\r?\\n").unwrap(), handler: newline_handler},
        RegexPattern { regex: Regex::new("^[ \\t\\r\\f]+").unwrap(), handler: skip_handler},
        RegexPattern { regex: Regex::new("^\\\\\\r?\\n").unwrap(), handler: skip_handler},
        RegexPattern { regex: Regex::new("^#[^\\n]*").unwrap(), handler: skip_handler},
        RegexPattern { regex: Regex::new("^[\\[(]").unwrap(), handler: open_group_handler},
        RegexPattern { regex: Regex::new("^[\\])]").unwrap(), handler: close_group_handler},
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==")},
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=")},
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assignment, "=")},
        RegexPattern { regex: Regex::new("^<=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::LessEquals, "<=")},
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<")},
        RegexPattern { regex: Regex::new("^>=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::GreaterEquals, ">=")},
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">")},
        RegexPattern { regex: Regex::new("^:").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Colon, ":")},
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",")},
        RegexPattern { regex: Regex::new("^->").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Arrow, "->")},
        RegexPattern { regex: Regex::new("^\\+=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PlusEquals, "+=")},
        RegexPattern { regex: Regex::new("^-=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::MinusEquals, "-=")},
        RegexPattern { regex: Regex::new("^\\*=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::StarEquals, "*=")},
        RegexPattern { regex: Regex::new("^//=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashSlashEquals, "//=")},
        RegexPattern { regex: Regex::new("^/=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashEquals, "/=")},
        RegexPattern { regex: Regex::new("^%=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::PercentEquals, "%=")},
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+")},
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Dash, "-")},
        RegexPattern { regex: Regex::new("^//").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::SlashSlash, "//")},
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/")},
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Star, "*")},
        RegexPattern { regex: Regex::new("^%").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Percent, "%")}
    ];
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    file: Rc<String>,
    /// Indentation widths of the enclosing blocks, innermost last.
    indent_stack: Vec<usize>,
    /// Open `(` / `[` count; newlines inside a group are not significant.
    group_depth: usize,
    at_line_start: bool,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            file: file_name,
            indent_stack: vec![0],
            group_depth: 0,
            at_line_start: true,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    /// Span covering the next `len` bytes.
    pub fn span_of(&self, len: usize) -> Span {
        Span {
            start: self.position(),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }

    fn push_layout(&mut self, kind: TokenKind) {
        let span = self.span_of(0);
        self.push(MK_TOKEN!(kind, String::new(), span));
    }

    fn ends_logical_line(&self) -> bool {
        match self.tokens.last() {
            None => true,
            Some(token) => token.is_one_of_many(&[TokenKind::Newline, TokenKind::Indent, TokenKind::Dedent]),
        }
    }

    /// Measures the indentation of the line starting at `pos` and emits
    /// `Indent`/`Dedent` tokens. Blank and comment-only lines are left alone.
    fn handle_line_start(&mut self) -> Result<(), Error> {
        self.at_line_start = false;

        let mut width = 0;
        let mut consumed = 0;
        for c in self.remainder().chars() {
            match c {
                ' ' => width += 1,
                '\t' => width = (width / TAB_WIDTH + 1) * TAB_WIDTH,
                '\x0c' => width = 0,
                _ => break,
            }
            consumed += 1;
        }
        self.advance_n(consumed);

        match self.remainder().chars().next() {
            None | Some('\n') | Some('\r') | Some('#') => return Ok(()),
            _ => {}
        }

        let current = *self.indent_stack.last().unwrap_or(&0);
        if width > current {
            self.indent_stack.push(width);
            self.push_layout(TokenKind::Indent);
        } else if width < current {
            while let Some(&top) = self.indent_stack.last() {
                if top <= width {
                    break;
                }
                self.indent_stack.pop();
                self.push_layout(TokenKind::Dedent);
            }

            if self.indent_stack.last().copied().unwrap_or(0) != width {
                return Err(Error::new(ErrorImpl::InconsistentIndentation, self.position()));
            }
        }

        Ok(())
    }

    fn finish(&mut self) {
        if !self.ends_logical_line() {
            self.push_layout(TokenKind::Newline);
        }

        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            self.push_layout(TokenKind::Dedent);
        }

        let span = self.span_of(0);
        self.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), span));
    }
}

fn matched_len(lexer: &Lexer, regex: &Regex) -> usize {
    regex.find(lexer.remainder()).map(|m| m.end()).unwrap_or(0)
}

fn number_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    let matched = lexer.remainder()[..len].to_string();
    let span = lexer.span_of(len);

    lexer.push(MK_TOKEN!(TokenKind::Number, matched, span));
    lexer.advance_n(len);
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    lexer.advance_n(len);
}

fn newline_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);

    if lexer.group_depth == 0 {
        if !lexer.ends_logical_line() {
            let span = lexer.span_of(len);
            lexer.push(MK_TOKEN!(TokenKind::Newline, String::from("\\n"), span));
        }
        lexer.at_line_start = true;
    }

    lexer.advance_n(len);
}

fn open_group_handler(lexer: &mut Lexer, _regex: &Regex) {
    let kind = if lexer.remainder().starts_with('(') { TokenKind::OpenParen } else { TokenKind::OpenBracket };
    let value = lexer.remainder()[..1].to_string();
    let span = lexer.span_of(1);

    lexer.group_depth += 1;
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(1);
}

fn close_group_handler(lexer: &mut Lexer, _regex: &Regex) {
    let kind = if lexer.remainder().starts_with(')') { TokenKind::CloseParen } else { TokenKind::CloseBracket };
    let value = lexer.remainder()[..1].to_string();
    let span = lexer.span_of(1);

    lexer.group_depth = lexer.group_depth.saturating_sub(1);
    lexer.push(MK_TOKEN!(kind, value, span));
    lexer.advance_n(1);
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let len = matched_len(lexer, regex);
    let value = lexer.remainder()[..len].to_string();
    let span = lexer.span_of(len);

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value, span));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value, span));
    }

    lexer.advance_n(len);
}

pub fn tokenize(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        if lex.at_line_start && lex.group_depth == 0 {
            lex.handle_line_start()?;
            if lex.at_eof() {
                break;
            }
        }

        let mut matched = false;

        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(lex.remainder()) {
                (pattern.handler)(&mut lex, &pattern.regex);
                matched = true;
                break;
            }
        }

        if !matched {
            let token = lex.remainder().chars().next().map(String::from).unwrap_or_default();
            return Err(Error::new(ErrorImpl::UnrecognisedToken { token }, lex.position()));
        }
    }

    lex.finish();
    trace!("tokenized {} into {} tokens", lex.file, lex.tokens.len());
    Ok(lex.tokens)
}

//! Parser for type spellings.
//!
//! Accepts the spellings MSVC prints inside decorated names as well as the
//! usual source forms:
//! - `int`, `unsigned __int64`, `class some_space::some_class`
//! - `double const`, `const double`, `char const * __ptr64`
//! - `foo &`, `foo const &&`, `int * const * volatile`
//! - template arguments are kept verbatim: `class std::vector<int *,class std::allocator<int *> >`
//!
//! Pointer-width modifiers are accepted after `*` and references and dropped;
//! the width is a property of the build, not of the type.

use crate::types::{Cv, RefKind, TypeDesc};
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur while parsing a type spelling.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty type spelling")]
    Empty,

    #[error("Missing base type before '{0}'")]
    MissingBase(String),

    #[error("Unexpected token at position {pos}: {token}")]
    UnexpectedToken { pos: usize, token: String },

    #[error("Type is already a reference")]
    DuplicateReference,

    #[error("Unbalanced brackets in '{0}'")]
    Unbalanced(String),
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Debug, Clone, PartialEq)]
enum Token<'a> {
    Const,
    Volatile,
    Star,
    Amp,
    AmpAmp,
    PtrSuffix,
    Word(&'a str),
}

/// Splits a spelling into words and declarator punctuation. Text inside
/// `<...>` or `(...)` stays part of the surrounding word.
struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn next_token(&mut self) -> ParseResult<Option<(usize, Token<'a>)>> {
        self.skip_whitespace();
        let start = self.pos;
        let ch = match self.peek_char() {
            Some(ch) => ch,
            None => return Ok(None),
        };

        let token = match ch {
            '*' => {
                self.next_char();
                Token::Star
            }
            '&' => {
                self.next_char();
                if self.peek_char() == Some('&') {
                    self.next_char();
                    Token::AmpAmp
                } else {
                    Token::Amp
                }
            }
            _ => match self.word()? {
                "const" => Token::Const,
                "volatile" => Token::Volatile,
                "__ptr32" | "__ptr64" => Token::PtrSuffix,
                word => Token::Word(word),
            },
        };
        Ok(Some((start, token)))
    }

    fn word(&mut self) -> ParseResult<&'a str> {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(ch) = self.peek_char() {
            match ch {
                '<' | '(' => depth += 1,
                '>' | ')' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| ParseError::Unbalanced(self.input.to_string()))?;
                }
                '*' | '&' if depth == 0 => break,
                _ if ch.is_whitespace() && depth == 0 => break,
                _ => {}
            }
            self.next_char();
        }
        if depth != 0 {
            return Err(ParseError::Unbalanced(self.input.to_string()));
        }
        Ok(&self.input[start..self.pos])
    }
}

/// Parse a type spelling into a [`TypeDesc`].
pub fn parse_type(input: &str) -> ParseResult<TypeDesc> {
    let mut lexer = Lexer::new(input);
    let mut base_words: Vec<&str> = Vec::new();
    let mut leading = Cv::NONE;
    let mut ty: Option<TypeDesc> = None;

    while let Some((pos, token)) = lexer.next_token()? {
        if let Some(desc) = ty.as_mut() {
            apply_declarator(desc, token, pos)?;
            continue;
        }

        // Still collecting the base spelling.
        match token {
            Token::Word(word) => base_words.push(word),
            Token::Const if base_words.is_empty() => leading.is_const = true,
            Token::Volatile if base_words.is_empty() => leading.is_volatile = true,
            other => {
                if base_words.is_empty() {
                    return Err(ParseError::MissingBase(token_text(&other).to_string()));
                }
                let mut desc = TypeDesc::named(base_words.join(" "));
                desc.cv = leading;
                apply_declarator(&mut desc, other, pos)?;
                ty = Some(desc);
            }
        }
    }

    match ty {
        Some(desc) => Ok(desc),
        None if base_words.is_empty() => Err(ParseError::Empty),
        None => {
            let mut desc = TypeDesc::named(base_words.join(" "));
            desc.cv = leading;
            Ok(desc)
        }
    }
}

fn apply_declarator(desc: &mut TypeDesc, token: Token<'_>, pos: usize) -> ParseResult<()> {
    if desc.reference != RefKind::None && token != Token::PtrSuffix {
        return Err(match token {
            Token::Amp | Token::AmpAmp => ParseError::DuplicateReference,
            other => ParseError::UnexpectedToken {
                pos,
                token: token_text(&other).to_string(),
            },
        });
    }

    match token {
        Token::Const => desc.top_cv_mut().is_const = true,
        Token::Volatile => desc.top_cv_mut().is_volatile = true,
        Token::Star => desc.pointers.push(Cv::NONE),
        Token::Amp => desc.reference = RefKind::LValue,
        Token::AmpAmp => desc.reference = RefKind::RValue,
        Token::PtrSuffix => {
            if desc.pointers.is_empty() && desc.reference == RefKind::None {
                return Err(ParseError::UnexpectedToken {
                    pos,
                    token: "pointer modifier".to_string(),
                });
            }
        }
        Token::Word(word) => {
            return Err(ParseError::UnexpectedToken {
                pos,
                token: word.to_string(),
            })
        }
    }
    Ok(())
}

fn token_text<'a>(token: &Token<'a>) -> &'a str {
    match token {
        Token::Const => "const",
        Token::Volatile => "volatile",
        Token::Star => "*",
        Token::Amp => "&",
        Token::AmpAmp => "&&",
        Token::PtrSuffix => "__ptr64",
        Token::Word(word) => *word,
    }
}

impl FromStr for TypeDesc {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s)
    }
}

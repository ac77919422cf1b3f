//! S-expression values for KiCad footprint files.
//!
//! The crate is split in two halves:
//!
//! - construction: [`Sexpr`] constructors, [`kv`] and [`ListBuilder`] for
//!   assembling trees, plus [`formatter::format_tree`] to render them;
//! - reading: a small [`parse`] function used to inspect rendered output.

pub mod formatter;

use std::fmt;

use thiserror::Error;

/// An S-expression node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Sexpr {
    /// Unquoted identifier, e.g. `fp_line` or `solid`
    Symbol(String),
    /// Quoted text
    String(String),
    Int(i64),
    Float(f64),
    List(Vec<Sexpr>),
}

impl Sexpr {
    pub fn symbol(s: impl Into<String>) -> Self {
        Self::Symbol(s.into())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::String(s.into())
    }

    pub fn int(n: i64) -> Self {
        Self::Int(n)
    }

    pub fn float(f: f64) -> Self {
        Self::Float(f)
    }

    pub fn list(items: Vec<Sexpr>) -> Self {
        Self::List(items)
    }

    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    pub fn as_sym(&self) -> Option<&str> {
        match self {
            Self::Symbol(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value of an int or float atom.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Sexpr]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The leading symbol of a list, e.g. `pad` for `(pad "1" ...)`.
    pub fn tag(&self) -> Option<&str> {
        self.as_list()?.first()?.as_sym()
    }

    /// Find the first direct child list tagged `name`.
    pub fn find_list(&self, name: &str) -> Option<&[Sexpr]> {
        self.as_list()?
            .iter()
            .find(|item| item.tag() == Some(name))
            .and_then(Sexpr::as_list)
    }

    /// Find every direct child list tagged `name`, in order.
    pub fn find_all_lists(&self, name: &str) -> Vec<&[Sexpr]> {
        self.as_list()
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.tag() == Some(name))
                    .filter_map(Sexpr::as_list)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Create a `(key value)` pair.
pub fn kv<K: Into<String>, V: Into<Sexpr>>(k: K, v: V) -> Sexpr {
    Sexpr::list(vec![Sexpr::symbol(k), v.into()])
}

/// Create an `(xy x y)`-shaped coordinate node under an arbitrary tag.
pub fn xy(tag: &str, x: f64, y: f64) -> Sexpr {
    Sexpr::list(vec![Sexpr::symbol(tag), Sexpr::float(x), Sexpr::float(y)])
}

/// A builder for constructing lists incrementally
#[derive(Debug, Default)]
pub struct ListBuilder {
    items: Vec<Sexpr>,
}

impl ListBuilder {
    /// Start a list whose first element is `name`.
    pub fn node<N: Into<Sexpr>>(name: N) -> Self {
        Self {
            items: vec![name.into()],
        }
    }

    pub fn push<V: Into<Sexpr>>(&mut self, v: V) -> &mut Self {
        self.items.push(v.into());
        self
    }

    pub fn push_if<V: Into<Sexpr>>(&mut self, cond: bool, v: V) -> &mut Self {
        if cond {
            self.items.push(v.into());
        }
        self
    }

    pub fn extend<I, V>(&mut self, iter: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Sexpr>,
    {
        self.items.extend(iter.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Sexpr {
        Sexpr::list(self.items)
    }
}

impl From<&str> for Sexpr {
    fn from(s: &str) -> Self {
        Self::symbol(s)
    }
}

impl From<String> for Sexpr {
    fn from(s: String) -> Self {
        Self::symbol(s)
    }
}

impl From<i64> for Sexpr {
    fn from(n: i64) -> Self {
        Self::int(n)
    }
}

impl From<u32> for Sexpr {
    fn from(n: u32) -> Self {
        Self::int(n as i64)
    }
}

impl From<f64> for Sexpr {
    fn from(f: f64) -> Self {
        Self::float(f)
    }
}

impl From<bool> for Sexpr {
    fn from(b: bool) -> Self {
        Self::symbol(if b { "yes" } else { "no" })
    }
}

impl fmt::Display for Sexpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formatter::to_compact(self))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("unexpected character '{found}' at byte {at}")]
    UnexpectedChar { found: char, at: usize },
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("trailing input after expression at byte {0}")]
    TrailingInput(usize),
}

/// Parse exactly one S-expression from `input`.
pub fn parse(input: &str) -> Result<Sexpr, ParseError> {
    log::trace!("Parsing S-expression from {} bytes of input", input.len());
    let mut parser = Parser { input, pos: 0 };
    let value = parser.value()?;
    parser.skip_whitespace();
    if parser.pos < input.len() {
        return Err(ParseError::TrailingInput(parser.pos));
    }
    Ok(value)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.bump();
            } else if ch == ';' {
                while let Some(ch) = self.bump() {
                    if ch == '\n' {
                        break;
                    }
                }
            } else {
                break;
            }
        }
    }

    fn value(&mut self) -> Result<Sexpr, ParseError> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof),
            Some('(') => self.list(),
            Some(')') => Err(ParseError::UnexpectedChar {
                found: ')',
                at: self.pos,
            }),
            Some('"') => self.string(),
            Some(_) => Ok(self.atom()),
        }
    }

    fn list(&mut self) -> Result<Sexpr, ParseError> {
        self.bump();
        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => return Err(ParseError::UnexpectedEof),
                Some(')') => {
                    self.bump();
                    return Ok(Sexpr::List(items));
                }
                Some(_) => items.push(self.value()?),
            }
        }
    }

    fn string(&mut self) -> Result<Sexpr, ParseError> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(ParseError::UnterminatedString),
                Some('"') => return Ok(Sexpr::String(out)),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some(ch) => out.push(ch),
                    None => return Err(ParseError::UnterminatedString),
                },
                Some(ch) => out.push(ch),
            }
        }
    }

    fn atom(&mut self) -> Sexpr {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' {
                break;
            }
            self.bump();
        }
        let text = &self.input[start..self.pos];
        if let Ok(n) = text.parse::<i64>() {
            Sexpr::Int(n)
        } else if let Ok(f) = text.parse::<f64>() {
            Sexpr::Float(f)
        } else {
            Sexpr::Symbol(text.to_string())
        }
    }
}

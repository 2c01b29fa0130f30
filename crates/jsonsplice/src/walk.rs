//! The relaxed-JSON walker.
//!
//! [`walk`] parses a single JSON value (with optional surrounding
//! whitespace) out of a byte buffer and reports every value it visits to a
//! callback, without building any tree. On success it returns the offset one
//! past the root value; trailing bytes are ignored.
//!
//! The relaxed part of the grammar is object keys: a key may be a quoted
//! string or a bare identifier (ASCII letters, `_`, `$`, or any byte ≥ 0x80
//! to start; digits also allowed after the first byte). Bytes ≥ 0x80 are not
//! validated as UTF-8.
//!
//! # Callback protocol
//!
//! Every value produces at most two calls:
//!
//! 1. at value start — scalars carry their literal span, aggregates an empty
//!    span on the opening delimiter, plus the member key or element index as
//!    the [`Name`];
//! 2. at value end, aggregates only — the span covers the whole aggregate
//!    including both delimiters, and no name is repeated.
//!
//! Both calls carry the value's own path (`.key` / `[index]` components,
//! empty at the root), clipped at [`MAX_PATH_LEN`](crate::MAX_PATH_LEN)
//! bytes.
//!
//! # Examples
//!
//! ```
//! use jsonsplice::{walk, TokenKind};
//!
//! let mut numbers = Vec::new();
//! let consumed = walk(b" {a: [1, 2]} trailing", |_, path, tok| {
//!     if tok.kind == TokenKind::Number {
//!         numbers.push((path.to_vec(), tok.text.to_vec()));
//!     }
//! })
//! .unwrap();
//! assert_eq!(consumed, 12);
//! assert_eq!(numbers[0], (b".a[0]".to_vec(), b"1".to_vec()));
//! ```

use crate::error::ParseError;
use crate::path::PathBuilder;
use crate::token::{Name, Token, TokenKind};

/// Maximum container nesting; exceeding it is [`ParseError::Invalid`].
pub const MAX_DEPTH: usize = 100;

/// Parses the root value in `buf`, reporting tokens to `visit`.
///
/// Returns the number of bytes consumed (leading whitespace plus the value;
/// anything after the value is ignored), or the error class:
/// [`ParseError::Incomplete`] when `buf` is a strict prefix of a valid
/// document, [`ParseError::Invalid`] when no continuation could make it
/// valid.
pub fn walk<'b, F>(buf: &'b [u8], visit: F) -> Result<usize, ParseError>
where
    F: FnMut(Option<Name<'b>>, &[u8], Token<'b>),
{
    let mut w = Walker {
        buf,
        pos: 0,
        depth: 0,
        path: PathBuilder::new(),
        visit,
    };
    w.skip_ws();
    w.value(None)?;
    Ok(w.pos)
}

/// Parses without observing tokens; returns the consumed length.
pub fn validate(buf: &[u8]) -> Result<usize, ParseError> {
    walk(buf, |_, _, _| {})
}

fn is_bare_key_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_bare_key_byte(b: u8) -> bool {
    is_bare_key_start(b) || b.is_ascii_digit()
}

struct Walker<'b, F> {
    buf: &'b [u8],
    pos: usize,
    depth: usize,
    path: PathBuilder,
    visit: F,
}

impl<'b, F> Walker<'b, F>
where
    F: FnMut(Option<Name<'b>>, &[u8], Token<'b>),
{
    fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\r' | b'\n')) {
            self.bump();
        }
    }

    fn report(&mut self, name: Option<Name<'b>>, kind: TokenKind, start: usize, end: usize) {
        let token = Token {
            kind,
            text: &self.buf[start..end],
            offset: start,
        };
        (self.visit)(name, self.path.as_bytes(), token);
    }

    fn value(&mut self, name: Option<Name<'b>>) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(ParseError::Incomplete),
            Some(b'{') => self.object(name),
            Some(b'[') => self.array(name),
            Some(b'"') => {
                let tok = self.string_token()?;
                (self.visit)(name, self.path.as_bytes(), tok);
                Ok(())
            }
            Some(b't') => self.literal(name, b"true", TokenKind::True),
            Some(b'f') => self.literal(name, b"false", TokenKind::False),
            Some(b'n') => self.literal(name, b"null", TokenKind::Null),
            Some(b) if b == b'-' || b.is_ascii_digit() => self.number(name),
            Some(_) => Err(ParseError::Invalid),
        }
    }

    fn literal(
        &mut self,
        name: Option<Name<'b>>,
        text: &'static [u8],
        kind: TokenKind,
    ) -> Result<(), ParseError> {
        let start = self.pos;
        for &expected in text {
            match self.peek() {
                None => return Err(ParseError::Incomplete),
                Some(b) if b == expected => self.bump(),
                Some(_) => return Err(ParseError::Invalid),
            }
        }
        self.report(name, kind, start, self.pos);
        Ok(())
    }

    fn digits(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.bump();
        }
    }

    fn number(&mut self, name: Option<Name<'b>>) -> Result<(), ParseError> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.bump();
        }
        match self.peek() {
            None => return Err(ParseError::Incomplete),
            Some(b'0') => self.bump(),
            Some(b) if b.is_ascii_digit() => self.digits(),
            Some(_) => return Err(ParseError::Invalid),
        }
        if self.peek() == Some(b'.') {
            self.bump();
            match self.peek() {
                None => return Err(ParseError::Incomplete),
                Some(b) if b.is_ascii_digit() => self.digits(),
                Some(_) => return Err(ParseError::Invalid),
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            self.bump();
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.bump();
            }
            match self.peek() {
                None => return Err(ParseError::Incomplete),
                Some(b) if b.is_ascii_digit() => self.digits(),
                Some(_) => return Err(ParseError::Invalid),
            }
        }
        self.report(name, TokenKind::Number, start, self.pos);
        Ok(())
    }

    /// Parses `"…"` and returns the content span; the token does not include
    /// the quotes. Escapes are validated but left as stored.
    fn string_token(&mut self) -> Result<Token<'b>, ParseError> {
        self.bump(); // opening quote
        let start = self.pos;
        loop {
            match self.peek() {
                None => return Err(ParseError::Incomplete),
                Some(b'"') => {
                    let tok = Token {
                        kind: TokenKind::String,
                        text: &self.buf[start..self.pos],
                        offset: start,
                    };
                    self.bump();
                    return Ok(tok);
                }
                Some(b'\\') => {
                    self.bump();
                    self.escape()?;
                }
                Some(b'\t') => self.bump(),
                Some(b'\r') => {
                    // A raw CR is tolerated only as part of a CRLF pair.
                    self.bump();
                    match self.peek() {
                        None => return Err(ParseError::Incomplete),
                        Some(b'\n') => self.bump(),
                        Some(_) => return Err(ParseError::Invalid),
                    }
                }
                Some(b) if b < 0x20 => return Err(ParseError::Invalid),
                Some(_) => self.bump(),
            }
        }
    }

    fn escape(&mut self) -> Result<(), ParseError> {
        match self.peek() {
            None => Err(ParseError::Incomplete),
            Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                self.bump();
                Ok(())
            }
            Some(b'u') => {
                self.bump();
                for _ in 0..4 {
                    match self.peek() {
                        None => return Err(ParseError::Incomplete),
                        Some(b) if b.is_ascii_hexdigit() => self.bump(),
                        Some(_) => return Err(ParseError::Invalid),
                    }
                }
                Ok(())
            }
            Some(_) => Err(ParseError::Invalid),
        }
    }

    /// Parses a member key, returning its content and syntactic start.
    fn key(&mut self) -> Result<(&'b [u8], usize), ParseError> {
        match self.peek() {
            None => Err(ParseError::Incomplete),
            Some(b'"') => {
                let offset = self.pos;
                let tok = self.string_token()?;
                Ok((tok.text, offset))
            }
            Some(b) if is_bare_key_start(b) => {
                let start = self.pos;
                self.bump();
                while matches!(self.peek(), Some(b) if is_bare_key_byte(b)) {
                    self.bump();
                }
                Ok((&self.buf[start..self.pos], start))
            }
            Some(_) => Err(ParseError::Invalid),
        }
    }

    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth == MAX_DEPTH {
            return Err(ParseError::Invalid);
        }
        self.depth += 1;
        Ok(())
    }

    fn object(&mut self, name: Option<Name<'b>>) -> Result<(), ParseError> {
        self.enter()?;
        let start = self.pos;
        self.report(name, TokenKind::ObjectBegin, start, start);
        self.bump(); // '{'
        self.skip_ws();
        if self.peek() == Some(b'}') {
            self.bump();
        } else {
            loop {
                let (text, offset) = self.key()?;
                self.skip_ws();
                match self.peek() {
                    None => return Err(ParseError::Incomplete),
                    Some(b':') => self.bump(),
                    Some(_) => return Err(ParseError::Invalid),
                }
                self.skip_ws();
                let mark = self.path.mark();
                self.path.push_key(text);
                self.value(Some(Name::Key { text, offset }))?;
                self.path.rewind(mark);
                self.skip_ws();
                match self.peek() {
                    None => return Err(ParseError::Incomplete),
                    Some(b',') => {
                        self.bump();
                        self.skip_ws();
                    }
                    Some(b'}') => {
                        self.bump();
                        break;
                    }
                    Some(_) => return Err(ParseError::Invalid),
                }
            }
        }
        self.depth -= 1;
        self.report(None, TokenKind::ObjectEnd, start, self.pos);
        Ok(())
    }

    fn array(&mut self, name: Option<Name<'b>>) -> Result<(), ParseError> {
        self.enter()?;
        let start = self.pos;
        self.report(name, TokenKind::ArrayBegin, start, start);
        self.bump(); // '['
        self.skip_ws();
        if self.peek() == Some(b']') {
            self.bump();
        } else {
            let mut index = 0;
            loop {
                let mark = self.path.mark();
                self.path.push_index(index);
                self.value(Some(Name::Index(index)))?;
                self.path.rewind(mark);
                self.skip_ws();
                match self.peek() {
                    None => return Err(ParseError::Incomplete),
                    Some(b',') => {
                        self.bump();
                        self.skip_ws();
                        index += 1;
                    }
                    Some(b']') => {
                        self.bump();
                        break;
                    }
                    Some(_) => return Err(ParseError::Invalid),
                }
            }
        }
        self.depth -= 1;
        self.report(None, TokenKind::ArrayEnd, start, self.pos);
        Ok(())
    }
}

//! Canonical re-indentation.
//!
//! [`prettify`] re-emits a document with each member and element on its own
//! line, two spaces of indent per nesting level, and `": "` between key and
//! value. Keys come out quoted even when the input spelled them bare;
//! scalar literal text is preserved byte-for-byte, so numbers and string
//! escapes survive untouched. Prettifying is idempotent.
//!
//! # Examples
//!
//! ```
//! use jsonsplice::prettify;
//!
//! let mut out = Vec::new();
//! prettify(br#"{a:1, b:[true]}"#, &mut out).unwrap();
//! assert_eq!(out, b"{\n  \"a\": 1,\n  \"b\": [\n    true\n  ]\n}");
//! ```

use alloc::vec::Vec;

use crate::error::{EmitError, Error};
use crate::sink::Sink;
use crate::token::{Name, TokenKind};
use crate::walk::walk;

struct Writer<'w> {
    out: &'w mut dyn Sink,
    count: usize,
    failed: Option<EmitError>,
}

impl Writer<'_> {
    fn put(&mut self, data: &[u8]) {
        if self.failed.is_some() {
            return;
        }
        match self.out.put(data) {
            Ok(_) => self.count += data.len(),
            Err(e) => self.failed = Some(e),
        }
    }

    fn indent(&mut self, levels: usize) {
        for _ in 0..levels {
            self.put(b"  ");
        }
    }
}

/// Re-emits `buf` with canonical whitespace; returns bytes written.
pub fn prettify(buf: &[u8], out: &mut dyn Sink) -> Result<usize, Error> {
    let mut w = Writer {
        out,
        count: 0,
        failed: None,
    };
    // One entry per open aggregate: how many children it has emitted.
    let mut children: Vec<usize> = Vec::new();

    walk(buf, |name, _path, tok| {
        match tok.kind {
            TokenKind::ObjectBegin | TokenKind::ArrayBegin => {
                separate(&mut w, &mut children, name);
                w.put(if tok.kind == TokenKind::ObjectBegin {
                    b"{"
                } else {
                    b"["
                });
                children.push(0);
            }
            TokenKind::ObjectEnd | TokenKind::ArrayEnd => {
                let emitted = children.pop().unwrap_or(0);
                if emitted > 0 {
                    w.put(b"\n");
                    w.indent(children.len());
                }
                w.put(if tok.kind == TokenKind::ObjectEnd {
                    b"}"
                } else {
                    b"]"
                });
            }
            TokenKind::String => {
                separate(&mut w, &mut children, name);
                w.put(b"\"");
                w.put(tok.text);
                w.put(b"\"");
            }
            _ => {
                separate(&mut w, &mut children, name);
                w.put(tok.text);
            }
        }
    })?;

    if let Some(e) = w.failed {
        return Err(e.into());
    }
    Ok(w.count)
}

/// Emits the comma/newline/indent before a child, plus its quoted key.
fn separate(w: &mut Writer<'_>, children: &mut Vec<usize>, name: Option<Name<'_>>) {
    if let Some(emitted) = children.last_mut() {
        if *emitted > 0 {
            w.put(b",");
        }
        *emitted += 1;
        w.put(b"\n");
    }
    w.indent(children.len());
    if let Some(Name::Key { text, .. }) = name {
        w.put(b"\"");
        w.put(text);
        w.put(b"\": ");
    }
}

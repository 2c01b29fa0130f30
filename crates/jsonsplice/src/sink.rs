//! Write-only targets for emitted bytes.
//!
//! Emitters report the number of bytes an unbounded sink would have
//! received; a bounded [`BufSink`] silently stores what fits, so the caller
//! can size a second pass from the first's return value, `snprintf`-style.

use alloc::vec::Vec;

use crate::error::EmitError;

/// A byte sink fed by the emitter, mutator, and pretty-printer.
pub trait Sink {
    /// Writes `data`, returning how many bytes were actually stored.
    ///
    /// Storing fewer bytes than offered (truncation) is not an error and
    /// does not stop emission. `Err` is reserved for fatal failures of the
    /// underlying writer.
    fn put(&mut self, data: &[u8]) -> Result<usize, EmitError>;
}

impl Sink for Vec<u8> {
    fn put(&mut self, data: &[u8]) -> Result<usize, EmitError> {
        self.extend_from_slice(data);
        Ok(data.len())
    }
}

/// A fixed-capacity sink that truncates once full.
pub struct BufSink<'a> {
    buf: &'a mut [u8],
    used: usize,
}

impl<'a> BufSink<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, used: 0 }
    }

    /// The bytes stored so far.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.used]
    }
}

impl Sink for BufSink<'_> {
    fn put(&mut self, data: &[u8]) -> Result<usize, EmitError> {
        let room = self.buf.len() - self.used;
        let n = room.min(data.len());
        self.buf[self.used..self.used + n].copy_from_slice(&data[..n]);
        self.used += n;
        Ok(n)
    }
}

/// Adapts any [`std::io::Write`] into a sink.
///
/// The first I/O failure is kept for inspection via [`IoSink::take_error`];
/// the emitter sees it as [`EmitError::Sink`].
#[cfg(feature = "std")]
pub struct IoSink<W: std::io::Write> {
    inner: W,
    error: Option<std::io::Error>,
}

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    pub fn take_error(&mut self) -> Option<std::io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> Sink for IoSink<W> {
    fn put(&mut self, data: &[u8]) -> Result<usize, EmitError> {
        match self.inner.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                if self.error.is_none() {
                    self.error = Some(e);
                }
                Err(EmitError::Sink)
            }
        }
    }
}

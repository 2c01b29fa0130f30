//! File-backed conveniences over the in-memory operations.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::vec::Vec;

use crate::emit::{printf, Arg};
use crate::error::{EmitError, Error};
use crate::pretty::prettify;
use crate::sink::{IoSink, Sink};

/// Reads a whole file.
pub fn fread<P: AsRef<Path>>(path: P) -> io::Result<Vec<u8>> {
    fs::read(path)
}

/// Expands `fmt` over `args` into a freshly created file, appending a final
/// newline. Returns the bytes written including that newline.
pub fn fprintf<P: AsRef<Path>>(path: P, fmt: &str, args: &[Arg]) -> Result<usize, Error> {
    let file = fs::File::create(path)?;
    let mut sink = IoSink::new(BufWriter::new(file));
    let result = printf(&mut sink, fmt, args).and_then(|n| sink.put(b"\n").map(|_| n + 1));
    let n = result.map_err(|e| sink_error(&mut sink, e))?;
    sink.into_inner().flush()?;
    Ok(n)
}

/// Reads, prettifies, and atomically replaces `path`, appending a final
/// newline. A file that does not parse is left untouched.
pub fn prettify_file<P: AsRef<Path>>(path: P) -> Result<usize, Error> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp = tempfile::NamedTempFile::new_in(dir.unwrap_or_else(|| Path::new(".")))?;
    let mut sink = IoSink::new(BufWriter::new(tmp));

    let result = prettify(&data, &mut sink).and_then(|n| {
        sink.put(b"\n")?;
        Ok(n + 1)
    });
    let n = match result {
        Ok(n) => n,
        Err(Error::Emit(e)) => return Err(sink_error(&mut sink, e)),
        Err(other) => return Err(other),
    };

    let tmp = sink
        .into_inner()
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    tmp.persist(path).map_err(|e| Error::Io(e.error))?;
    Ok(n)
}

/// Prefers the sink's recorded I/O error over the generic emit failure.
fn sink_error<W: Write>(sink: &mut IoSink<W>, fallback: EmitError) -> Error {
    match sink.take_error() {
        Some(io) => Error::Io(io),
        None => Error::Emit(fallback),
    }
}

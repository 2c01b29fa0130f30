use thiserror::Error;

/// Why a buffer failed to parse.
///
/// Successful parses return the number of bytes consumed instead; these two
/// variants are the spec's `INCOMPLETE` / `INVALID` statuses.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input is a strict prefix of a valid document; more bytes could
    /// complete it.
    #[error("input ends before the value is complete")]
    Incomplete,
    /// The input cannot be completed into a valid document.
    #[error("input is not valid JSON")]
    Invalid,
}

/// Why the emitter stopped.
///
/// Truncation by a bounded sink is *not* an error; the emitter keeps
/// counting and reports the unbounded size.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum EmitError {
    /// The sink reported a fatal write failure.
    #[error("sink rejected further output")]
    Sink,
    /// A conversion had no argument, or an argument of the wrong shape.
    #[error("format directives do not match the supplied arguments")]
    Args,
}

/// Combined error for operations that both parse and emit.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Emit(#[from] EmitError),
    #[cfg(feature = "std")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

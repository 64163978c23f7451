use thiserror::Error;

/// Reasons a byte buffer is not a well-formed instruction stream.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// The buffer contains no bytes at all.
    #[error("empty buffer")]
    Empty,
    /// An opcode was requested past the end of the buffer.
    #[error("unexpected end of buffer")]
    UnexpectedEnd,
    /// An opcode declares more operand bytes than remain.
    #[error("opcode 0x{opcode:02X} needs {needed} operand bytes but {remaining} remain")]
    Truncated {
        opcode: u8,
        needed: usize,
        remaining: usize,
    },
    /// The byte is not a known opcode.
    #[error("unrecognized opcode 0x{0:02X}")]
    UnrecognizedOpcode(u8),
    /// A string operand runs to the end of the buffer without a terminator.
    #[error("string operand is not terminated")]
    UnterminatedString,
    /// A string operand is not valid UTF-16.
    #[error("string operand is not valid UTF-16")]
    InvalidString,
    /// Bytes follow the end-marker.
    #[error("{0} bytes follow the end-marker")]
    TrailingBytes(usize),
    /// The stream ends without an end-marker where one is required.
    #[error("missing end-marker")]
    MissingTerminator,
}

/// A malformed instruction stream, with the offset of the offending opcode.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("malformed stream at offset {offset:#x}: {kind}")]
pub struct StreamError {
    pub offset: usize,
    pub kind: StreamErrorKind,
}

impl StreamError {
    pub fn new(offset: usize, kind: StreamErrorKind) -> Self {
        StreamError { offset, kind }
    }
}

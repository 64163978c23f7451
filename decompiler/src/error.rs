//! Error types for decoding and encoding.

use ezstate_bytecode::{EmitError, IntWidth, StreamError};
use ezstate_expr::Expr;
use thiserror::Error;

/// Reasons a buffer cannot be decompiled.
///
/// Every variant means the buffer as a whole is rejected; no partial tree
/// is ever returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer is truncated, contains an unknown opcode, or is otherwise
    /// not a valid instruction stream.
    #[error(transparent)]
    MalformedStream(#[from] StreamError),
    /// An operator needs more operands than the stack holds.
    #[error("stack underflow at offset {offset:#x}: opcode 0x{opcode:02X} needs {needed} operands but {available} are available")]
    StackUnderflow {
        offset: usize,
        opcode: u8,
        needed: usize,
        available: usize,
    },
    /// Decoding finished with other than exactly one value on the stack.
    /// Carries the remaining values for diagnostics.
    #[error("unbalanced expression: {} values remain on the stack", stack.len())]
    UnbalancedExpression { stack: Vec<Expr> },
    /// The caller's command metadata has no argument count for a command.
    #[error("no argument count for command {bank}:{id} at offset {offset:#x}")]
    UnknownCommand { offset: usize, bank: u8, id: i32 },
    #[error("stack overflow at offset {offset:#x}: more than {limit} values")]
    StackOverflow { offset: usize, limit: usize },
    #[error("expression at offset {offset:#x} nests deeper than {limit}")]
    NestingTooDeep { offset: usize, limit: usize },
}

impl DecodeError {
    /// Returns the byte offset where decoding failed, if it failed at a
    /// specific instruction.
    pub fn offset(&self) -> Option<usize> {
        match self {
            DecodeError::MalformedStream(err) => Some(err.offset),
            DecodeError::StackUnderflow { offset, .. }
            | DecodeError::UnknownCommand { offset, .. }
            | DecodeError::StackOverflow { offset, .. }
            | DecodeError::NestingTooDeep { offset, .. } => Some(*offset),
            DecodeError::UnbalancedExpression { .. } => None,
        }
    }
}

/// Reasons a tree cannot be encoded.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// An integer constant does not fit its declared width.
    #[error("constant {value} cannot be encoded losslessly at {width} width")]
    EncodeWidthMismatch { value: i64, width: IntWidth },
    #[error("string constant contains an embedded NUL")]
    InteriorNul,
    #[error("parameter slot {0} is out of range")]
    ParameterOutOfRange(u8),
    #[error("function call with {0} arguments exceeds the encodable maximum")]
    TooManyArguments(usize),
    /// A command call disagrees with the command metadata, so the encoded
    /// bytes would not decode back to the same tree.
    #[error("command {bank}:{id} takes {expected} arguments but the call has {actual}")]
    ArityMismatch {
        bank: u8,
        id: i32,
        expected: usize,
        actual: usize,
    },
    #[error("command {bank}:{id} has no argument count")]
    UnknownCommand { bank: u8, id: i32 },
    /// The bytecode would need more stack than a decoder allows.
    #[error("encoded expression needs {depth} stack values but the limit is {limit}")]
    StackOverflow { depth: usize, limit: usize },
    #[error("expression nests deeper than {limit}")]
    NestingTooDeep { limit: usize },
}

impl From<EmitError> for EncodeError {
    fn from(e: EmitError) -> Self {
        match e {
            EmitError::OutOfRange(range) => EncodeError::EncodeWidthMismatch {
                value: range.value,
                width: range.width,
            },
            EmitError::InteriorNul => EncodeError::InteriorNul,
            EmitError::ParameterOutOfRange(index) => EncodeError::ParameterOutOfRange(index),
            EmitError::TooManyArguments(args) => EncodeError::TooManyArguments(args),
        }
    }
}

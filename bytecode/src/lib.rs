//! Low-level access to EzState expression bytecode.
//!
//! An expression is a flat postfix program: pushes of constants and
//! parameter slots, operators that pop their operands, calls, and an
//! optional end-marker. This crate knows the byte layout only; building
//! expression trees happens in `ezstate-decompiler`.

mod error;
mod instruction;
mod listing;
pub mod opcode;
mod operator;
mod reader;
mod width;
mod writer;

pub use error::{StreamError, StreamErrorKind};
pub use instruction::Instruction;
pub use listing::{disassemble, Listing};
pub use operator::{BinaryOperator, UnaryOperator};
pub use reader::TokenReader;
pub use width::{IntWidth, OutOfRange};
pub use writer::{EmitError, Emitter};

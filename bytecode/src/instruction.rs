use std::fmt;

use crate::operator::{BinaryOperator, UnaryOperator};
use crate::width::IntWidth;

/// A single decoded instruction with its immediate operands.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    /// Pushes an integer stored at the given width.
    PushInt { value: i64, width: IntWidth },
    PushF32(f32),
    PushF64(f64),
    PushString(String),
    /// Pushes the value of a parameter slot.
    PushParameter(u8),
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    /// Calls the function whose id sits beneath `args` arguments.
    CallFunction { args: usize },
    /// Calls a command; the argument count comes from command metadata.
    CallCommand { bank: u8, id: i32 },
    End,
}

impl Instruction {
    /// Returns true for instructions that push a single value without
    /// consuming any.
    pub fn is_push(&self) -> bool {
        matches!(
            self,
            Instruction::PushInt { .. }
                | Instruction::PushF32(_)
                | Instruction::PushF64(_)
                | Instruction::PushString(_)
                | Instruction::PushParameter(_)
        )
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::PushInt { value, width } => match width {
                IntWidth::Inline => write!(f, "PUSH_INLINE {value}"),
                IntWidth::U16 => write!(f, "PUSH_U16 {value}"),
                IntWidth::I32 => write!(f, "PUSH_I32 {value}"),
            },
            Instruction::PushF32(v) => write!(f, "PUSH_F32 {v:?}"),
            Instruction::PushF64(v) => write!(f, "PUSH_F64 {v:?}"),
            Instruction::PushString(s) => write!(f, "PUSH_STRING {s:?}"),
            Instruction::PushParameter(index) => write!(f, "GET_REG {index}"),
            Instruction::Unary(op) => f.write_str(op.mnemonic()),
            Instruction::Binary(op) => f.write_str(op.mnemonic()),
            Instruction::CallFunction { args } => write!(f, "CALL {args}"),
            Instruction::CallCommand { bank, id } => write!(f, "CALL_COMMAND {bank}:{id}"),
            Instruction::End => f.write_str("END"),
        }
    }
}

//! Low-level bytecode emitter.
//!
//! Provides a builder that appends opcodes and operands to a byte buffer.

use thiserror::Error;

use crate::opcode;
use crate::operator::{BinaryOperator, UnaryOperator};
use crate::width::{IntWidth, OutOfRange};

/// Values the instruction stream has no encoding for.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EmitError {
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
    /// Strings are NUL terminated, so they cannot contain NUL.
    #[error("string contains an embedded NUL")]
    InteriorNul,
    #[error("parameter slot {0} is out of range")]
    ParameterOutOfRange(u8),
    #[error("function call with {0} arguments exceeds the maximum of {max}", max = opcode::MAX_CALL_ARGS)]
    TooManyArguments(usize),
}

/// Accumulates bytecode instructions.
#[derive(Debug, Default)]
pub struct Emitter {
    bytecode: Vec<u8>,
    max_stack_depth: usize,
    current_stack_depth: usize,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter::default()
    }

    /// Emits an integer push at exactly the given width.
    pub fn emit_push_int(&mut self, value: i64, width: IntWidth) -> Result<(), EmitError> {
        if !width.contains(value) {
            return Err(OutOfRange { value, width }.into());
        }
        match width {
            IntWidth::Inline => {
                self.bytecode.push((value + opcode::INLINE_BIAS) as u8);
            }
            IntWidth::U16 => {
                self.bytecode.push(opcode::PUSH_U16);
                self.bytecode
                    .extend_from_slice(&(value as u16).to_le_bytes());
            }
            IntWidth::I32 => {
                self.bytecode.push(opcode::PUSH_I32);
                self.bytecode
                    .extend_from_slice(&(value as i32).to_le_bytes());
            }
        }
        self.push_stack(1);
        Ok(())
    }

    /// Emits PUSH_F32.
    pub fn emit_push_f32(&mut self, value: f32) {
        self.bytecode.push(opcode::PUSH_F32);
        self.bytecode.extend_from_slice(&value.to_le_bytes());
        self.push_stack(1);
    }

    /// Emits PUSH_F64.
    pub fn emit_push_f64(&mut self, value: f64) {
        self.bytecode.push(opcode::PUSH_F64);
        self.bytecode.extend_from_slice(&value.to_le_bytes());
        self.push_stack(1);
    }

    /// Emits PUSH_STRING with UTF-16LE code units and the terminator.
    pub fn emit_push_string(&mut self, value: &str) -> Result<(), EmitError> {
        if value.contains('\0') {
            return Err(EmitError::InteriorNul);
        }
        self.bytecode.push(opcode::PUSH_STRING);
        for unit in value.encode_utf16() {
            self.bytecode.extend_from_slice(&unit.to_le_bytes());
        }
        self.bytecode.extend_from_slice(&[0x00, 0x00]);
        self.push_stack(1);
        Ok(())
    }

    /// Emits GET_REG_n for a parameter slot.
    pub fn emit_push_parameter(&mut self, index: u8) -> Result<(), EmitError> {
        if index >= opcode::NUM_REGISTERS {
            return Err(EmitError::ParameterOutOfRange(index));
        }
        self.bytecode.push(opcode::GET_REG_0 + index);
        self.push_stack(1);
        Ok(())
    }

    /// Emits a unary operator (pops one, pushes one).
    pub fn emit_unary(&mut self, op: UnaryOperator) {
        self.bytecode.push(op.opcode());
        // Net effect: pop 1, push 1 = no change to stack depth
    }

    /// Emits a binary operator (pops two, pushes one).
    pub fn emit_binary(&mut self, op: BinaryOperator) {
        self.bytecode.push(op.opcode());
        // Net effect: pop 2, push 1 = pop 1
        self.pop_stack(1);
    }

    /// Emits CALL_n (pops the arguments and the function id, pushes one).
    pub fn emit_call(&mut self, args: usize) -> Result<(), EmitError> {
        if args > opcode::MAX_CALL_ARGS {
            return Err(EmitError::TooManyArguments(args));
        }
        self.bytecode.push(opcode::CALL_0 + args as u8);
        // Net effect: pop args + 1, push 1 = pop args
        self.pop_stack(args);
        Ok(())
    }

    /// Emits CALL_COMMAND (pops the arguments, pushes one).
    pub fn emit_command(&mut self, bank: u8, id: i32, args: usize) {
        self.bytecode.push(opcode::CALL_COMMAND);
        self.bytecode.push(bank);
        self.bytecode.extend_from_slice(&id.to_le_bytes());
        self.pop_stack(args);
        self.push_stack(1);
    }

    /// Emits END.
    pub fn emit_end(&mut self) {
        self.bytecode.push(opcode::END);
    }

    /// Returns the accumulated bytecode.
    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Consumes the emitter and returns the accumulated bytecode.
    pub fn into_bytecode(self) -> Vec<u8> {
        self.bytecode
    }

    /// Returns the maximum stack depth reached during emission.
    pub fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    fn push_stack(&mut self, count: usize) {
        self.current_stack_depth += count;
        if self.current_stack_depth > self.max_stack_depth {
            self.max_stack_depth = self.current_stack_depth;
        }
    }

    fn pop_stack(&mut self, count: usize) {
        self.current_stack_depth = self.current_stack_depth.saturating_sub(count);
    }
}

//! Bytecode opcode definitions shared between the decompiler and recompiler.

/// First opcode of the inline integer range.
/// The pushed value is the opcode minus [`INLINE_BIAS`].
pub const PUSH_INLINE_FIRST: u8 = 0x00;

/// Last opcode of the inline integer range.
pub const PUSH_INLINE_LAST: u8 = 0x7F;

/// Bias subtracted from an inline integer opcode to get its value.
pub const INLINE_BIAS: i64 = 64;

/// Push a 32-bit float.
/// Operand: 4 bytes IEEE-754 (little-endian).
pub const PUSH_F32: u8 = 0x80;

/// Push a 64-bit float.
/// Operand: 8 bytes IEEE-754 (little-endian).
pub const PUSH_F64: u8 = 0x81;

/// Push a signed 32-bit integer.
/// Operand: 4 bytes (little-endian).
pub const PUSH_I32: u8 = 0x82;

/// Push an unsigned 16-bit integer.
/// Operand: 2 bytes (little-endian).
pub const PUSH_U16: u8 = 0x83;

/// Call a function with no arguments.
/// `CALL_0 + n` calls with `n` arguments, up to [`CALL_LAST`].
/// Pops the arguments, then the function id, pushes the result.
pub const CALL_0: u8 = 0x84;

/// Call a function with [`MAX_CALL_ARGS`] arguments.
pub const CALL_LAST: u8 = 0x8A;

/// Largest argument count a function call opcode can encode.
pub const MAX_CALL_ARGS: usize = (CALL_LAST - CALL_0) as usize;

/// Call a command from a command bank.
/// Operands: u8 bank, i32 command id (little-endian).
/// The argument count is not encoded; it comes from command metadata.
pub const CALL_COMMAND: u8 = 0x8B;

/// Negate. Pops one value, pushes one.
pub const NEG: u8 = 0x8C;

/// Pops two values (b then a), pushes a + b.
pub const ADD: u8 = 0x8D;

/// Pops two values (b then a), pushes a - b.
pub const SUB: u8 = 0x8E;

/// Pops two values (b then a), pushes a * b.
pub const MUL: u8 = 0x8F;

/// Pops two values (b then a), pushes a / b.
pub const DIV: u8 = 0x90;

/// Pops two values (b then a), pushes a <= b.
pub const LE: u8 = 0x91;

/// Pops two values (b then a), pushes a >= b.
pub const GE: u8 = 0x92;

/// Pops two values (b then a), pushes a < b.
pub const LT: u8 = 0x93;

/// Pops two values (b then a), pushes a > b.
pub const GT: u8 = 0x94;

/// Pops two values (b then a), pushes a == b.
pub const EQ: u8 = 0x95;

/// Pops two values (b then a), pushes a != b.
pub const NE: u8 = 0x96;

/// Pops two values (b then a), pushes a && b.
pub const AND: u8 = 0x98;

/// Pops two values (b then a), pushes a || b.
pub const OR: u8 = 0x99;

/// Logical not. Pops one value, pushes one.
pub const NOT: u8 = 0x9A;

/// Marks the end of an expression.
pub const END: u8 = 0xA1;

/// Push a string.
/// Operand: UTF-16LE code units terminated by a 0x0000 unit.
pub const PUSH_STRING: u8 = 0xA5;

/// Push parameter slot 0.
/// `GET_REG_0 + n` pushes slot `n`, up to [`GET_REG_LAST`].
pub const GET_REG_0: u8 = 0xAF;

/// Push parameter slot 7.
pub const GET_REG_LAST: u8 = 0xB6;

/// Number of addressable parameter slots.
pub const NUM_REGISTERS: u8 = GET_REG_LAST - GET_REG_0 + 1;

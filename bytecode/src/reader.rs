use crate::error::{StreamError, StreamErrorKind};
use crate::instruction::Instruction;
use crate::opcode;
use crate::operator::{BinaryOperator, UnaryOperator};
use crate::width::IntWidth;

/// Sequential reader over an instruction stream.
///
/// Borrows the underlying byte slice and decodes one instruction per call.
/// The only state is the cursor position.
#[derive(Clone, Debug)]
pub struct TokenReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> TokenReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_offset(bytes, 0)
    }

    /// Creates a reader that starts at `offset`. An offset past the end
    /// yields a reader that is already at the end.
    pub fn with_offset(bytes: &'a [u8], offset: usize) -> Self {
        TokenReader {
            bytes,
            pos: offset.min(bytes.len()),
        }
    }

    /// Returns the offset of the next opcode.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Returns the bytes that have not been read yet.
    pub fn remaining(&self) -> &'a [u8] {
        &self.bytes[self.pos..]
    }

    /// Reads the next instruction and returns it with the number of bytes
    /// it occupied.
    ///
    /// On error the cursor stays at the offending opcode.
    pub fn read_opcode(&mut self) -> Result<(Instruction, usize), StreamError> {
        let start = self.pos;
        match self.read_instruction(start) {
            Ok(instruction) => Ok((instruction, self.pos - start)),
            Err(err) => {
                self.pos = start;
                Err(err)
            }
        }
    }

    fn read_instruction(&mut self, start: usize) -> Result<Instruction, StreamError> {
        let op = *self
            .bytes
            .get(start)
            .ok_or(StreamError::new(start, StreamErrorKind::UnexpectedEnd))?;
        self.pos += 1;

        let instruction = match op {
            opcode::PUSH_INLINE_FIRST..=opcode::PUSH_INLINE_LAST => Instruction::PushInt {
                value: op as i64 - opcode::INLINE_BIAS,
                width: IntWidth::Inline,
            },
            opcode::PUSH_F32 => Instruction::PushF32(f32::from_le_bytes(self.operand(start, op)?)),
            opcode::PUSH_F64 => Instruction::PushF64(f64::from_le_bytes(self.operand(start, op)?)),
            opcode::PUSH_I32 => Instruction::PushInt {
                value: i32::from_le_bytes(self.operand(start, op)?) as i64,
                width: IntWidth::I32,
            },
            opcode::PUSH_U16 => Instruction::PushInt {
                value: u16::from_le_bytes(self.operand(start, op)?) as i64,
                width: IntWidth::U16,
            },
            opcode::CALL_0..=opcode::CALL_LAST => Instruction::CallFunction {
                args: (op - opcode::CALL_0) as usize,
            },
            opcode::CALL_COMMAND => {
                let [bank, id @ ..] = self.operand::<5>(start, op)?;
                Instruction::CallCommand {
                    bank,
                    id: i32::from_le_bytes(id),
                }
            }
            opcode::END => Instruction::End,
            opcode::PUSH_STRING => Instruction::PushString(self.read_string(start)?),
            opcode::GET_REG_0..=opcode::GET_REG_LAST => {
                Instruction::PushParameter(op - opcode::GET_REG_0)
            }
            _ => {
                if let Some(unary) = UnaryOperator::from_opcode(op) {
                    Instruction::Unary(unary)
                } else if let Some(binary) = BinaryOperator::from_opcode(op) {
                    Instruction::Binary(binary)
                } else {
                    return Err(StreamError::new(
                        start,
                        StreamErrorKind::UnrecognizedOpcode(op),
                    ));
                }
            }
        };

        Ok(instruction)
    }

    /// Reads a fixed-size operand following the opcode at `start`.
    fn operand<const N: usize>(&mut self, start: usize, op: u8) -> Result<[u8; N], StreamError> {
        let remaining = self.bytes.len() - self.pos;
        let slice = self.bytes.get(self.pos..self.pos + N).ok_or(StreamError::new(
            start,
            StreamErrorKind::Truncated {
                opcode: op,
                needed: N,
                remaining,
            },
        ))?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(slice);
        self.pos += N;
        Ok(buf)
    }

    /// Reads UTF-16LE code units up to and including the 0x0000 terminator.
    fn read_string(&mut self, start: usize) -> Result<String, StreamError> {
        let mut units = Vec::new();
        loop {
            let pair = self
                .bytes
                .get(self.pos..self.pos + 2)
                .ok_or(StreamError::new(start, StreamErrorKind::UnterminatedString))?;
            self.pos += 2;
            let unit = u16::from_le_bytes([pair[0], pair[1]]);
            if unit == 0 {
                break;
            }
            units.push(unit);
        }
        String::from_utf16(&units)
            .map_err(|_| StreamError::new(start, StreamErrorKind::InvalidString))
    }
}

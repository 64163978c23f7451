//! Disassembly of an instruction stream into an offset-annotated listing.

use crate::error::{StreamError, StreamErrorKind};
use crate::instruction::Instruction;
use crate::reader::TokenReader;

/// One decoded instruction and where it sits in the buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub offset: usize,
    pub length: usize,
    pub instruction: Instruction,
}

/// Decodes every instruction in `bytes`, stopping after the end-marker.
///
/// Unlike decompiling, this does not check stack balance, so it can show
/// the shape of a buffer that does not form a valid expression. Bytes after
/// the end-marker are still reported as an error.
pub fn disassemble(bytes: &[u8]) -> Result<Vec<Listing>, StreamError> {
    if bytes.is_empty() {
        return Err(StreamError::new(0, StreamErrorKind::Empty));
    }

    let mut reader = TokenReader::new(bytes);
    let mut listing = Vec::new();
    while !reader.at_end() {
        let offset = reader.position();
        let (instruction, length) = reader.read_opcode()?;
        let is_end = instruction == Instruction::End;
        listing.push(Listing {
            offset,
            length,
            instruction,
        });
        if is_end {
            if !reader.at_end() {
                return Err(StreamError::new(
                    reader.position(),
                    StreamErrorKind::TrailingBytes(reader.remaining().len()),
                ));
            }
            break;
        }
    }
    Ok(listing)
}

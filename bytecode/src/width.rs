use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::opcode;

/// Declared storage width of an integer constant.
///
/// The width is part of the constant's identity: re-encoding a constant
/// must use the same width it was decoded from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    /// Stored in the opcode byte itself.
    Inline,
    /// Two byte unsigned operand.
    U16,
    /// Four byte signed operand.
    I32,
}

impl IntWidth {
    pub const ALL: [IntWidth; 3] = [IntWidth::Inline, IntWidth::U16, IntWidth::I32];

    /// Returns the number of operand bytes after the opcode. Inline values
    /// live in the opcode byte itself.
    pub fn operand_width(&self) -> usize {
        match self {
            IntWidth::Inline => 0,
            IntWidth::U16 => 2,
            IntWidth::I32 => 4,
        }
    }

    /// Returns the range of values representable at this width.
    pub fn range(&self) -> RangeInclusive<i64> {
        match self {
            IntWidth::Inline => {
                (opcode::PUSH_INLINE_FIRST as i64 - opcode::INLINE_BIAS)
                    ..=(opcode::PUSH_INLINE_LAST as i64 - opcode::INLINE_BIAS)
            }
            IntWidth::U16 => 0..=u16::MAX as i64,
            IntWidth::I32 => i32::MIN as i64..=i32::MAX as i64,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.range().contains(&value)
    }

    /// Returns the width the game tools would pick for `value`: inline
    /// when it fits, otherwise four bytes.
    ///
    /// Returns `None` when the value does not fit any width.
    pub fn canonical_for(value: i64) -> Option<IntWidth> {
        [IntWidth::Inline, IntWidth::I32]
            .into_iter()
            .find(|width| width.contains(value))
    }

    /// Returns the human-readable name for this width.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntWidth::Inline => "inline",
            IntWidth::U16 => "u16",
            IntWidth::I32 => "i32",
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An integer that cannot be stored losslessly at its declared width.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("value {value} does not fit in {width} width")]
pub struct OutOfRange {
    pub value: i64,
    pub width: IntWidth,
}

use crate::opcode;

/// Operators taking a single operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Neg,
    Not,
}

impl UnaryOperator {
    pub const ALL: [UnaryOperator; 2] = [UnaryOperator::Neg, UnaryOperator::Not];

    pub fn opcode(&self) -> u8 {
        match self {
            UnaryOperator::Neg => opcode::NEG,
            UnaryOperator::Not => opcode::NOT,
        }
    }

    pub fn from_opcode(op: u8) -> Option<Self> {
        match op {
            opcode::NEG => Some(UnaryOperator::Neg),
            opcode::NOT => Some(UnaryOperator::Not),
            _ => None,
        }
    }

    /// Returns the disassembly mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            UnaryOperator::Neg => "NEG",
            UnaryOperator::Not => "NOT",
        }
    }
}

/// Operators taking two operands.
///
/// Covers arithmetic, comparison and logical operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Le,
    Ge,
    Lt,
    Gt,
    Eq,
    Ne,
    And,
    Or,
}

impl BinaryOperator {
    pub const ALL: [BinaryOperator; 12] = [
        BinaryOperator::Add,
        BinaryOperator::Sub,
        BinaryOperator::Mul,
        BinaryOperator::Div,
        BinaryOperator::Le,
        BinaryOperator::Ge,
        BinaryOperator::Lt,
        BinaryOperator::Gt,
        BinaryOperator::Eq,
        BinaryOperator::Ne,
        BinaryOperator::And,
        BinaryOperator::Or,
    ];

    pub fn opcode(&self) -> u8 {
        match self {
            BinaryOperator::Add => opcode::ADD,
            BinaryOperator::Sub => opcode::SUB,
            BinaryOperator::Mul => opcode::MUL,
            BinaryOperator::Div => opcode::DIV,
            BinaryOperator::Le => opcode::LE,
            BinaryOperator::Ge => opcode::GE,
            BinaryOperator::Lt => opcode::LT,
            BinaryOperator::Gt => opcode::GT,
            BinaryOperator::Eq => opcode::EQ,
            BinaryOperator::Ne => opcode::NE,
            BinaryOperator::And => opcode::AND,
            BinaryOperator::Or => opcode::OR,
        }
    }

    pub fn from_opcode(op: u8) -> Option<Self> {
        match op {
            opcode::ADD => Some(BinaryOperator::Add),
            opcode::SUB => Some(BinaryOperator::Sub),
            opcode::MUL => Some(BinaryOperator::Mul),
            opcode::DIV => Some(BinaryOperator::Div),
            opcode::LE => Some(BinaryOperator::Le),
            opcode::GE => Some(BinaryOperator::Ge),
            opcode::LT => Some(BinaryOperator::Lt),
            opcode::GT => Some(BinaryOperator::Gt),
            opcode::EQ => Some(BinaryOperator::Eq),
            opcode::NE => Some(BinaryOperator::Ne),
            opcode::AND => Some(BinaryOperator::And),
            opcode::OR => Some(BinaryOperator::Or),
            _ => None,
        }
    }

    /// Returns the disassembly mnemonic.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            BinaryOperator::Add => "ADD",
            BinaryOperator::Sub => "SUB",
            BinaryOperator::Mul => "MUL",
            BinaryOperator::Div => "DIV",
            BinaryOperator::Le => "LE",
            BinaryOperator::Ge => "GE",
            BinaryOperator::Lt => "LT",
            BinaryOperator::Gt => "GT",
            BinaryOperator::Eq => "EQ",
            BinaryOperator::Ne => "NE",
            BinaryOperator::And => "AND",
            BinaryOperator::Or => "OR",
        }
    }

    /// Returns the operator `op'` such that `a op b` equals `b op' a`,
    /// or `None` when the operands cannot be swapped.
    pub fn mirrored(&self) -> Option<Self> {
        match self {
            BinaryOperator::Add
            | BinaryOperator::Mul
            | BinaryOperator::Eq
            | BinaryOperator::Ne
            | BinaryOperator::And
            | BinaryOperator::Or => Some(*self),
            BinaryOperator::Lt => Some(BinaryOperator::Gt),
            BinaryOperator::Gt => Some(BinaryOperator::Lt),
            BinaryOperator::Le => Some(BinaryOperator::Ge),
            BinaryOperator::Ge => Some(BinaryOperator::Le),
            BinaryOperator::Sub | BinaryOperator::Div => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_from_opcode_when_every_operator_then_inverse_of_opcode() {
        for op in BinaryOperator::ALL {
            assert_eq!(BinaryOperator::from_opcode(op.opcode()), Some(op));
        }
    }

    #[test]
    fn unary_from_opcode_when_every_operator_then_inverse_of_opcode() {
        for op in UnaryOperator::ALL {
            assert_eq!(UnaryOperator::from_opcode(op.opcode()), Some(op));
        }
    }

    #[test]
    fn binary_from_opcode_when_gap_opcode_then_none() {
        assert_eq!(BinaryOperator::from_opcode(0x97), None);
    }

    #[test]
    fn mirrored_when_applied_twice_then_original_operator() {
        for op in BinaryOperator::ALL {
            if let Some(mirror) = op.mirrored() {
                assert_eq!(mirror.mirrored(), Some(op));
            }
        }
    }

    #[test]
    fn mirrored_when_sub_then_none() {
        assert_eq!(BinaryOperator::Sub.mirrored(), None);
    }
}

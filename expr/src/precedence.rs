//! Operator precedence and associativity.
//!
//! Higher ranks bind tighter. The table is static data and is the single
//! source for operator symbols in rendered text.

use ezstate_bytecode::{BinaryOperator, UnaryOperator};

use crate::expr::Expr;

/// Rank of constants, parameters and calls.
pub const ATOM_PRECEDENCE: u8 = 10;

/// Rank of prefix operators and negative literals.
pub const UNARY_PRECEDENCE: u8 = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatorInfo {
    pub symbol: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
}

const fn left(symbol: &'static str, precedence: u8) -> OperatorInfo {
    OperatorInfo {
        symbol,
        precedence,
        associativity: Associativity::Left,
    }
}

const fn prefix(symbol: &'static str) -> OperatorInfo {
    OperatorInfo {
        symbol,
        precedence: UNARY_PRECEDENCE,
        associativity: Associativity::Right,
    }
}

static BINARY_OPERATORS: [(BinaryOperator, OperatorInfo); 12] = [
    (BinaryOperator::Mul, left("*", 6)),
    (BinaryOperator::Div, left("/", 6)),
    (BinaryOperator::Add, left("+", 5)),
    (BinaryOperator::Sub, left("-", 5)),
    (BinaryOperator::Le, left("<=", 4)),
    (BinaryOperator::Ge, left(">=", 4)),
    (BinaryOperator::Lt, left("<", 4)),
    (BinaryOperator::Gt, left(">", 4)),
    (BinaryOperator::Eq, left("==", 3)),
    (BinaryOperator::Ne, left("!=", 3)),
    (BinaryOperator::And, left("&&", 2)),
    (BinaryOperator::Or, left("||", 1)),
];

static UNARY_OPERATORS: [(UnaryOperator, OperatorInfo); 2] = [
    (UnaryOperator::Neg, prefix("-")),
    (UnaryOperator::Not, prefix("!")),
];

/// Returns the table entry for a binary operator.
pub fn binary_info(op: BinaryOperator) -> OperatorInfo {
    BINARY_OPERATORS
        .iter()
        .find(|(candidate, _)| *candidate == op)
        .map(|(_, info)| *info)
        .unwrap_or_else(|| unreachable!("every binary operator has a table entry"))
}

/// Returns the table entry for a unary operator.
pub fn unary_info(op: UnaryOperator) -> OperatorInfo {
    UNARY_OPERATORS
        .iter()
        .find(|(candidate, _)| *candidate == op)
        .map(|(_, info)| *info)
        .unwrap_or_else(|| unreachable!("every unary operator has a table entry"))
}

impl Expr {
    /// Returns the precedence rank of the node's top-level operator.
    pub fn precedence(&self) -> u8 {
        match self {
            Expr::Binary(node) => binary_info(node.op).precedence,
            Expr::Unary(_) => UNARY_PRECEDENCE,
            Expr::Constant(constant) if constant.is_negative() => UNARY_PRECEDENCE,
            Expr::Constant(_) | Expr::Parameter(_) | Expr::Call(_) => ATOM_PRECEDENCE,
        }
    }
}

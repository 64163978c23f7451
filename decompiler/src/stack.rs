use ezstate_expr::Expr;

use crate::error::DecodeError;

/// A partially built expression together with its tree depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Operand {
    pub expr: Expr,
    pub depth: usize,
}

impl Operand {
    pub fn leaf(expr: Expr) -> Self {
        Operand { expr, depth: 1 }
    }
}

/// Bounded operand stack used while decoding.
pub(crate) struct OperandStack {
    data: Vec<Operand>,
    max_depth: usize,
    high_water: usize,
}

impl OperandStack {
    /// Creates a new operand stack that holds at most `max_depth` values.
    pub fn new(max_depth: usize) -> Self {
        OperandStack {
            data: Vec::new(),
            max_depth,
            high_water: 0,
        }
    }

    /// Pushes an operand onto the stack.
    pub fn push(&mut self, operand: Operand, offset: usize) -> Result<(), DecodeError> {
        if self.data.len() >= self.max_depth {
            return Err(DecodeError::StackOverflow {
                offset,
                limit: self.max_depth,
            });
        }
        self.data.push(operand);
        self.high_water = self.high_water.max(self.data.len());
        Ok(())
    }

    /// Pops the top `count` operands and returns them oldest first.
    ///
    /// The stack is unchanged when it holds fewer than `count` operands.
    pub fn pop_many(
        &mut self,
        count: usize,
        offset: usize,
        opcode: u8,
    ) -> Result<Vec<Operand>, DecodeError> {
        let available = self.data.len();
        if available < count {
            return Err(DecodeError::StackUnderflow {
                offset,
                opcode,
                needed: count,
                available,
            });
        }
        Ok(self.data.split_off(available - count))
    }

    /// Returns the largest number of values the stack has held.
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    pub fn into_exprs(self) -> Vec<Expr> {
        self.data.into_iter().map(|operand| operand.expr).collect()
    }
}

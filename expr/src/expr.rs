use ezstate_bytecode::{BinaryOperator, IntWidth, UnaryOperator};

/// A literal value together with the storage it was declared with.
#[derive(Clone, Debug)]
pub enum Constant {
    /// Integer stored at a specific width. The value may lie outside the
    /// width for externally built trees; encoding such a constant fails.
    Int { value: i64, width: IntWidth },
    F32(f32),
    F64(f64),
    Str(String),
}

impl Constant {
    /// Creates an integer constant at the width the game tools would use.
    pub fn int(value: i64) -> Self {
        Constant::Int {
            value,
            width: IntWidth::canonical_for(value).unwrap_or(IntWidth::I32),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Constant::Int { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Constant::F32(v) => Some(*v as f64),
            Constant::F64(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns true when the literal text starts with a minus sign.
    pub fn is_negative(&self) -> bool {
        match self {
            Constant::Int { value, .. } => *value < 0,
            Constant::F32(v) => v.is_sign_negative() && !v.is_nan(),
            Constant::F64(v) => v.is_sign_negative() && !v.is_nan(),
            Constant::Str(_) => false,
        }
    }
}

// Floating-point constants compare by bit pattern so that every decoded
// value, NaN included, equals its re-decoded copy.
impl PartialEq for Constant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Constant::Int { value, width },
                Constant::Int {
                    value: other_value,
                    width: other_width,
                },
            ) => value == other_value && width == other_width,
            (Constant::F32(a), Constant::F32(b)) => a.to_bits() == b.to_bits(),
            (Constant::F64(a), Constant::F64(b)) => a.to_bits() == b.to_bits(),
            (Constant::Str(a), Constant::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Constant {}

/// An operator applied to one operand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnaryExpr {
    pub op: UnaryOperator,
    pub term: Box<Expr>,
}

/// An operator applied to two operands, `left op right`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryExpr {
    pub op: BinaryOperator,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// A reference to a caller-owned parameter slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParameterRef {
    pub index: u8,
}

/// What a call invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallTarget {
    /// A function identified by an expression, normally an integer constant.
    Function(Box<Expr>),
    /// A command from a command bank. Its arity comes from command metadata.
    Command { bank: u8, id: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Call {
    pub target: CallTarget,
    pub args: Vec<Expr>,
}

/// A node of an expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Constant(Constant),
    Unary(UnaryExpr),
    Binary(BinaryExpr),
    Parameter(ParameterRef),
    Call(Call),
}

impl Expr {
    /// Integer constant at its canonical width.
    pub fn int(value: i64) -> Self {
        Expr::Constant(Constant::int(value))
    }

    pub fn int_with_width(value: i64, width: IntWidth) -> Self {
        Expr::Constant(Constant::Int { value, width })
    }

    pub fn f32(value: f32) -> Self {
        Expr::Constant(Constant::F32(value))
    }

    pub fn f64(value: f64) -> Self {
        Expr::Constant(Constant::F64(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Constant(Constant::Str(value.into()))
    }

    pub fn parameter(index: u8) -> Self {
        Expr::Parameter(ParameterRef { index })
    }

    pub fn unary(op: UnaryOperator, term: Expr) -> Self {
        Expr::Unary(UnaryExpr {
            op,
            term: Box::new(term),
        })
    }

    pub fn binary(op: BinaryOperator, left: Expr, right: Expr) -> Self {
        Expr::Binary(BinaryExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn function(id: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(Call {
            target: CallTarget::Function(Box::new(id)),
            args,
        })
    }

    pub fn command(bank: u8, id: i32, args: Vec<Expr>) -> Self {
        Expr::Call(Call {
            target: CallTarget::Command { bank, id },
            args,
        })
    }

    pub fn as_constant(&self) -> Option<&Constant> {
        match self {
            Expr::Constant(constant) => Some(constant),
            _ => None,
        }
    }

    /// Returns the value of an integer constant, for example a state group
    /// or param row id used as a quick link.
    pub fn as_int(&self) -> Option<i64> {
        self.as_constant().and_then(Constant::as_int)
    }

    /// Returns the direct children in evaluation order.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Constant(_) | Expr::Parameter(_) => Vec::new(),
            Expr::Unary(node) => vec![&node.term],
            Expr::Binary(node) => vec![&node.left, &node.right],
            Expr::Call(node) => {
                let mut children = Vec::with_capacity(node.args.len() + 1);
                if let CallTarget::Function(id) = &node.target {
                    children.push(id.as_ref());
                }
                children.extend(node.args.iter());
                children
            }
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::depth)
            .max()
            .unwrap_or(0)
    }

    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::node_count)
            .sum::<usize>()
    }

    /// Builds a new tree by offering every node to `f`, top-down. Where `f`
    /// returns a replacement, that subtree is replaced and not visited
    /// further; elsewhere the node is rebuilt from its transformed children.
    pub fn transform(&self, f: &mut impl FnMut(&Expr) -> Option<Expr>) -> Expr {
        if let Some(replacement) = f(self) {
            return replacement;
        }
        match self {
            Expr::Constant(_) | Expr::Parameter(_) => self.clone(),
            Expr::Unary(node) => Expr::unary(node.op, node.term.transform(f)),
            Expr::Binary(node) => {
                Expr::binary(node.op, node.left.transform(f), node.right.transform(f))
            }
            Expr::Call(node) => {
                let target = match &node.target {
                    CallTarget::Function(id) => CallTarget::Function(Box::new(id.transform(f))),
                    CallTarget::Command { bank, id } => CallTarget::Command {
                        bank: *bank,
                        id: *id,
                    },
                };
                Expr::Call(Call {
                    target,
                    args: node.args.iter().map(|arg| arg.transform(f)).collect(),
                })
            }
        }
    }

    /// Returns a copy with every reference to parameter `index` replaced.
    pub fn replace_parameter(&self, index: u8, replacement: &Expr) -> Expr {
        self.transform(&mut |node: &Expr| match node {
            Expr::Parameter(param) if param.index == index => Some(replacement.clone()),
            _ => None,
        })
    }

    /// Returns the equivalent binary expression with its operands swapped,
    /// `a < b` becoming `b > a`. Returns `None` for anything else, including
    /// operators such as `-` whose operands cannot be swapped.
    pub fn mirrored(&self) -> Option<Expr> {
        match self {
            Expr::Binary(node) => {
                let op = node.op.mirrored()?;
                Some(Expr::binary(
                    op,
                    node.right.as_ref().clone(),
                    node.left.as_ref().clone(),
                ))
            }
            _ => None,
        }
    }
}

impl From<Constant> for Expr {
    fn from(constant: Constant) -> Self {
        Expr::Constant(constant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_when_small_value_then_inline_width() {
        assert_eq!(Expr::int(5), Expr::int_with_width(5, IntWidth::Inline));
        assert_eq!(Expr::int(300), Expr::int_with_width(300, IntWidth::I32));
    }

    #[test]
    fn eq_when_same_value_different_width_then_not_equal() {
        assert_ne!(
            Expr::int_with_width(300, IntWidth::U16),
            Expr::int_with_width(300, IntWidth::I32)
        );
    }

    #[test]
    fn eq_when_nan_constants_with_same_bits_then_equal() {
        assert_eq!(Expr::f32(f32::NAN), Expr::f32(f32::NAN));
    }

    #[test]
    fn eq_when_zero_and_negative_zero_then_not_equal() {
        assert_ne!(Expr::f64(0.0), Expr::f64(-0.0));
    }

    #[test]
    fn eq_when_f32_and_f64_same_value_then_not_equal() {
        assert_ne!(Expr::f32(1.0), Expr::f64(1.0));
    }

    #[test]
    fn as_int_when_float_then_none() {
        assert_eq!(Expr::int(7).as_int(), Some(7));
        assert_eq!(Expr::f32(7.0).as_int(), None);
    }

    #[test]
    fn depth_when_nested_binary_then_longest_path() {
        let expr = Expr::binary(
            BinaryOperator::Add,
            Expr::binary(BinaryOperator::Mul, Expr::int(1), Expr::int(2)),
            Expr::int(3),
        );
        assert_eq!(expr.depth(), 3);
        assert_eq!(expr.node_count(), 5);
    }

    #[test]
    fn children_when_function_call_then_id_first() {
        let expr = Expr::function(Expr::int(12), vec![Expr::int(1), Expr::int(2)]);
        let children = expr.children();
        assert_eq!(children, vec![&Expr::int(12), &Expr::int(1), &Expr::int(2)]);
    }

    #[test]
    fn replace_parameter_when_present_then_new_tree_and_original_unchanged() {
        let original = Expr::binary(BinaryOperator::Add, Expr::parameter(0), Expr::parameter(1));

        let replaced = original.replace_parameter(0, &Expr::int(9));

        assert_eq!(
            replaced,
            Expr::binary(BinaryOperator::Add, Expr::int(9), Expr::parameter(1))
        );
        assert_eq!(
            original,
            Expr::binary(BinaryOperator::Add, Expr::parameter(0), Expr::parameter(1))
        );
    }

    #[test]
    fn replace_parameter_when_inside_command_args_then_replaced() {
        let original = Expr::command(6, 12, vec![Expr::parameter(3)]);
        let replaced = original.replace_parameter(3, &Expr::f32(0.5));
        assert_eq!(replaced, Expr::command(6, 12, vec![Expr::f32(0.5)]));
    }

    #[test]
    fn mirrored_when_less_than_then_greater_than_with_swapped_operands() {
        let expr = Expr::binary(BinaryOperator::Lt, Expr::parameter(0), Expr::int(3));
        assert_eq!(
            expr.mirrored(),
            Some(Expr::binary(BinaryOperator::Gt, Expr::int(3), Expr::parameter(0)))
        );
    }

    #[test]
    fn mirrored_when_division_then_none() {
        let expr = Expr::binary(BinaryOperator::Div, Expr::int(1), Expr::int(3));
        assert_eq!(expr.mirrored(), None);
    }

    #[test]
    fn is_negative_when_negative_zero_then_true() {
        assert!(Constant::F64(-0.0).is_negative());
        assert!(!Constant::F64(f64::NAN).is_negative());
        assert!(Constant::int(-1).is_negative());
    }
}

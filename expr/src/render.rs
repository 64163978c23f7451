//! Infix text for expression trees.
//!
//! The text is for display only. Parentheses are emitted only where the
//! tree structure would otherwise be lost.

use std::fmt;

use ezstate_bytecode::UnaryOperator;

use crate::expr::{CallTarget, Constant, Expr};
use crate::precedence::{binary_info, unary_info, Associativity, OperatorInfo, UNARY_PRECEDENCE};

/// Resolves names the bytecode only identifies by number.
///
/// The defaults produce stable placeholders; callers with alias metadata
/// override them.
pub trait Symbols {
    fn parameter(&self, index: u8) -> String {
        format!("p{index}")
    }

    fn function(&self, id: i64) -> String {
        format!("f{id}")
    }

    fn command(&self, bank: u8, id: i32) -> String {
        format!("c{bank}_{id}")
    }
}

/// Placeholder names only.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSymbols;

impl Symbols for DefaultSymbols {}

/// Renders `expr` as infix text, resolving names through `symbols`.
pub fn to_infix<S: Symbols + ?Sized>(expr: &Expr, symbols: &S) -> String {
    let mut renderer = InfixRenderer {
        buffer: String::new(),
        symbols,
    };
    renderer.visit_expr(expr);
    renderer.buffer
}

impl Expr {
    pub fn to_infix_text(&self) -> String {
        to_infix(self, &DefaultSymbols)
    }

    pub fn to_infix_text_with<S: Symbols + ?Sized>(&self, symbols: &S) -> String {
        to_infix(self, symbols)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_infix_text())
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&literal_text(self))
    }
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

struct InfixRenderer<'a, S: Symbols + ?Sized> {
    buffer: String,
    symbols: &'a S,
}

impl<S: Symbols + ?Sized> InfixRenderer<'_, S> {
    fn write(&mut self, val: &str) {
        self.buffer.push_str(val);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Constant(constant) => self.write(&literal_text(constant)),
            Expr::Parameter(param) => {
                let name = self.symbols.parameter(param.index);
                self.write(&name);
            }
            Expr::Unary(node) => {
                self.write(unary_info(node.op).symbol);
                let parens = node.term.precedence() < UNARY_PRECEDENCE
                    || starts_with_prefix(&node.term, node.op);
                self.visit_operand(&node.term, parens);
            }
            Expr::Binary(node) => {
                let info = binary_info(node.op);

                self.visit_operand(&node.left, needs_parens(&node.left, info, Side::Left));
                self.write(" ");
                self.write(info.symbol);
                self.write(" ");
                self.visit_operand(&node.right, needs_parens(&node.right, info, Side::Right));
            }
            Expr::Call(node) => {
                match &node.target {
                    CallTarget::Function(id) => match id.as_int() {
                        Some(id) => {
                            let name = self.symbols.function(id);
                            self.write(&name);
                        }
                        None => {
                            self.write("f[");
                            self.visit_expr(id);
                            self.write("]");
                        }
                    },
                    CallTarget::Command { bank, id } => {
                        let name = self.symbols.command(*bank, *id);
                        self.write(&name);
                    }
                }

                self.write("(");
                let mut it = node.args.iter().peekable();
                while let Some(arg) = it.next() {
                    self.visit_expr(arg);
                    if it.peek().is_some() {
                        self.write(", ");
                    }
                }
                self.write(")");
            }
        }
    }

    fn visit_operand(&mut self, expr: &Expr, parens: bool) {
        if parens {
            self.write("(");
            self.visit_expr(expr);
            self.write(")");
        } else {
            self.visit_expr(expr);
        }
    }
}

/// Returns true when the text of `operand` begins with the symbol of `op`,
/// so that `-(-5)` is not written as `--5`.
fn starts_with_prefix(operand: &Expr, op: UnaryOperator) -> bool {
    match operand {
        Expr::Unary(inner) => inner.op == op,
        Expr::Constant(constant) => op == UnaryOperator::Neg && constant.is_negative(),
        _ => false,
    }
}

/// Decides whether an operand of a binary operator needs parentheses.
///
/// Lower precedence always does. Equal precedence does on the side the
/// operator does not associate towards: `a - (b - c)` but `a - b - c`.
fn needs_parens(operand: &Expr, parent: OperatorInfo, side: Side) -> bool {
    let precedence = operand.precedence();
    if precedence != parent.precedence {
        return precedence < parent.precedence;
    }
    matches!(
        (parent.associativity, side),
        (Associativity::Left, Side::Right) | (Associativity::Right, Side::Left)
    )
}

fn literal_text(constant: &Constant) -> String {
    match constant {
        Constant::Int { value, .. } => value.to_string(),
        Constant::F32(value) => float_text(value.to_string(), value.is_finite()),
        Constant::F64(value) => float_text(value.to_string(), value.is_finite()),
        Constant::Str(value) => format!("{value:?}"),
    }
}

/// Floating-point literals always show a decimal point so they cannot be
/// mistaken for integers.
fn float_text(text: String, finite: bool) -> String {
    if finite && !text.contains('.') {
        format!("{text}.0")
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ezstate_bytecode::BinaryOperator;

    struct Aliases;

    impl Symbols for Aliases {
        fn parameter(&self, index: u8) -> String {
            format!("arg{index}")
        }

        fn command(&self, bank: u8, id: i32) -> String {
            if (bank, id) == (6, 12) {
                "SetEventFlag".to_string()
            } else {
                format!("c{bank}_{id}")
            }
        }
    }

    #[test]
    fn to_infix_when_add_under_mul_then_parenthesized() {
        let expr = Expr::binary(
            BinaryOperator::Mul,
            Expr::binary(BinaryOperator::Add, Expr::int(1), Expr::int(2)),
            Expr::int(3),
        );
        assert_eq!(expr.to_infix_text(), "(1 + 2) * 3");
    }

    #[test]
    fn to_infix_when_mul_under_add_then_no_parens() {
        let expr = Expr::binary(
            BinaryOperator::Add,
            Expr::binary(BinaryOperator::Mul, Expr::int(1), Expr::int(2)),
            Expr::int(3),
        );
        assert_eq!(expr.to_infix_text(), "1 * 2 + 3");
    }

    #[test]
    fn to_infix_when_float_integral_value_then_has_decimal_point() {
        assert_eq!(Expr::f32(1.0).to_infix_text(), "1.0");
        assert_eq!(Expr::f64(-2.0).to_infix_text(), "-2.0");
        assert_eq!(Expr::f32(0.25).to_infix_text(), "0.25");
    }

    #[test]
    fn to_infix_when_f32_then_shortest_single_precision_text() {
        assert_eq!(Expr::f32(0.1).to_infix_text(), "0.1");
    }

    #[test]
    fn to_infix_when_non_finite_then_no_decimal_point_added() {
        assert_eq!(Expr::f32(f32::INFINITY).to_infix_text(), "inf");
        assert_eq!(Expr::f64(f64::NAN).to_infix_text(), "NaN");
    }

    #[test]
    fn to_infix_when_string_then_quoted() {
        assert_eq!(Expr::string("a\"b").to_infix_text(), "\"a\\\"b\"");
    }

    #[test]
    fn to_infix_when_not_of_comparison_then_parenthesized() {
        let expr = Expr::unary(
            UnaryOperator::Not,
            Expr::binary(BinaryOperator::Eq, Expr::parameter(0), Expr::int(1)),
        );
        assert_eq!(expr.to_infix_text(), "!(p0 == 1)");
    }

    #[test]
    fn to_infix_when_neg_of_negative_literal_then_parenthesized() {
        let expr = Expr::unary(UnaryOperator::Neg, Expr::int(-5));
        assert_eq!(expr.to_infix_text(), "-(-5)");
    }

    #[test]
    fn to_infix_when_neg_of_neg_then_parenthesized() {
        let expr = Expr::unary(
            UnaryOperator::Neg,
            Expr::unary(UnaryOperator::Neg, Expr::parameter(0)),
        );
        assert_eq!(expr.to_infix_text(), "-(-p0)");
    }

    #[test]
    fn to_infix_when_not_of_neg_then_no_parens() {
        let expr = Expr::unary(
            UnaryOperator::Not,
            Expr::unary(UnaryOperator::Neg, Expr::int(5)),
        );
        assert_eq!(expr.to_infix_text(), "!-5");
    }

    #[test]
    fn to_infix_when_neg_of_call_then_no_parens() {
        let expr = Expr::unary(
            UnaryOperator::Neg,
            Expr::function(Expr::int(3), vec![]),
        );
        assert_eq!(expr.to_infix_text(), "-f3()");
    }

    #[test]
    fn to_infix_when_function_id_not_constant_then_bracketed_id() {
        let expr = Expr::function(Expr::parameter(1), vec![Expr::int(2)]);
        assert_eq!(expr.to_infix_text(), "f[p1](2)");
    }

    #[test]
    fn to_infix_when_symbols_supplied_then_uses_aliases() {
        let expr = Expr::command(6, 12, vec![Expr::parameter(0), Expr::int(1)]);
        assert_eq!(expr.to_infix_text_with(&Aliases), "SetEventFlag(arg0, 1)");
    }

    #[test]
    fn display_when_expr_then_same_as_infix_text() {
        let expr = Expr::binary(BinaryOperator::Or, Expr::parameter(0), Expr::parameter(1));
        assert_eq!(format!("{expr}"), "p0 || p1");
    }
}

//! Expression trees decoded from EzState bytecode.
//!
//! A tree is built by the decompiler, rendered to infix text for display,
//! and encoded back to bytecode by the recompiler. Trees are plain values:
//! transformations return new trees and leave their input untouched.
//!
//! # Example
//!
//! ```
//! use ezstate_expr::{BinaryOperator, Expr};
//!
//! let sum = Expr::binary(BinaryOperator::Add, Expr::int(1), Expr::int(2));
//! let product = Expr::binary(BinaryOperator::Mul, sum, Expr::int(3));
//! assert_eq!(product.to_infix_text(), "(1 + 2) * 3");
//! ```

mod expr;
pub mod precedence;
mod render;

pub use expr::{BinaryExpr, Call, CallTarget, Constant, Expr, ParameterRef, UnaryExpr};
pub use render::{to_infix, DefaultSymbols, Symbols};

pub use ezstate_bytecode::{BinaryOperator, IntWidth, UnaryOperator};

//! Decompiler and recompiler for EzState expression bytecode.
//!
//! [`decode`] interprets a bytecode buffer with an operand stack of
//! partially built expression nodes and returns the expression tree.
//! [`encode`] walks a tree in post-order and emits the equivalent
//! bytecode. For every well-formed buffer `b`,
//! `encode(&decode(b)?, framing) == b` where `framing` is the one reported
//! by [`decompile`].
//!
//! Both directions are pure functions: nothing is cached between calls and
//! the only shared data is the static operator table.
//!
//! # Example
//!
//! ```
//! use ezstate_decompiler::{decode, encode, Framing, NoCommands};
//!
//! // 1 + 2 * 3, terminated
//! let bytes = [0x41, 0x42, 0x43, 0x8F, 0x8D, 0xA1];
//! let expr = decode(&bytes, &NoCommands).unwrap();
//! assert_eq!(expr.to_infix_text(), "1 + 2 * 3");
//! assert_eq!(encode(&expr, Framing::Terminated).unwrap(), bytes);
//! ```

mod arg_count;
mod decode;
mod encode;
pub mod error;
mod options;
mod stack;

pub use arg_count::{ArgCount, NoCommands};
pub use decode::{decode, decode_arguments, decompile, Decompiled};
pub use encode::{encode, recompile, Encoded};
pub use error::{DecodeError, EncodeError};
pub use options::{DecodeOptions, EncodeOptions, Framing};

pub use ezstate_bytecode::{StreamError, StreamErrorKind};
pub use ezstate_expr::Expr;

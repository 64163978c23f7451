//! Stack machine evaluator that turns bytecode into an expression tree.

use ezstate_bytecode::{Instruction, StreamError, StreamErrorKind, TokenReader};
use ezstate_expr::{Constant, Expr};
use log::{debug, trace};

use crate::arg_count::ArgCount;
use crate::error::DecodeError;
use crate::options::{DecodeOptions, Framing};
use crate::stack::{Operand, OperandStack};

/// The result of decoding one buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decompiled {
    pub expr: Expr,
    /// Whether the buffer ended with an end-marker. Encoding `expr` with
    /// this framing reproduces the buffer exactly.
    pub framing: Framing,
    /// Largest number of values that were on the operand stack.
    pub max_stack_depth: usize,
}

/// Decodes a buffer into an expression tree with default limits.
///
/// `arg_counts` supplies the arity of command calls, which the bytecode
/// does not encode.
pub fn decode<A: ArgCount + ?Sized>(bytes: &[u8], arg_counts: &A) -> Result<Expr, DecodeError> {
    decompile(bytes, arg_counts, &DecodeOptions::default()).map(|decompiled| decompiled.expr)
}

/// Decodes each buffer independently so a corrupt buffer does not hide
/// the others.
pub fn decode_arguments<B: AsRef<[u8]>, A: ArgCount + ?Sized>(
    buffers: &[B],
    arg_counts: &A,
) -> Vec<Result<Expr, DecodeError>> {
    buffers
        .iter()
        .map(|buffer| decode(buffer.as_ref(), arg_counts))
        .collect()
}

/// Decodes a buffer into an expression tree.
///
/// Reads until the end-marker or the end of the buffer. The buffer must
/// reduce to exactly one value and any byte after the end-marker is an
/// error, so a successful decode always accounts for every byte.
pub fn decompile<A: ArgCount + ?Sized>(
    bytes: &[u8],
    arg_counts: &A,
    options: &DecodeOptions,
) -> Result<Decompiled, DecodeError> {
    if bytes.is_empty() {
        return Err(StreamError::new(0, StreamErrorKind::Empty).into());
    }

    let mut reader = TokenReader::new(bytes);
    let mut stack = OperandStack::new(options.max_stack_depth);
    let mut framing = Framing::Unterminated;

    while !reader.at_end() {
        let offset = reader.position();
        let (instruction, _) = reader.read_opcode()?;
        let op = bytes[offset];
        trace!("{offset:#06x} {instruction}");

        let operand = match instruction {
            Instruction::End => {
                framing = Framing::Terminated;
                break;
            }
            Instruction::PushInt { value, width } => {
                Operand::leaf(Expr::Constant(Constant::Int { value, width }))
            }
            Instruction::PushF32(value) => Operand::leaf(Expr::f32(value)),
            Instruction::PushF64(value) => Operand::leaf(Expr::f64(value)),
            Instruction::PushString(value) => Operand::leaf(Expr::string(value)),
            Instruction::PushParameter(index) => Operand::leaf(Expr::parameter(index)),
            Instruction::Unary(unary) => {
                let mut popped = stack.pop_many(1, offset, op)?;
                let term = popped.remove(0);
                let depth = nested(term.depth, offset, options)?;
                Operand {
                    expr: Expr::unary(unary, term.expr),
                    depth,
                }
            }
            Instruction::Binary(binary) => {
                let mut popped = stack.pop_many(2, offset, op)?;
                let right = popped.remove(1);
                let left = popped.remove(0);
                let depth = nested(left.depth.max(right.depth), offset, options)?;
                Operand {
                    expr: Expr::binary(binary, left.expr, right.expr),
                    depth,
                }
            }
            Instruction::CallFunction { args } => {
                let popped = stack.pop_many(args + 1, offset, op)?;
                let (mut operands, depth) = collect(popped, offset, options)?;
                // the function id sits beneath its arguments
                let id = operands.remove(0);
                Operand {
                    expr: Expr::function(id, operands),
                    depth,
                }
            }
            Instruction::CallCommand { bank, id } => {
                let args = arg_counts
                    .arg_count(bank, id)
                    .ok_or(DecodeError::UnknownCommand { offset, bank, id })?;
                let popped = stack.pop_many(args, offset, op)?;
                let (operands, depth) = collect(popped, offset, options)?;
                Operand {
                    expr: Expr::command(bank, id, operands),
                    depth,
                }
            }
        };
        stack.push(operand, offset)?;
    }

    if framing == Framing::Terminated && !reader.at_end() {
        return Err(StreamError::new(
            reader.position(),
            StreamErrorKind::TrailingBytes(reader.remaining().len()),
        )
        .into());
    }
    if framing == Framing::Unterminated && options.require_terminator {
        return Err(StreamError::new(bytes.len(), StreamErrorKind::MissingTerminator).into());
    }

    let max_stack_depth = stack.high_water();
    let mut remaining = stack.into_exprs();
    if remaining.len() != 1 {
        debug!(
            "Decode left {} values on the stack for {} bytes",
            remaining.len(),
            bytes.len()
        );
        return Err(DecodeError::UnbalancedExpression { stack: remaining });
    }
    let expr = remaining.remove(0);
    debug!("Decoded {} bytes as {:?} expression {}", bytes.len(), framing, expr);

    Ok(Decompiled {
        expr,
        framing,
        max_stack_depth,
    })
}

/// Returns the depth of a node whose deepest child has `child_depth`.
fn nested(child_depth: usize, offset: usize, options: &DecodeOptions) -> Result<usize, DecodeError> {
    let depth = child_depth + 1;
    if depth > options.max_nesting_depth {
        return Err(DecodeError::NestingTooDeep {
            offset,
            limit: options.max_nesting_depth,
        });
    }
    Ok(depth)
}

fn collect(
    operands: Vec<Operand>,
    offset: usize,
    options: &DecodeOptions,
) -> Result<(Vec<Expr>, usize), DecodeError> {
    // a call without arguments is a leaf
    let depth = match operands.iter().map(|operand| operand.depth).max() {
        Some(child_depth) => nested(child_depth, offset, options)?,
        None => 1,
    };
    Ok((operands.into_iter().map(|operand| operand.expr).collect(), depth))
}

//! Recompiler that emits bytecode for an expression tree.

use ezstate_bytecode::Emitter;
use ezstate_expr::{CallTarget, Constant, Expr};
use log::debug;

use crate::arg_count::ArgCount;
use crate::error::EncodeError;
use crate::options::{EncodeOptions, Framing};

/// The result of encoding one tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    pub bytecode: Vec<u8>,
    /// Largest number of values the bytecode places on the operand stack.
    pub max_stack_depth: usize,
}

/// Encodes a tree as bytecode.
///
/// Every constant is emitted at exactly its declared width, so decoding
/// a buffer and encoding the result reproduces the buffer.
pub fn encode(expr: &Expr, framing: Framing) -> Result<Vec<u8>, EncodeError> {
    recompile(expr, &EncodeOptions::new(framing), None).map(|encoded| encoded.bytecode)
}

/// Encodes a tree as bytecode and checks command calls against
/// `arg_counts` when it is supplied.
///
/// Trees that exceed the stack or nesting limits in `options` are rejected,
/// since a decoder with the same limits would reject their bytes.
pub fn recompile(
    expr: &Expr,
    options: &EncodeOptions,
    arg_counts: Option<&dyn ArgCount>,
) -> Result<Encoded, EncodeError> {
    let mut recompiler = Recompiler {
        emitter: Emitter::new(),
        arg_counts,
        max_nesting_depth: options.max_nesting_depth,
    };
    recompiler.emit_expr(expr, 1)?;
    let mut emitter = recompiler.emitter;

    let max_stack_depth = emitter.max_stack_depth();
    if max_stack_depth > options.max_stack_depth {
        return Err(EncodeError::StackOverflow {
            depth: max_stack_depth,
            limit: options.max_stack_depth,
        });
    }
    if options.framing == Framing::Terminated {
        emitter.emit_end();
    }

    let bytecode = emitter.into_bytecode();
    debug!(
        "Encoded {} as {} bytes ({:?})",
        expr,
        bytecode.len(),
        options.framing
    );
    Ok(Encoded {
        bytecode,
        max_stack_depth,
    })
}

struct Recompiler<'a> {
    emitter: Emitter,
    arg_counts: Option<&'a dyn ArgCount>,
    max_nesting_depth: usize,
}

impl Recompiler<'_> {
    /// Emits `expr` found at `level` in the tree, the root being level 1.
    fn emit_expr(&mut self, expr: &Expr, level: usize) -> Result<(), EncodeError> {
        // A lone leaf always decodes; anything below the root counts
        // against the limit.
        if level > 1 && level > self.max_nesting_depth {
            return Err(EncodeError::NestingTooDeep {
                limit: self.max_nesting_depth,
            });
        }

        match expr {
            Expr::Constant(constant) => emit_constant(&mut self.emitter, constant),
            Expr::Parameter(parameter) => {
                Ok(self.emitter.emit_push_parameter(parameter.index)?)
            }
            Expr::Unary(unary) => {
                self.emit_expr(&unary.term, level + 1)?;
                self.emitter.emit_unary(unary.op);
                Ok(())
            }
            Expr::Binary(binary) => {
                self.emit_expr(&binary.left, level + 1)?;
                self.emit_expr(&binary.right, level + 1)?;
                self.emitter.emit_binary(binary.op);
                Ok(())
            }
            Expr::Call(call) => match &call.target {
                CallTarget::Function(id) => {
                    self.emit_expr(id, level + 1)?;
                    for arg in &call.args {
                        self.emit_expr(arg, level + 1)?;
                    }
                    Ok(self.emitter.emit_call(call.args.len())?)
                }
                CallTarget::Command { bank, id } => {
                    self.check_arity(*bank, *id, call.args.len())?;
                    for arg in &call.args {
                        self.emit_expr(arg, level + 1)?;
                    }
                    self.emitter.emit_command(*bank, *id, call.args.len());
                    Ok(())
                }
            },
        }
    }

    fn check_arity(&self, bank: u8, id: i32, actual: usize) -> Result<(), EncodeError> {
        let Some(arg_counts) = self.arg_counts else {
            return Ok(());
        };
        let expected = arg_counts
            .arg_count(bank, id)
            .ok_or(EncodeError::UnknownCommand { bank, id })?;
        if expected != actual {
            return Err(EncodeError::ArityMismatch {
                bank,
                id,
                expected,
                actual,
            });
        }
        Ok(())
    }
}

fn emit_constant(emitter: &mut Emitter, constant: &Constant) -> Result<(), EncodeError> {
    match constant {
        Constant::Int { value, width } => emitter.emit_push_int(*value, *width)?,
        Constant::F32(value) => emitter.emit_push_f32(*value),
        Constant::F64(value) => emitter.emit_push_f64(*value),
        Constant::Str(value) => emitter.emit_push_string(value)?,
    }
    Ok(())
}

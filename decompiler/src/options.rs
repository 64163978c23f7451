//! Options that control decoding and encoding.

/// Whether an instruction stream ends with an explicit end-marker.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Framing {
    /// The stream ends with `END`. Expressions stored in command arguments
    /// and condition evaluators use this form.
    #[default]
    Terminated,
    /// The stream length is known from the enclosing container and there is
    /// no end-marker.
    Unterminated,
}

/// Limits and strictness for decoding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of values on the operand stack.
    pub max_stack_depth: usize,
    /// Maximum depth of the resulting tree. Bounds recursion in every
    /// later walk over the tree.
    pub max_nesting_depth: usize,
    /// Rejects streams that end without an end-marker.
    pub require_terminator: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_stack_depth: 256,
            max_nesting_depth: 512,
            require_terminator: false,
        }
    }
}

/// Options for encoding.
///
/// The limits match [`DecodeOptions`] so that every encoded tree decodes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub framing: Framing,
    /// Maximum number of values the bytecode may place on the operand stack.
    pub max_stack_depth: usize,
    /// Maximum depth of the tree.
    pub max_nesting_depth: usize,
}

impl EncodeOptions {
    pub fn new(framing: Framing) -> Self {
        EncodeOptions {
            framing,
            ..EncodeOptions::default()
        }
    }
}

impl Default for EncodeOptions {
    fn default() -> Self {
        let limits = DecodeOptions::default();
        EncodeOptions {
            framing: Framing::default(),
            max_stack_depth: limits.max_stack_depth,
            max_nesting_depth: limits.max_nesting_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_options_default_when_created_then_limits_match_decode() {
        let decode = DecodeOptions::default();
        let encode = EncodeOptions::default();

        assert_eq!(encode.max_stack_depth, decode.max_stack_depth);
        assert_eq!(encode.max_nesting_depth, decode.max_nesting_depth);
        assert_eq!(encode.framing, Framing::Terminated);
    }

    #[test]
    fn encode_options_new_when_unterminated_then_default_limits() {
        let options = EncodeOptions::new(Framing::Unterminated);

        assert_eq!(options.framing, Framing::Unterminated);
        assert_eq!(options.max_stack_depth, 256);
    }
}

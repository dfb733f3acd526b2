//! Error types with rich diagnostics using miette

use miette::Diagnostic;
use thiserror::Error;

use crate::ops::Opcode;

// ============================================================================
// Generator Errors
// ============================================================================

/// Errors rejected at curve-generator entry, before anything is recorded.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum CurveError {
    #[error("invalid parameter {what}: {value}")]
    #[diagnostic(
        code(fraktur::curve::invalid_parameter),
        help("recursion order must be non-negative, sizes and angles finite, and shorten-by strictly positive")
    )]
    InvalidParameter {
        /// Which parameter was rejected
        what: &'static str,
        /// The offending value
        value: f64,
    },
}

// ============================================================================
// Recording Errors
// ============================================================================

/// Errors surfaced at record time, when an opcode is handed an argument
/// list that does not match its static shape.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("unsupported operation: {opcode} takes {expected} argument(s), got {got}")]
    #[diagnostic(
        code(fraktur::record::unsupported_operation),
        help("the spatial-slot mapping is fixed per opcode; see Opcode::schema()")
    )]
    UnsupportedOperation {
        opcode: Opcode,
        expected: usize,
        got: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_names_the_offender() {
        let err = CurveError::InvalidParameter {
            what: "order",
            value: -3.0,
        };
        assert_eq!(err.to_string(), "invalid parameter order: -3");
    }

    #[test]
    fn unsupported_operation_reports_arity() {
        let err = RecordError::UnsupportedOperation {
            opcode: Opcode::MoveTo,
            expected: 2,
            got: 1,
        };
        assert_eq!(
            err.to_string(),
            "unsupported operation: move_to takes 2 argument(s), got 1"
        );
    }
}

use thiserror::Error;

/// Errors raised by fixed-point arithmetic.
///
/// Zero denominators are not errors: every formula guards them and yields
/// zero. Only a result that cannot be represented in 256 bits is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MathError {
    /// The quotient does not fit in a `U256`.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),
}

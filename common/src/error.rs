use std::{error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A precondition on an argument did not hold.
    InvalidInput(&'static str),
    /// A raw sequence had the wrong number of components.
    ArityMismatch { expected: usize, actual: usize },
    /// A component-wise division hit a zero divisor.
    DivideByZero,
    /// The input points do not span any distance.
    DegenerateGeometry,
    /// A generic field accessor was asked for a field that does not exist.
    UnknownField(String),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInput(what) => write!(f, "invalid input: {}", what),
            Error::ArityMismatch { expected, actual } => write!(
                f,
                "expected {} components, got {}",
                expected, actual,
            ),
            Error::DivideByZero => write!(f, "division by a zero component"),
            Error::DegenerateGeometry => write!(f, "points do not span any distance"),
            Error::UnknownField(name) => write!(f, "unknown field ({})", name),
        }
    }
}

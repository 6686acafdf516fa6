/*
 * @file error.rs
 * @author The digital_net authors
 * @copyright 2026 The digital_net authors, MIT license
 *
 * Errors raised while building digital nets.
 */

use thiserror::Error;

/** Errors returned by net construction and extension. */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetError {
    /** The number of generating values doesn't match the requested dimension. */
    #[error("expected {expected} generating values, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /** The size parameter asks for more columns than `num_points` can count. */
    #[error("{cols} columns requested, at most {max} are supported")]
    TooManyColumns { cols: usize, max: usize },

    /** A generating value can't be used with this size parameter. */
    #[error("generating value for coordinate {coordinate} is incompatible: {reason}")]
    IncompatibleValue { coordinate: usize, reason: String },

    /** The construction has no data for this coordinate. */
    #[error("coordinate {coordinate} is out of range ({available} available)")]
    CoordinateOutOfRange { coordinate: usize, available: usize },

    /** A generating value was offered to a net of another construction method. */
    #[error("expected a {expected} generating value, found {found}")]
    ConstructionMismatch { expected: &'static str, found: &'static str },

    /** A search found no legal generating value for a coordinate. */
    #[error("no generating value available for coordinate {coordinate}")]
    EmptySearchSpace { coordinate: usize },

    /** Unknown output style name. */
    #[error("unknown output style `{0}`")]
    ParseStyle(String),

    /** Unknown construction method name. */
    #[error("unknown construction method `{0}`")]
    ParseConstruction(String),
}

impl NetError {
    pub(crate) fn incompatible(coordinate: usize, reason: impl Into<String>) -> Self {
        NetError::IncompatibleValue { coordinate, reason: reason.into() }
    }
}

/** Result type for net operations. */
pub type Result<T> = core::result::Result<T, NetError>;

#[cfg(test)]
mod tests {
    use crate::error::NetError;

    #[test]
    fn messages() {
        let e = NetError::DimensionMismatch { expected: 3, found: 2 };
        assert_eq!(e.to_string(), "expected 3 generating values, found 2");
        let e = NetError::incompatible(4, "degree 5 >= modulus degree 5");
        assert_eq!(e.to_string(),
            "generating value for coordinate 4 is incompatible: degree 5 >= modulus degree 5");
        let e = NetError::TooManyColumns { cols: 70, max: 63 };
        assert_eq!(e.to_string(), "70 columns requested, at most 63 are supported");
    }
}

use std::fmt;

use thiserror::Error;

/// Which of the three input matrices a shape fault refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixKind {
    Flow,
    Distance,
    UnitCost,
}

impl fmt::Display for MatrixKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixKind::Flow => f.write_str("flow"),
            MatrixKind::Distance => f.write_str("distance"),
            MatrixKind::UnitCost => f.write_str("unit-cost"),
        }
    }
}

/// Input faults detected before any cost is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{matrix} matrix is not square ({rows}x{cols})")]
    NotSquare {
        matrix: MatrixKind,
        rows: usize,
        cols: usize,
    },

    #[error("{matrix} matrix is {found}x{found}, expected {expected}x{expected}")]
    SizeMismatch {
        matrix: MatrixKind,
        expected: usize,
        found: usize,
    },

    #[error("permutation has {found} entries, expected {expected}")]
    PermutationLength { expected: usize, found: usize },

    #[error("entity {entity} is assigned location {location}, outside 0..{n}")]
    LocationOutOfRange {
        entity: usize,
        location: usize,
        n: usize,
    },

    #[error("location {location} is assigned to both entity {first} and entity {second}")]
    DuplicateLocation {
        location: usize,
        first: usize,
        second: usize,
    },

    #[error("fixed entity {index} is outside 0..{n}")]
    FixedIndexOutOfRange { index: usize, n: usize },

    #[error("entity {entity} is outside 0..{n}")]
    EntityOutOfRange { entity: usize, n: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

//! CRAFT-style facility layout improvement.
//!
//! Entities (departments) are assigned to locations by a permutation. The
//! cost of an assignment combines a flow matrix `F`, a distance matrix `D`
//! between locations and a unit-cost matrix `C`:
//!
//! ```text
//! cost(perm) = sum over i != j of F[i][j] * D[perm[i]][perm[j]] * C[i][j]
//! ```
//!
//! [`local_search`] repeatedly commits the pairwise exchange with the largest
//! cost reduction until none remains.
//!
//! ```
//! use nalgebra::Matrix3;
//!
//! #[rustfmt::skip]
//! let flow = Matrix3::from_row_slice(&[
//!     0., 5., 2.,
//!     4., 0., 3.,
//!     1., 2., 0.,
//! ]);
//! #[rustfmt::skip]
//! let distance = Matrix3::from_row_slice(&[
//!      0., 10., 10.,
//!     10.,  0., 20.,
//!     10., 20.,  0.,
//! ]);
//! let unit_cost = Matrix3::from_element(1.);
//!
//! let outcome = craft::local_search(&flow, &distance, &unit_cost, &[], None, None).unwrap();
//! assert_eq!(outcome.permutation, vec![1, 0, 2]);
//! assert_eq!(outcome.cost, 200.);
//! ```

pub mod config;
pub mod cost;
pub mod error;
pub mod layout;
pub mod search;

pub use config::{ConfigError, SearchOptions, DEFAULT_MAX_PASSES};
pub use cost::{delta_swap, total_cost};
pub use error::{Error, MatrixKind, Result};
pub use search::{
    local_search, HistoryEntry, HistoryLabel, LocalSearch, Outcome, Status, Termination,
};

/// Matrix element type usable for costs.
///
/// Must be signed: deltas subtract distances. Unsigned matrices are rejected
/// at compile time.
///
/// ```compile_fail
/// let m = nalgebra::DMatrix::<u32>::from_element(3, 3, 1);
/// let _ = craft::local_search(&m, &m, &m, &[], None, None);
/// ```
pub trait Scalar:
    nalgebra::Scalar + num_traits::Num + num_traits::Signed + Copy + PartialOrd + Send + Sync
{
}

impl<T> Scalar for T where
    T: nalgebra::Scalar + num_traits::Num + num_traits::Signed + Copy + PartialOrd + Send + Sync
{
}

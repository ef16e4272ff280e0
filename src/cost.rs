//! Assignment cost and the linear-time exchange delta.
//!
//! The cost of a permutation `perm` (entity -> location) is
//!
//! ```text
//! sum over i != j of F[i][j] * D[perm[i]][perm[j]] * C[i][j]
//! ```
//!
//! Exchanging the locations of two entities only touches the terms that
//! mention one of them, which is what [`delta_swap`] exploits.

use nalgebra::{Dim, RawStorage, SquareMatrix};

use crate::error::{Error, MatrixKind, Result};
use crate::Scalar;

/// Total assignment cost of `perm`.
///
/// Diagonal terms are never included. Fails if the matrices are not square
/// and of equal size, or if `perm` is not a bijection over `0..n`.
pub fn total_cost<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
    perm: &[usize],
) -> Result<T>
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    let n = check_shapes(flow, distance, unit_cost)?;
    check_permutation(perm, n)?;
    Ok(cost_unchecked(flow, distance, unit_cost, perm))
}

/// Exact cost change of exchanging the locations of entities `i` and `j`.
///
/// Equals `total_cost(perm') - total_cost(perm)` where `perm'` has
/// `perm[i]` and `perm[j]` swapped, but runs in O(n). `perm` is not modified.
/// An exchange of an entity with itself has a delta of zero.
pub fn delta_swap<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
    perm: &[usize],
    i: usize,
    j: usize,
) -> Result<T>
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    let n = check_shapes(flow, distance, unit_cost)?;
    check_permutation(perm, n)?;
    for entity in [i, j] {
        if entity >= n {
            return Err(Error::EntityOutOfRange { entity, n });
        }
    }
    Ok(delta_unchecked(flow, distance, unit_cost, perm, i, j))
}

/// Checks that all three matrices are square and share one size, returning it.
pub fn check_shapes<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
) -> Result<usize>
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    let (rows, cols) = flow.shape();
    if rows != cols {
        return Err(Error::NotSquare {
            matrix: MatrixKind::Flow,
            rows,
            cols,
        });
    }

    for (matrix, m) in [
        (MatrixKind::Distance, distance),
        (MatrixKind::UnitCost, unit_cost),
    ] {
        let (r, c) = m.shape();
        if r != c {
            return Err(Error::NotSquare {
                matrix,
                rows: r,
                cols: c,
            });
        }
        if r != rows {
            return Err(Error::SizeMismatch {
                matrix,
                expected: rows,
                found: r,
            });
        }
    }

    Ok(rows)
}

/// Checks that `perm` maps `0..n` onto `0..n` one-to-one.
pub fn check_permutation(perm: &[usize], n: usize) -> Result<()> {
    if perm.len() != n {
        return Err(Error::PermutationLength {
            expected: n,
            found: perm.len(),
        });
    }

    let mut owner: Vec<Option<usize>> = vec![None; n];
    for (entity, &location) in perm.iter().enumerate() {
        if location >= n {
            return Err(Error::LocationOutOfRange {
                entity,
                location,
                n,
            });
        }
        if let Some(first) = owner[location] {
            return Err(Error::DuplicateLocation {
                location,
                first,
                second: entity,
            });
        }
        owner[location] = Some(entity);
    }

    Ok(())
}

pub(crate) fn cost_unchecked<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
    perm: &[usize],
) -> T
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    let n = perm.len();
    let mut total = T::zero();
    for i in 0..n {
        let pi = perm[i];
        for j in 0..n {
            if i == j {
                continue;
            }
            total = total + flow[(i, j)] * distance[(pi, perm[j])] * unit_cost[(i, j)];
        }
    }
    total
}

pub(crate) fn delta_unchecked<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
    perm: &[usize],
    i: usize,
    j: usize,
) -> T
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    if i == j {
        return T::zero();
    }

    let (pi, pj) = (perm[i], perm[j]);
    let mut delta = T::zero();

    for (k, &pk) in perm.iter().enumerate() {
        if k == i || k == j {
            continue;
        }
        // i now sits at pj, j at pi
        delta = delta + flow[(i, k)] * (distance[(pj, pk)] - distance[(pi, pk)]) * unit_cost[(i, k)];
        delta = delta + flow[(k, i)] * (distance[(pk, pj)] - distance[(pk, pi)]) * unit_cost[(k, i)];
        delta = delta + flow[(j, k)] * (distance[(pi, pk)] - distance[(pj, pk)]) * unit_cost[(j, k)];
        delta = delta + flow[(k, j)] * (distance[(pk, pi)] - distance[(pk, pj)]) * unit_cost[(k, j)];
    }

    // the i-j pair itself, counted once
    delta = delta + flow[(i, j)] * (distance[(pj, pi)] - distance[(pi, pj)]) * unit_cost[(i, j)];
    delta = delta + flow[(j, i)] * (distance[(pi, pj)] - distance[(pj, pi)]) * unit_cost[(j, i)];

    delta
}

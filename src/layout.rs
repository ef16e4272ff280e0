//! Building distance and unit-cost matrices from a floor plan.
//!
//! Departments are axis-aligned rectangles; the distance between two
//! locations is measured between rectangle centers.

use std::str::FromStr;

use nalgebra::DMatrix;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("expected 4 comma-separated values (x_start,x_end,y_start,y_end), got {0}")]
    FieldCount(usize),

    #[error("invalid number {0:?}")]
    Number(String),

    #[error("expected {expected} departments, got {found}")]
    Count { expected: usize, found: usize },

    #[error("matrix is not square ({rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl Rect {
    /// Bounds given in reverse are swapped.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            x1: x0.max(x1),
            y0: y0.min(y1),
            y1: y0.max(y1),
        }
    }

    pub fn center(&self) -> (f64, f64) {
        ((self.x0 + self.x1) / 2., (self.y0 + self.y1) / 2.)
    }
}

impl FromStr for Rect {
    type Err = LayoutError;

    /// Parses `x_start,x_end,y_start,y_end`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(LayoutError::FieldCount(parts.len()));
        }

        let mut v = [0.; 4];
        for (slot, part) in v.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| LayoutError::Number(part.to_string()))?;
        }

        Ok(Rect::new(v[0], v[1], v[2], v[3]))
    }
}

/// Parses a block of rectangles separated by `;` or, failing that, by lines.
pub fn parse_rects(block: &str, expected: Option<usize>) -> Result<Vec<Rect>, LayoutError> {
    let block = block.trim();
    let entries: Vec<&str> = if block.contains(';') {
        block.split(';').collect()
    } else {
        block.lines().collect()
    };

    let rects = entries
        .into_iter()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::parse)
        .collect::<Result<Vec<Rect>, _>>()?;

    match expected {
        Some(expected) if expected != rects.len() => Err(LayoutError::Count {
            expected,
            found: rects.len(),
        }),
        _ => Ok(rects),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Manhattan,
    Euclidean,
}

impl Metric {
    pub fn distance(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
        let (dx, dy) = (a.0 - b.0, a.1 - b.1);
        match self {
            Metric::Manhattan => dx.abs() + dy.abs(),
            Metric::Euclidean => dx.hypot(dy),
        }
    }
}

/// Pairwise distances between points, with a zero diagonal.
pub fn distance_matrix(points: &[(f64, f64)], metric: Metric) -> DMatrix<f64> {
    let n = points.len();
    DMatrix::from_fn(n, n, |p, q| {
        if p == q {
            0.
        } else {
            metric.distance(points[p], points[q])
        }
    })
}

/// Center-to-center distances between departments.
pub fn rect_distances(rects: &[Rect], metric: Metric) -> DMatrix<f64> {
    let centers: Vec<(f64, f64)> = rects.iter().map(Rect::center).collect();
    distance_matrix(&centers, metric)
}

/// Averages `m[(i, j)]` and `m[(j, i)]` and zeroes the diagonal.
pub fn symmetrize(m: &DMatrix<f64>) -> Result<DMatrix<f64>, LayoutError> {
    let (rows, cols) = m.shape();
    if rows != cols {
        return Err(LayoutError::NotSquare { rows, cols });
    }

    Ok(DMatrix::from_fn(rows, cols, |i, j| {
        if i == j {
            0.
        } else {
            0.5 * (m[(i, j)] + m[(j, i)])
        }
    }))
}

/// Unit cost of one for every pair.
pub fn uniform_unit_cost(n: usize) -> DMatrix<f64> {
    DMatrix::from_element(n, n, 1.)
}

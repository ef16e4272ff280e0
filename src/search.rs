//! Best-improvement pairwise-exchange local search.
//!
//! Every pass evaluates all exchanges between two free entities, commits the
//! one with the most negative delta (the first such pair in ascending `(i, j)`
//! order on ties) and stops once no exchange improves the cost.

use std::fmt;

use nalgebra::{Dim, RawStorage, SquareMatrix};
use tracing::{debug, info, trace};

use crate::config::SearchOptions;
use crate::cost::{check_permutation, check_shapes, cost_unchecked, delta_unchecked};
use crate::error::{Error, Result};
use crate::Scalar;

/// Live state of a run; [`Termination`] is what it settles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Running,
    Converged,
    PassLimitReached,
}

/// Why a search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// No exchange lowers the cost any further.
    Converged,
    /// The pass ceiling was hit first. The permutation is still valid.
    PassLimitReached,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryLabel {
    Initial,
    Exchange { first: usize, second: usize },
}

impl fmt::Display for HistoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryLabel::Initial => f.write_str("Initial"),
            HistoryLabel::Exchange { first, second } => write!(f, "Swap {first} <-> {second}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry<T> {
    pub label: HistoryLabel,
    pub cost: T,
}

/// Result of a finished search.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub permutation: Vec<usize>,
    pub cost: T,
    pub history: Vec<HistoryEntry<T>>,
    pub termination: Termination,
    pub passes: usize,
}

impl<T: Scalar> Outcome<T> {
    pub fn initial_cost(&self) -> T {
        self.history.first().map_or(self.cost, |entry| entry.cost)
    }

    /// Cost reduction relative to the starting permutation.
    pub fn savings(&self) -> T {
        self.initial_cost() - self.cost
    }

    pub fn exchanges(&self) -> usize {
        self.history.len().saturating_sub(1)
    }

    /// Entity occupying each location, i.e. the inverse permutation.
    pub fn location_order(&self) -> Vec<usize> {
        let mut order = vec![0; self.permutation.len()];
        for (entity, &location) in self.permutation.iter().enumerate() {
            order[location] = entity;
        }
        order
    }
}

/// Caller-owned state of one local-search run.
///
/// The matrices are borrowed for the lifetime of the run; the permutation and
/// the history belong to the run and change only through [`LocalSearch::step`].
#[derive(Debug)]
pub struct LocalSearch<'a, T, D, S>
where
    T: Scalar,
    D: Dim,
    S: RawStorage<T, D, D>,
{
    flow: &'a SquareMatrix<T, D, S>,
    distance: &'a SquareMatrix<T, D, S>,
    unit_cost: &'a SquareMatrix<T, D, S>,
    free: Vec<usize>,
    perm: Vec<usize>,
    cost: T,
    history: Vec<HistoryEntry<T>>,
    passes: usize,
    max_passes: usize,
    status: Status,
}

impl<'a, T, D, S> LocalSearch<'a, T, D, S>
where
    T: Scalar,
    D: Dim + Sync,
    S: RawStorage<T, D, D> + Sync,
{
    /// Validates the inputs and computes the baseline cost.
    ///
    /// No pass is run here. With fewer than two free entities the run is
    /// already [`Status::Converged`].
    pub fn new(
        flow: &'a SquareMatrix<T, D, S>,
        distance: &'a SquareMatrix<T, D, S>,
        unit_cost: &'a SquareMatrix<T, D, S>,
        options: &SearchOptions,
    ) -> Result<Self> {
        let n = check_shapes(flow, distance, unit_cost)?;

        let perm = match &options.initial {
            Some(initial) => {
                check_permutation(initial, n)?;
                initial.clone()
            }
            None => (0..n).collect(),
        };

        let mut fixed = vec![false; n];
        for &index in &options.fixed {
            if index >= n {
                return Err(Error::FixedIndexOutOfRange { index, n });
            }
            fixed[index] = true;
        }
        let free: Vec<usize> = (0..n).filter(|&entity| !fixed[entity]).collect();

        let cost = cost_unchecked(flow, distance, unit_cost, &perm);

        info!(
            event = "search_start",
            n,
            free = free.len(),
            max_passes = options.max_passes,
            cost = ?cost,
        );

        let mut search = Self {
            flow,
            distance,
            unit_cost,
            free,
            perm,
            cost,
            history: vec![HistoryEntry {
                label: HistoryLabel::Initial,
                cost,
            }],
            passes: 0,
            max_passes: options.max_passes,
            status: Status::Running,
        };

        if search.free.len() < 2 {
            search.finish(Status::Converged);
        }

        Ok(search)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn permutation(&self) -> &[usize] {
        &self.perm
    }

    pub fn cost(&self) -> T {
        self.cost
    }

    pub fn history(&self) -> &[HistoryEntry<T>] {
        &self.history
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Runs one pass and returns the resulting status.
    ///
    /// At most one exchange is committed. Does nothing once the run has
    /// reached a terminal status.
    pub fn step(&mut self) -> Status {
        if self.status != Status::Running {
            return self.status;
        }

        if self.passes >= self.max_passes {
            self.finish(Status::PassLimitReached);
            return self.status;
        }
        self.passes += 1;

        match self.best_exchange() {
            Some((i, j, delta)) => {
                self.perm.swap(i, j);
                self.cost = self.cost + delta;
                self.history.push(HistoryEntry {
                    label: HistoryLabel::Exchange {
                        first: i,
                        second: j,
                    },
                    cost: self.cost,
                });
                debug!(pass = self.passes, first = i, second = j, delta = ?delta, cost = ?self.cost);
            }
            None => {
                trace!(pass = self.passes, "no improving exchange");
                self.finish(Status::Converged);
            }
        }

        self.status
    }

    /// Steps until a terminal status and hands back the result.
    pub fn run(mut self) -> Outcome<T> {
        while self.step() == Status::Running {}

        let termination = match self.status {
            Status::PassLimitReached => Termination::PassLimitReached,
            _ => Termination::Converged,
        };

        Outcome {
            permutation: self.perm,
            cost: self.cost,
            history: self.history,
            termination,
            passes: self.passes,
        }
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        info!(
            event = "search_end",
            status = ?status,
            passes = self.passes,
            exchanges = self.history.len() - 1,
            cost = ?self.cost,
        );
    }

    /// Most improving exchange among free pairs, if any improves.
    #[cfg(not(feature = "rayon"))]
    fn best_exchange(&self) -> Option<(usize, usize, T)> {
        let mut best = None;
        let mut best_delta = T::zero();

        for (a, &i) in self.free.iter().enumerate() {
            for &j in &self.free[a + 1..] {
                let delta =
                    delta_unchecked(self.flow, self.distance, self.unit_cost, &self.perm, i, j);
                // strict comparison keeps the first pair on ties
                if delta < best_delta {
                    best_delta = delta;
                    best = Some((i, j, delta));
                }
            }
        }

        best
    }

    /// Most improving exchange among free pairs, if any improves.
    ///
    /// Deltas are evaluated in parallel; the reduction prefers the smaller
    /// `(i, j)` on ties so the choice matches the sequential scan.
    #[cfg(feature = "rayon")]
    fn best_exchange(&self) -> Option<(usize, usize, T)> {
        use rayon::prelude::*;

        let (flow, distance, unit_cost) = (self.flow, self.distance, self.unit_cost);
        let perm = &self.perm[..];
        let free = &self.free[..];

        (0..free.len())
            .into_par_iter()
            .flat_map_iter(|a| (a + 1..free.len()).map(move |b| (free[a], free[b])))
            .map(|(i, j)| (i, j, delta_unchecked(flow, distance, unit_cost, perm, i, j)))
            .filter(|&(_, _, delta)| delta < T::zero())
            .reduce_with(|x, y| {
                if y.2 < x.2 || (!(x.2 < y.2) && (y.0, y.1) < (x.0, x.1)) {
                    y
                } else {
                    x
                }
            })
    }
}

/// One-shot local search.
///
/// `initial` defaults to the identity permutation and `max_passes` to
/// [`DEFAULT_MAX_PASSES`](crate::config::DEFAULT_MAX_PASSES).
pub fn local_search<T, D, S>(
    flow: &SquareMatrix<T, D, S>,
    distance: &SquareMatrix<T, D, S>,
    unit_cost: &SquareMatrix<T, D, S>,
    fixed: &[usize],
    initial: Option<&[usize]>,
    max_passes: Option<usize>,
) -> Result<Outcome<T>>
where
    T: Scalar,
    D: Dim + Sync,
    S: RawStorage<T, D, D> + Sync,
{
    let mut options = SearchOptions::new().with_fixed(fixed.iter().copied());
    if let Some(initial) = initial {
        options = options.with_initial(initial.to_vec());
    }
    if let Some(max_passes) = max_passes {
        options = options.with_max_passes(max_passes);
    }

    Ok(LocalSearch::new(flow, distance, unit_cost, &options)?.run())
}

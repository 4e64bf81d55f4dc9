use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use nalgebra::DMatrix;

/// Cooperative cancellation for the combinatorial search.
///
/// Cloning shares the flag; any clone can cancel, and the search observes the
/// flag between candidate batches, before claiming new work, and between
/// maximum-coefficient rounds.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How many candidate vectors a worker tests between cancellation checks.
const BATCH_SIZE: u32 = 1024;

/// Brute-force search for an integer coefficient vector balancing the
/// reaction.
///
/// The outer loop raises the coefficient ceiling `M` from 1 to `max_coef`;
/// no valid vector with a smaller maximum can be skipped before any with a
/// larger one. Within a round, a pool of workers (one per unit of host
/// parallelism) draws starting values for the leading coordinate from a
/// shared cursor and enumerates its sub-lattice `{s} × {1..M}^(N−1)` in
/// lexicographic order. The first satisfying vector is published through a
/// bounded single-receiver channel and stops the siblings; which of several
/// equivalent solutions wins depends on scheduling.
///
/// Returns `None` when the lattice is exhausted, the token is cancelled or
/// the deadline passes.
pub(super) fn search(
    reactants: &DMatrix<f64>,
    products: &DMatrix<f64>,
    max_coef: usize,
    tolerance: f64,
    cancel: &CancelToken,
    timeout: Option<Duration>,
) -> Option<Vec<f64>> {
    let columns = reactants.ncols() + products.ncols();
    if columns == 0 || max_coef == 0 {
        return None;
    }
    let deadline = timeout.map(|t| Instant::now() + t);
    let workers = std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1);

    for max_value in 1..=max_coef {
        if expired(cancel, deadline) {
            return None;
        }

        let cursor = AtomicUsize::new(1);
        let stop = AtomicBool::new(false);
        let solution = std::thread::scope(|scope| {
            let (sender, receiver) = mpsc::sync_channel::<Vec<usize>>(1);
            for _ in 0..workers {
                let sender = sender.clone();
                let cursor = &cursor;
                let stop = &stop;
                scope.spawn(move || {
                    let mut lattice = Sublattice::new(
                        reactants, products, columns, max_value, tolerance,
                    );
                    loop {
                        if stop.load(Ordering::Relaxed) || expired(cancel, deadline) {
                            return;
                        }
                        let start = cursor.fetch_add(1, Ordering::Relaxed);
                        if start > max_value {
                            return;
                        }
                        if let Some(found) =
                            lattice.enumerate(start, || stop.load(Ordering::Relaxed) || expired(cancel, deadline))
                        {
                            stop.store(true, Ordering::Relaxed);
                            let _ = sender.try_send(found);
                            return;
                        }
                    }
                });
            }
            drop(sender);
            receiver.recv().ok()
        });

        if let Some(found) = solution {
            return Some(found.into_iter().map(|v| v as f64).collect());
        }
    }
    None
}

fn expired(cancel: &CancelToken, deadline: Option<Instant>) -> bool {
    cancel.is_cancelled() || deadline.is_some_and(|d| Instant::now() >= d)
}

/// Per-worker enumeration state with reusable score buffers.
struct Sublattice<'a> {
    reactants: &'a DMatrix<f64>,
    products: &'a DMatrix<f64>,
    columns: usize,
    max_value: usize,
    tolerance: f64,
    reactant_sums: Vec<f64>,
    product_sums: Vec<f64>,
}

impl<'a> Sublattice<'a> {
    fn new(
        reactants: &'a DMatrix<f64>,
        products: &'a DMatrix<f64>,
        columns: usize,
        max_value: usize,
        tolerance: f64,
    ) -> Self {
        Self {
            reactants,
            products,
            columns,
            max_value,
            tolerance,
            reactant_sums: vec![0.0; reactants.nrows()],
            product_sums: vec![0.0; products.nrows()],
        }
    }

    /// Walks `{start} × {1..max_value}^(N−1)` in lexicographic order,
    /// returning the first balancing vector. `should_stop` is polled every
    /// [`BATCH_SIZE`] candidates.
    fn enumerate(
        &mut self,
        start: usize,
        should_stop: impl Fn() -> bool,
    ) -> Option<Vec<usize>> {
        let mut current = vec![1usize; self.columns];
        current[0] = start;
        let mut since_check = 0u32;

        loop {
            since_check += 1;
            if since_check >= BATCH_SIZE {
                since_check = 0;
                if should_stop() {
                    return None;
                }
            }

            if self.balances(&current) {
                return Some(current);
            }

            // odometer over every position but the pinned leading coordinate
            let mut j = self.columns - 1;
            while j > 0 && current[j] == self.max_value {
                current[j] = 1;
                j -= 1;
            }
            if j == 0 {
                return None;
            }
            current[j] += 1;
        }
    }

    fn balances(&mut self, candidate: &[usize]) -> bool {
        let split = self.reactants.ncols();
        mul_into(self.reactants, &candidate[..split], &mut self.reactant_sums);
        mul_into(self.products, &candidate[split..], &mut self.product_sums);
        self.reactant_sums
            .iter()
            .zip(&self.product_sums)
            .all(|(r, p)| (r - p).abs() <= self.tolerance)
    }
}

fn mul_into(matrix: &DMatrix<f64>, coefs: &[usize], sums: &mut [f64]) {
    for (row, sum) in sums.iter_mut().enumerate() {
        *sum = coefs
            .iter()
            .enumerate()
            .map(|(col, c)| matrix[(row, col)] * *c as f64)
            .sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_blocks() -> (DMatrix<f64>, DMatrix<f64>) {
        // H2 + O2 = H2O
        let matrix = DMatrix::from_row_slice(2, 3, &[2.0, 0.0, 2.0, 0.0, 2.0, 1.0]);
        (
            matrix.columns(0, 2).into_owned(),
            matrix.columns(2, 1).into_owned(),
        )
    }

    #[test]
    fn finds_the_smallest_maximum_solution() {
        let (reactants, products) = water_blocks();
        let found = search(
            &reactants,
            &products,
            10,
            1e-8,
            &CancelToken::new(),
            None,
        )
        .unwrap();
        assert_eq!(found, vec![2.0, 1.0, 2.0]);
    }

    #[test]
    fn exhausting_the_lattice_returns_none() {
        // H2 = O2 cannot balance for any coefficient pair
        let reactants = DMatrix::from_row_slice(2, 1, &[2.0, 0.0]);
        let products = DMatrix::from_row_slice(2, 1, &[0.0, 2.0]);
        assert!(search(&reactants, &products, 5, 1e-8, &CancelToken::new(), None).is_none());
    }

    #[test]
    fn cancellation_stops_the_search() {
        let (reactants, products) = water_blocks();
        let token = CancelToken::new();
        token.cancel();
        assert!(search(&reactants, &products, 10, 1e-8, &token, None).is_none());
    }

    #[test]
    fn an_elapsed_deadline_stops_the_search() {
        let (reactants, products) = water_blocks();
        let result = search(
            &reactants,
            &products,
            10,
            1e-8,
            &CancelToken::new(),
            Some(Duration::ZERO),
        );
        assert!(result.is_none());
    }
}

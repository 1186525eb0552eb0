use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::VecDeque;

use super::CheckinError;
use crate::model::Question;

/// Number of questions asked per check-in.
pub const POOL_SIZE: usize = 4;

/// Source of uniformly distributed indices used to shuffle the catalog.
pub trait IndexSource {
    /// Returns an index in `0..bound`. `bound` is always at least 1.
    fn index_below(&mut self, bound: usize) -> usize;
}

/// Adapts any `rand` generator into an [`IndexSource`].
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl RngSource<ThreadRng> {
    /// Source backed by the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self(rand::rng())
    }
}

impl<R: Rng> IndexSource for RngSource<R> {
    fn index_below(&mut self, bound: usize) -> usize {
        self.0.random_range(0..bound)
    }
}

/// Replays a fixed sequence of offsets, then yields 0 once exhausted.
///
/// Offsets at or above the requested bound are clamped to `bound - 1`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIndices {
    script: VecDeque<usize>,
}

impl ScriptedIndices {
    #[must_use]
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// A source that leaves the catalog order untouched.
    #[must_use]
    pub fn identity() -> Self {
        Self::default()
    }
}

impl IndexSource for ScriptedIndices {
    fn index_below(&mut self, bound: usize) -> usize {
        let next = self.script.pop_front().unwrap_or(0);
        next.min(bound.saturating_sub(1))
    }
}

/// Shuffles the catalog and takes the first `size` questions.
///
/// Uses the forward Fisher-Yates walk: slot `i` swaps with `i + offset` where `offset`
/// is drawn from `source.index_below(len - i)`. Every question therefore lands in the
/// pool with equal probability and the pool never repeats an id (given a catalog with
/// distinct ids).
///
/// # Errors
///
/// Returns `CheckinError::CatalogTooSmall` if the catalog has fewer than `size` questions.
pub fn sample_pool<S: IndexSource + ?Sized>(
    catalog: &[Question],
    source: &mut S,
    size: usize,
) -> Result<Vec<Question>, CheckinError> {
    if catalog.len() < size {
        return Err(CheckinError::CatalogTooSmall {
            available: catalog.len(),
            requested: size,
        });
    }

    let mut order: Vec<usize> = (0..catalog.len()).collect();
    let len = order.len();
    for i in 0..len.saturating_sub(1) {
        let j = i + source.index_below(len - i);
        order.swap(i, j);
    }

    Ok(order
        .into_iter()
        .take(size)
        .map(|idx| catalog[idx].clone())
        .collect())
}

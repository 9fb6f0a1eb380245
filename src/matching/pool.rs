use std::sync::Arc;

use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use super::error::MatchResult;

/// Fixed-size worker pool for pure per-candidate scoring.
///
/// Output order always matches input order.
#[derive(Clone)]
pub struct ScoringPool {
    inner: Arc<rayon::ThreadPool>,
}

impl ScoringPool {
    pub fn new(workers: usize) -> MatchResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("fundmatch-score-{i}"))
            .build()?;
        Ok(Self {
            inner: Arc::new(pool),
        })
    }

    pub fn workers(&self) -> usize {
        self.inner.current_num_threads()
    }

    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        self.inner.install(|| items.par_iter().map(f).collect())
    }
}

impl std::fmt::Debug for ScoringPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringPool")
            .field("workers", &self.workers())
            .finish()
    }
}

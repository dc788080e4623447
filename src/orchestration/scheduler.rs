// Mon Jan 19 2026 - Alex

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Runs per-struct work either on a bounded rayon pool or inline.
///
/// Results always come back in input order, so callers can merge them
/// single-threaded without caring how they were produced.
pub struct StructScheduler {
    pool: Option<ThreadPool>,
}

impl StructScheduler {
    pub fn sequential() -> Self {
        Self { pool: None }
    }

    pub fn parallel(thread_count: usize) -> Self {
        match ThreadPoolBuilder::new()
            .num_threads(thread_count.max(1))
            .thread_name(|i| format!("struct-lint-{}", i))
            .build()
        {
            Ok(pool) => Self { pool: Some(pool) },
            Err(e) => {
                log::warn!("Falling back to sequential analysis: {}", e);
                Self::sequential()
            }
        }
    }

    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    pub fn map<T, R, F>(&self, items: &[T], f: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Send + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(|item| f(item)).collect()),
            None => items.iter().map(|item| f(item)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_preserves_order() {
        let items: Vec<u64> = (0..1000).collect();
        let scheduler = StructScheduler::parallel(4);
        let doubled = scheduler.map(&items, |x| x * 2);
        assert_eq!(doubled, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn test_sequential() {
        let scheduler = StructScheduler::sequential();
        assert!(!scheduler.is_parallel());
        assert_eq!(scheduler.map(&["a", "bb"], |s| s.len()), vec![1, 2]);
    }
}

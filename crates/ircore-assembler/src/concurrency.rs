//! Bounded fan-out for `batch_assemble`: the Assembler pipeline is
//! sequential per request, but many requests run at once, capped by
//! `PerformanceConfig.max_concurrent_queries` (§5 concurrency model).

/// Run `work` over `items`, at most `max_concurrency` at a time, preserving
/// input order in the returned results.
pub fn run_bounded<T, R, F>(items: Vec<T>, max_concurrency: usize, work: F) -> Vec<R>
where
    T: Send,
    R: Send,
    F: Fn(&T) -> R + Sync,
{
    let max_concurrency = max_concurrency.max(1);
    let mut results = Vec::with_capacity(items.len());
    for chunk in items.chunks(max_concurrency) {
        let chunk_results: Vec<R> = std::thread::scope(|scope| {
            let handles: Vec<_> = chunk.iter().map(|item| scope.spawn(|| work(item))).collect();
            handles.into_iter().map(|h| h.join().expect("assembly worker thread panicked")).collect()
        });
        results.extend(chunk_results);
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_order_across_chunks() {
        let items: Vec<u32> = (0..10).collect();
        let results = run_bounded(items, 3, |n| n * 2);
        assert_eq!(results, (0..10).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn zero_concurrency_is_treated_as_one() {
        let items = vec![1, 2, 3];
        let results = run_bounded(items, 0, |n| n + 1);
        assert_eq!(results, vec![2, 3, 4]);
    }
}

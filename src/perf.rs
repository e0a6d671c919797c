use std::cell::Cell;
use std::time::Instant;

/// 性能统计 Guard：记录 elapsed_ms + 处理条目数
///
/// 使用方式：
/// ```ignore
/// let perf = retail_demand_engine::perf::PerfGuard::new("run_batch");
/// // do work...
/// perf.record_items(sku_count);
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: Cell<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            items: Cell::new(0),
        }
    }

    /// 记录本次操作处理的条目数 (可多次调用,累加)
    pub fn record_items(&self, count: usize) {
        self.items.set(self.items.get().saturating_add(count));
    }

    pub fn items(&self) -> usize {
        self.items.get()
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let items = self.items.get();

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            items,
            "done"
        );
    }
}

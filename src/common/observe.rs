use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Clone, Default)]
pub struct Observability {
    counters: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    written:   AtomicU64,
    unchanged: AtomicU64,
    empty:     AtomicU64,
    failed:    AtomicU64,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    pub written:   u64,
    pub unchanged: u64,
    pub empty:     u64,
    pub failed:    u64,
}

impl Observability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn written(&self) {
        self.counters.written.fetch_add(1, Ordering::Relaxed);
    }

    pub fn unchanged(&self) {
        self.counters.unchanged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn empty(&self) {
        self.counters.empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn failed(&self) {
        self.counters.failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn stats(&self) -> Stats {
        let Counters { written, unchanged, empty, failed } = &*self.counters;
        Stats {
            written:   written.load(Ordering::Relaxed),
            unchanged: unchanged.load(Ordering::Relaxed),
            empty:     empty.load(Ordering::Relaxed),
            failed:    failed.load(Ordering::Relaxed),
        }
    }
}

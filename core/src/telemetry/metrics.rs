use std::sync::Mutex;

/// Counters for prediction traffic, shared between clones of the client.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: usize,
    pub failures: usize,
    pub stale_responses: usize,
}

struct Metrics {
    requests: usize,
    failures: usize,
    stale_responses: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics {
                requests: 0,
                failures: 0,
                stale_responses: 0,
            }),
        }
    }

    pub fn record_request(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.requests += 1;
        }
    }

    pub fn record_failure(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.failures += 1;
        }
    }

    pub fn record_stale(&self) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.stale_responses += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(metrics) = self.inner.lock() {
            MetricsSnapshot {
                requests: metrics.requests,
                failures: metrics.failures,
                stale_responses: metrics.stale_responses,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

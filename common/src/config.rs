use std::time::Duration;

use tracing::warn;

pub const DEFAULT_MAX_CONCURRENCY: usize = 50;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(500);
pub const DEFAULT_PAYLOAD_SIZE: usize = 56;

/// Tuning knobs for a single liveness scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanConfig {
    /// Upper bound on probes in flight at any moment within one scan.
    pub max_concurrency: usize,
    /// How long a single probe may wait for a reply.
    pub probe_timeout: Duration,
    /// Size of the echo payload in bytes.
    pub payload_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            payload_size: DEFAULT_PAYLOAD_SIZE,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A limit of zero would stall every scan, so it is raised to one.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        if max_concurrency == 0 {
            warn!("Concurrency of 0 requested, using 1 instead");
        }
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_probe_timeout(mut self, probe_timeout: Duration) -> Self {
        self.probe_timeout = probe_timeout;
        self
    }

    pub fn with_payload_size(mut self, payload_size: usize) -> Self {
        self.payload_size = payload_size;
        self
    }
}

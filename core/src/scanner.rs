//! The central **abstraction** for liveness scanning.
//!
//! A scan expands a CIDR block into host addresses, runs one [`Prober`] call per
//! address under a per-scan concurrency limit, and aggregates the reachable
//! subset into a [`LivenessReport`].
//!
//! **Architectural Note:**
//! The scanner only ever sees probe *values*. A probe that errors, times out or
//! panics is classified as [`ProbeOutcome::Unreachable`]; nothing a single host
//! does can fail the scan. The only scan-level error is an unparseable network.

use std::fmt;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Local;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::{Instrument, debug, error, info, info_span, trace, warn};

use sweepr_common::config::ScanConfig;
use sweepr_common::error::ScanError;
use sweepr_common::network::range::{CidrSpec, HostAddresses};

use crate::report::LivenessReport;

mod icmp;

pub use icmp::IcmpProber;

/// Result of probing a single host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeOutcome {
    Reachable,
    Unreachable,
}

/// Reasons a probe could not classify a host on its own.
///
/// Never leaves the scanner: every variant is treated as unreachable.
#[derive(Error, Debug)]
pub enum ProbeFailure {
    #[error("no reply within {0:?}")]
    Timeout(Duration),
    #[error("probe client unavailable: {0}")]
    Client(String),
    #[error("icmp error: {0}")]
    Icmp(#[from] surge_ping::SurgeError),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("probe task panicked")]
    Panicked,
}

/// Defines the strategy for checking whether a single host answers.
///
/// Implementations should return quickly on their own, but the scanner also
/// enforces [`ScanConfig::probe_timeout`] around every call.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, addr: IpAddr) -> Result<ProbeOutcome, ProbeFailure>;
}

/// Lifecycle of one scan invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Enumerating,
    Probing,
    Aggregating,
    Complete,
    Failed,
}

impl fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScanPhase::Enumerating => "enumerating",
            ScanPhase::Probing => "probing",
            ScanPhase::Aggregating => "aggregating",
            ScanPhase::Complete => "complete",
            ScanPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Probes every host of a network under a bounded worker pool.
///
/// Each call to [`LivenessScanner::scan`] builds its own limiter, so two scans
/// running at the same time may together exceed `max_concurrency`.
pub struct LivenessScanner {
    prober: Arc<dyn Prober>,
    cfg: ScanConfig,
}

impl fmt::Debug for LivenessScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LivenessScanner")
            .field("cfg", &self.cfg)
            .finish_non_exhaustive()
    }
}

impl LivenessScanner {
    pub fn new(prober: Arc<dyn Prober>, cfg: ScanConfig) -> Self {
        Self { prober, cfg }
    }

    /// A scanner backed by real ICMP echo requests.
    pub fn icmp(cfg: ScanConfig) -> Self {
        Self::new(Arc::new(IcmpProber::new(&cfg)), cfg)
    }

    pub fn config(&self) -> &ScanConfig {
        &self.cfg
    }

    /// Runs a full scan of `subnet` and returns the reachable hosts, sorted.
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidNetworkSpec`] if `subnet` is not an IPv4 or
    /// IPv6 network. No probe is sent in that case.
    pub async fn scan(&self, subnet: &str) -> Result<LivenessReport, ScanError> {
        let span = info_span!("scan", subnet = %subnet);
        self.run(subnet).instrument(span).await
    }

    async fn run(&self, subnet: &str) -> Result<LivenessReport, ScanError> {
        let scan_time = Local::now();
        let timer = Instant::now();

        debug!(phase = %ScanPhase::Enumerating);
        let spec = match CidrSpec::parse(subnet) {
            Ok(spec) => spec,
            Err(e) => {
                warn!(phase = %ScanPhase::Failed, "Rejected scan request: {e}");
                return Err(e);
            }
        };

        let hosts = spec.hosts();
        info!("Probing {} hosts in {spec}", hosts.remaining());

        debug!(phase = %ScanPhase::Probing);
        let mut reachable = self.probe_all(hosts).await;

        debug!(phase = %ScanPhase::Aggregating);
        reachable.sort();

        info!(
            phase = %ScanPhase::Complete,
            "{} reachable hosts in {spec} after {:.2}s",
            reachable.len(),
            timer.elapsed().as_secs_f64()
        );
        Ok(LivenessReport::new(subnet, reachable, scan_time))
    }

    async fn probe_all(&self, hosts: HostAddresses) -> Vec<IpAddr> {
        let limiter = Arc::new(Semaphore::new(self.cfg.max_concurrency));
        let mut workers: JoinSet<(IpAddr, ProbeOutcome)> = JoinSet::new();
        let mut reachable: Vec<IpAddr> = Vec::new();

        for addr in hosts {
            // A permit is taken before spawning, so pending addresses never
            // turn into idle tasks.
            let permit = match Arc::clone(&limiter).acquire_owned().await {
                Ok(permit) => permit,
                Err(e) => {
                    error!("Probe limiter closed unexpectedly: {e}");
                    break;
                }
            };

            let prober = Arc::clone(&self.prober);
            let probe_timeout = self.cfg.probe_timeout;
            workers.spawn(async move {
                let outcome = probe_host(prober.as_ref(), addr, probe_timeout).await;
                drop(permit);
                (addr, outcome)
            });

            while let Some(joined) = workers.try_join_next() {
                collect(joined, &mut reachable);
            }
        }

        while let Some(joined) = workers.join_next().await {
            collect(joined, &mut reachable);
        }

        reachable
    }
}

async fn probe_host(prober: &dyn Prober, addr: IpAddr, probe_timeout: Duration) -> ProbeOutcome {
    let result = match tokio::time::timeout(probe_timeout, prober.probe(addr)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ProbeFailure::Timeout(probe_timeout)),
    };

    match result {
        Ok(outcome) => outcome,
        Err(failure) => {
            trace!(%addr, "{failure}");
            ProbeOutcome::Unreachable
        }
    }
}

fn collect(joined: Result<(IpAddr, ProbeOutcome), JoinError>, reachable: &mut Vec<IpAddr>) {
    match joined {
        Ok((addr, ProbeOutcome::Reachable)) => reachable.push(addr),
        Ok((_, ProbeOutcome::Unreachable)) => {}
        Err(e) if e.is_panic() => debug!("{}", ProbeFailure::Panicked),
        Err(e) => debug!("Probe task did not finish: {e}"),
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

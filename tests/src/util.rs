#![cfg(test)]
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use sweepr_core::{ProbeFailure, ProbeOutcome, Prober};

/// Deterministic prober: the listed addresses answer, the rest stay silent.
#[derive(Default)]
pub struct StubProber {
    alive: HashSet<IpAddr>,
    calls: AtomicUsize,
}

impl StubProber {
    pub fn answering(addrs: &[&str]) -> Self {
        Self {
            alive: addrs.iter().map(|s| s.parse().unwrap()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for StubProber {
    async fn probe(&self, addr: IpAddr) -> Result<ProbeOutcome, ProbeFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.alive.contains(&addr) {
            Ok(ProbeOutcome::Reachable)
        } else {
            Ok(ProbeOutcome::Unreachable)
        }
    }
}

/// Fails every probe the way a process without raw socket rights would.
pub struct DeniedProber;

#[async_trait]
impl Prober for DeniedProber {
    async fn probe(&self, _addr: IpAddr) -> Result<ProbeOutcome, ProbeFailure> {
        Err(ProbeFailure::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied)))
    }
}

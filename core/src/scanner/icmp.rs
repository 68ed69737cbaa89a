//! ICMP echo prober.
//!
//! Sends a single echo request per host through `surge-ping`. Sockets are
//! opened lazily, one per address family, and shared by every probe of the
//! prober. On Linux an unprivileged process can only open them when
//! `net.ipv4.ping_group_range` allows it; otherwise every probe fails and the
//! scan reports no reachable hosts.

use std::net::IpAddr;
use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use surge_ping::{Client, Config, ICMP, PingIdentifier, PingSequence};
use tracing::{trace, warn};

use sweepr_common::config::ScanConfig;

use super::{ProbeFailure, ProbeOutcome, Prober};

pub struct IcmpProber {
    timeout: Duration,
    payload: Vec<u8>,
    v4: OnceLock<Option<Client>>,
    v6: OnceLock<Option<Client>>,
}

impl IcmpProber {
    pub fn new(cfg: &ScanConfig) -> Self {
        Self {
            timeout: cfg.probe_timeout,
            payload: vec![0; cfg.payload_size],
            v4: OnceLock::new(),
            v6: OnceLock::new(),
        }
    }

    fn client(&self, addr: &IpAddr) -> Option<&Client> {
        let (cell, kind, label) = match addr {
            IpAddr::V4(_) => (&self.v4, ICMP::V4, "ICMPv4"),
            IpAddr::V6(_) => (&self.v6, ICMP::V6, "ICMPv6"),
        };

        cell.get_or_init(|| {
            let config = Config::builder().kind(kind).build();
            match Client::new(&config) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Failed to open {label} socket, hosts will show as unreachable: {e}");
                    None
                }
            }
        })
        .as_ref()
    }
}

#[async_trait]
impl Prober for IcmpProber {
    async fn probe(&self, addr: IpAddr) -> Result<ProbeOutcome, ProbeFailure> {
        let client = self
            .client(&addr)
            .ok_or_else(|| ProbeFailure::Client("ICMP socket unavailable".into()))?;

        let mut pinger = client.pinger(addr, PingIdentifier(rand::random())).await;
        pinger.timeout(self.timeout);

        let (_reply, rtt) = pinger.ping(PingSequence(0), &self.payload).await?;
        trace!(%addr, "echo reply after {:.1}ms", rtt.as_secs_f64() * 1000.0);
        Ok(ProbeOutcome::Reachable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[tokio::test]
    #[ignore]
    async fn loopback_answers_echo() {
        let prober = IcmpProber::new(&ScanConfig::default());
        let outcome = prober.probe(IpAddr::V4(Ipv4Addr::LOCALHOST)).await.unwrap();
        assert_eq!(outcome, ProbeOutcome::Reachable);
    }

    #[tokio::test]
    #[ignore]
    async fn documentation_range_is_silent() {
        let cfg = ScanConfig::default().with_probe_timeout(Duration::from_millis(200));
        let prober = IcmpProber::new(&cfg);
        let result = prober.probe(IpAddr::V4(Ipv4Addr::new(203, 0, 113, 1))).await;
        assert!(result.is_err());
    }

    #[test]
    fn payload_follows_config() {
        let cfg = ScanConfig::default().with_payload_size(16);
        let prober = IcmpProber::new(&cfg);
        assert_eq!(prober.payload.len(), 16);
        assert_eq!(prober.timeout, cfg.probe_timeout);
    }
}

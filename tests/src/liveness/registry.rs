#![cfg(test)]
use std::sync::Arc;

use sweepr_common::config::ScanConfig;
use sweepr_core::{CidrRegistry, LivenessScanner};

use crate::util::StubProber;

/// Every network the registry accepts must be scannable.
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn registered_networks_scan_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let registry = CidrRegistry::open(dir.path().join("cidrs.json"));
    registry.ensure_exists().unwrap();

    for cidr in ["192.168.1.0/29", "10.0.0.5/30", "fd00::/126", "127.0.0.1/32"] {
        assert!(registry.add(cidr).unwrap(), "{cidr}");
    }
    assert!(registry.add("999.0.0.0/8").is_err());

    let prober = Arc::new(StubProber::answering(&["192.168.1.1", "10.0.0.6", "fd00::1"]));
    let scanner = LivenessScanner::new(prober, ScanConfig::default());

    let mut total = 0;
    for cidr in registry.load().unwrap() {
        let report = scanner.scan(&cidr).await.unwrap();
        assert_eq!(report.subnet, cidr);
        total += report.count;
    }
    assert_eq!(total, 3);
}

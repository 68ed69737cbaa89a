#![cfg(test)]
use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use sweepr_common::config::ScanConfig;
use sweepr_common::error::ScanError;
use sweepr_core::report::SCAN_TIME_FORMAT;
use sweepr_core::{LivenessReport, LivenessScanner};

use crate::util::{DeniedProber, StubProber};

fn scanner_with(prober: Arc<StubProber>) -> LivenessScanner {
    LivenessScanner::new(prober, ScanConfig::default())
}

fn as_set(ips: &[IpAddr]) -> HashSet<IpAddr> {
    ips.iter().copied().collect()
}

fn assert_valid_timestamp(report: &LivenessReport) {
    let json = serde_json::to_value(report).unwrap();
    let raw = json["scan_time"].as_str().unwrap();
    assert!(
        NaiveDateTime::parse_from_str(raw, SCAN_TIME_FORMAT).is_ok(),
        "bad timestamp {raw}"
    );
}

#[tokio::test]
async fn single_host_network_yields_empty_report() {
    let prober = Arc::new(StubProber::answering(&["127.0.0.1"]));
    let scanner = scanner_with(prober.clone());

    let report = scanner.scan("127.0.0.1/32").await.unwrap();

    assert_eq!(report.subnet, "127.0.0.1/32");
    assert_eq!(report.count, 0);
    assert!(report.ips.is_empty());
    assert_eq!(prober.calls(), 0);
    assert_valid_timestamp(&report);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slash_30_reports_both_hosts() {
    let prober = Arc::new(StubProber::answering(&["192.168.50.1", "192.168.50.2"]));
    let scanner = scanner_with(prober.clone());

    let report = scanner.scan("192.168.50.0/30").await.unwrap();

    assert_eq!(report.count, 2);
    assert_eq!(
        as_set(&report.ips),
        as_set(&["192.168.50.1".parse().unwrap(), "192.168.50.2".parse().unwrap()])
    );
    assert_eq!(prober.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn silent_network_is_not_an_error() {
    let prober = Arc::new(StubProber::default());
    let report = scanner_with(prober.clone()).scan("10.77.0.0/24").await.unwrap();

    assert_eq!(report.count, 0);
    assert!(report.ips.is_empty());
    assert_eq!(prober.calls(), 254);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ips"], serde_json::json!([]));
    assert_eq!(json["count"], 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn denied_probes_fold_into_unreachable() {
    let scanner = LivenessScanner::new(Arc::new(DeniedProber), ScanConfig::default());

    let report = scanner.scan("10.78.0.0/28").await.unwrap();

    assert_eq!(report.count, 0);
}

#[tokio::test]
async fn invalid_input_probes_nothing() {
    let prober = Arc::new(StubProber::default());
    let scanner = scanner_with(prober.clone());

    let err = scanner.scan("not-a-cidr").await.unwrap_err();

    assert!(matches!(err, ScanError::InvalidNetworkSpec { ref input, .. } if input == "not-a-cidr"));
    assert_eq!(prober.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn host_bits_in_input_are_tolerated() {
    let prober = Arc::new(StubProber::answering(&["10.0.0.5", "10.0.0.6"]));
    let scanner = scanner_with(prober);

    let loose = scanner.scan("10.0.0.5/30").await.unwrap();
    let exact = scanner.scan("10.0.0.4/30").await.unwrap();

    assert_eq!(loose.subnet, "10.0.0.5/30");
    assert_eq!(loose.ips, exact.ips);
    assert_eq!(loose.count, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn repeated_scans_are_stable() {
    let prober = Arc::new(StubProber::answering(&["172.16.8.9", "172.16.8.100", "172.16.9.3"]));
    let scanner = scanner_with(prober);

    let first = scanner.scan("172.16.8.0/23").await.unwrap();
    let second = scanner.scan("172.16.8.0/23").await.unwrap();

    assert_eq!(first.ips, second.ips);
    assert_eq!(first.count, 3);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_scans_are_independent() {
    let prober = Arc::new(StubProber::answering(&["10.1.0.1", "10.2.0.1"]));
    let scanner = Arc::new(scanner_with(prober.clone()));

    let (a, b) = tokio::join!(scanner.scan("10.1.0.0/24"), scanner.scan("10.2.0.0/24"));

    assert_eq!(a.unwrap().ips, vec!["10.1.0.1".parse::<IpAddr>().unwrap()]);
    assert_eq!(b.unwrap().ips, vec!["10.2.0.1".parse::<IpAddr>().unwrap()]);
    assert_eq!(prober.calls(), 508);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn ipv6_network_is_scanned() {
    let prober = Arc::new(StubProber::answering(&["fd00::3"]));
    let report = scanner_with(prober).scan("fd00::/125").await.unwrap();

    assert_eq!(report.ips, vec!["fd00::3".parse::<IpAddr>().unwrap()]);
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["ips"], serde_json::json!(["fd00::3"]));
}

/// Needs ICMP socket rights (root, or a permissive `ping_group_range`).
#[tokio::test]
#[ignore]
async fn loopback_answers_real_icmp() {
    let scanner = LivenessScanner::icmp(ScanConfig::default());
    let report = scanner.scan("127.0.0.0/30").await.unwrap();
    assert_eq!(report.count, 2);
}

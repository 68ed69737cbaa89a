use std::time::{Duration, Instant};

use anyhow::Context;
use colored::*;

use crate::sprint;
use crate::terminal::{colors, format, print, spinner};
use sweepr_common::config::ScanConfig;
use sweepr_common::network::range::CidrSpec;
use sweepr_core::{LivenessReport, LivenessScanner};

pub async fn scan(cidr: &str, cfg: ScanConfig, json: bool) -> anyhow::Result<()> {
    let scanner = LivenessScanner::icmp(cfg);

    if !json {
        print::header(&format!("scanning {cidr}"));
        if let Ok(spec) = CidrSpec::parse(cidr) {
            spinner::start_scan_spinner(&spec.to_string(), spec.hosts().remaining());
        }
    }

    let start_time: Instant = Instant::now();
    let result = scanner.scan(cidr).await;
    spinner::stop_spinner();
    let report: LivenessReport = result.with_context(|| format!("cannot scan '{cidr}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    scan_ends(&report, start_time.elapsed());
    Ok(())
}

fn scan_ends(report: &LivenessReport, total_time: Duration) {
    print::aligned_line("Subnet", 9, report.subnet.color(colors::PRIMARY));
    print::aligned_line(
        "Started",
        9,
        report.formatted_scan_time().color(colors::TIMESTAMP),
    );
    sprint!();

    if report.is_empty() {
        print::header("zero hosts detected");
        print::no_results();
        return;
    }

    print::header("alive hosts");
    for (idx, ip) in report.ips.iter().enumerate() {
        let (label, value) = format::ip_to_detail(ip);
        print::tree_head(idx, &format!("{value} {}", format!("({label})").dimmed()));
    }

    print_summary(report.count, total_time);
}

fn print_summary(count: usize, total_time: Duration) {
    let plain: String = format!(
        "Scan Complete: {count} alive hosts in {:.2}s",
        total_time.as_secs_f64()
    );
    print::fat_separator();
    print::centerln(&plain, Color::Green);
}

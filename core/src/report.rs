use std::net::IpAddr;

use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

/// Format of `scan_time` on the wire: local time, second precision.
pub const SCAN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of one scan, as handed back to the caller.
///
/// Serializes to `{ subnet, count, ips, scan_time }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivenessReport {
    /// The subnet exactly as the caller supplied it.
    pub subnet: String,
    pub count: usize,
    /// Reachable hosts in ascending order.
    pub ips: Vec<IpAddr>,
    /// Captured once, when the scan started.
    #[serde(serialize_with = "serialize_scan_time")]
    pub scan_time: DateTime<Local>,
}

impl LivenessReport {
    pub fn new(subnet: impl Into<String>, ips: Vec<IpAddr>, scan_time: DateTime<Local>) -> Self {
        Self {
            subnet: subnet.into(),
            count: ips.len(),
            ips,
            scan_time,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ips.is_empty()
    }

    pub fn formatted_scan_time(&self) -> String {
        self.scan_time.format(SCAN_TIME_FORMAT).to_string()
    }
}

fn serialize_scan_time<S>(time: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&time.format(SCAN_TIME_FORMAT))
}

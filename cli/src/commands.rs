pub mod registry;
pub mod scan;
pub mod serve;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use sweepr_common::config::{DEFAULT_MAX_CONCURRENCY, ScanConfig};
use sweepr_core::registry::DEFAULT_REGISTRY_FILE;

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Find out which hosts in your networks are alive.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// File holding the registered networks
    #[arg(long, global = true, env = "SWEEPR_REGISTRY", default_value = DEFAULT_REGISTRY_FILE)]
    pub registry: PathBuf,

    /// Increase log detail (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only print results and warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every host of a network once
    #[command(alias = "s")]
    Scan {
        /// Network in CIDR notation, e.g. 192.168.1.0/24
        cidr: String,
        #[command(flatten)]
        tuning: ScanArgs,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Serve the web interface and the scan API
    #[command(alias = "srv")]
    Serve {
        /// Address to listen on
        #[arg(long, env = "SWEEPR_BIND", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,
        #[command(flatten)]
        tuning: ScanArgs,
    },
    /// Register a network
    Add { cidr: String },
    /// Unregister a network
    #[command(alias = "rm")]
    Remove { cidr: String },
    /// Show registered networks
    #[command(alias = "ls")]
    List,
}

#[derive(Args, Clone, Copy)]
pub struct ScanArgs {
    /// Maximum number of probes in flight
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub concurrency: usize,
    /// Per-host reply timeout in milliseconds
    #[arg(long = "timeout-ms", default_value_t = 500)]
    pub timeout_ms: u64,
}

impl ScanArgs {
    pub fn to_config(self) -> ScanConfig {
        ScanConfig::new()
            .with_max_concurrency(self.concurrency)
            .with_probe_timeout(Duration::from_millis(self.timeout_ms))
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        CommandLine::command().debug_assert();
    }

    #[test]
    fn scan_defaults_match_config_defaults() {
        let cli = CommandLine::try_parse_from(["sweepr", "scan", "10.0.0.0/24"]).unwrap();
        let Commands::Scan { cidr, tuning, json } = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(cidr, "10.0.0.0/24");
        assert!(!json);
        assert_eq!(tuning.to_config(), ScanConfig::default());
    }

    #[test]
    fn aliases_resolve() {
        let cli = CommandLine::try_parse_from(["sweepr", "ls", "--registry", "/tmp/x.json"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
        assert_eq!(cli.registry, PathBuf::from("/tmp/x.json"));

        let cli = CommandLine::try_parse_from(["sweepr", "s", "10.0.0.0/30", "--timeout-ms", "50"]).unwrap();
        let Commands::Scan { tuning, .. } = cli.command else {
            panic!("expected scan command");
        };
        assert_eq!(tuning.to_config().probe_timeout, Duration::from_millis(50));
    }
}

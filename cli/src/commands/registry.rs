use colored::*;
use tracing::{info, warn};

use crate::terminal::{colors, print};
use sweepr_core::CidrRegistry;

pub fn add(registry: &CidrRegistry, cidr: &str) -> anyhow::Result<()> {
    if registry.add(cidr)? {
        info!("Registered {cidr}");
    } else {
        warn!("{cidr} is already registered");
    }
    Ok(())
}

pub fn remove(registry: &CidrRegistry, cidr: &str) -> anyhow::Result<()> {
    if registry.remove(cidr)? {
        info!("Removed {cidr}");
    } else {
        warn!("{cidr} is not registered");
    }
    Ok(())
}

pub fn list(registry: &CidrRegistry) -> anyhow::Result<()> {
    let cidrs: Vec<String> = registry.load()?;
    print::header(&format!("{} registered networks", cidrs.len()));
    for (idx, cidr) in cidrs.iter().enumerate() {
        print::tree_head(idx, cidr);
    }
    if cidrs.is_empty() {
        print::print_status(
            format!("Nothing in {}, try 'sweepr add <CIDR>'", registry.path().display())
                .color(colors::TEXT_DEFAULT)
                .to_string(),
        );
    }
    Ok(())
}

//! # CIDR Registry
//!
//! The list of networks an operator has registered for scanning, persisted as a
//! pretty-printed JSON array of strings. Order is insertion order and entries
//! are stored exactly as they were typed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use sweepr_common::error::ScanError;
use sweepr_common::network::range::CidrSpec;

pub const DEFAULT_REGISTRY_FILE: &str = "cidrs.json";

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("failed to access registry file: {0}")]
    Io(#[from] std::io::Error),
    #[error("registry file is not a JSON list of strings: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error(transparent)]
    InvalidNetworkSpec(#[from] ScanError),
}

#[derive(Debug, Clone)]
pub struct CidrRegistry {
    path: PathBuf,
}

impl CidrRegistry {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all registered networks. A missing file is an empty registry.
    pub fn load(&self) -> Result<Vec<String>, RegistryError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Replaces the registry contents with `cidrs`.
    pub fn save(&self, cidrs: &[String]) -> Result<(), RegistryError> {
        let json = serde_json::to_string_pretty(cidrs)?;
        fs::write(&self.path, json)?;
        debug!("Saved {} networks to {}", cidrs.len(), self.path.display());
        Ok(())
    }

    /// Writes an empty registry if none exists yet.
    pub fn ensure_exists(&self) -> Result<(), RegistryError> {
        if !self.path.exists() {
            info!("Creating empty registry at {}", self.path.display());
            self.save(&[])?;
        }
        Ok(())
    }

    /// Registers `cidr` if it parses as a network and is not already present.
    ///
    /// Returns `false` for duplicates. The check is on the exact string, so
    /// `10.0.0.5/24` and `10.0.0.0/24` are distinct entries.
    pub fn add(&self, cidr: &str) -> Result<bool, RegistryError> {
        CidrSpec::parse(cidr)?;

        let mut cidrs = self.load()?;
        if cidrs.iter().any(|known| known == cidr) {
            return Ok(false);
        }

        cidrs.push(cidr.to_string());
        self.save(&cidrs)?;
        Ok(true)
    }

    /// Removes `cidr`, returning `false` if it was not registered.
    pub fn remove(&self, cidr: &str) -> Result<bool, RegistryError> {
        let mut cidrs = self.load()?;
        let Some(idx) = cidrs.iter().position(|known| known == cidr) else {
            return Ok(false);
        };

        cidrs.remove(idx);
        self.save(&cidrs)?;
        Ok(true)
    }
}

impl Default for CidrRegistry {
    fn default() -> Self {
        Self::open(DEFAULT_REGISTRY_FILE)
    }
}

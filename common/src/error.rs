use thiserror::Error;

/// Errors surfaced to callers of a scan.
///
/// Individual probe failures never show up here; they are folded into an
/// unreachable classification by the scanner.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("invalid network spec '{input}': {reason}")]
    InvalidNetworkSpec { input: String, reason: String },
}

impl ScanError {
    pub fn invalid_network(input: &str, reason: impl ToString) -> Self {
        Self::InvalidNetworkSpec {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

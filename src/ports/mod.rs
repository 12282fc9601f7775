// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::error::ProbeError;

/// Port for running the external probing tool
///
/// Implementations resolve to the tool's stdout on a zero exit status, or
/// to [`ProbeError::Process`] carrying the exit code and captured stderr.
/// Retry policy belongs to the caller.
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe a media file and return the raw JSON text
    async fn probe(&self, file_path: &Path) -> Result<String, ProbeError>;
}

//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use fgortho::bucket::BucketError;
use fgortho::download::DownloadError;
use fgortho::fetch::FetchError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Neither an index nor a lon/lat pair was given
    MissingBucket,
    /// Failed to initialize logging
    Logging(String),
    /// Failed to create the HTTP client
    Transport(FetchError),
    /// Invalid bucket index or coordinates
    Bucket(BucketError),
    /// The download pipeline failed
    Download(DownloadError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        // An existing orthophoto is a skip, not a failure, but still exits
        // non-zero so scripts notice.
        if let CliError::Download(DownloadError::OutputExists { path }) = self {
            eprintln!(
                "Target orthophoto already exists, skipping: {}",
                path.display()
            );
            eprintln!("Pass --overwrite to override this check.");
            process::exit(1)
        }

        eprintln!("Error: {}", self);
        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingBucket => write!(f, "You gotta give me lon, lat or index!"),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Transport(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Bucket(e) => write!(f, "Invalid bucket: {}", e),
            CliError::Download(e) => write!(f, "Download failed: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Transport(e) => Some(e),
            CliError::Bucket(e) => Some(e),
            CliError::Download(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BucketError> for CliError {
    fn from(e: BucketError) -> Self {
        CliError::Bucket(e)
    }
}

impl From<DownloadError> for CliError {
    fn from(e: DownloadError) -> Self {
        CliError::Download(e)
    }
}

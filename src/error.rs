use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors surfaced before any worker starts.
///
/// Per-directory failures during the walk are deliberately absent here:
/// unreadable subtrees are expected (permission denied under another user's
/// home, say) and are skipped in place rather than poisoning the run.
#[derive(Debug)]
pub enum SearchError {
    /// The pattern did not compile, in either regex or glob mode.
    BadPattern { pattern: String, reason: String },
    /// A user-supplied root is missing, unreadable, or not a directory.
    InvalidRoot { path: PathBuf, source: io::Error },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadPattern { pattern, reason } => {
                write!(f, "invalid pattern '{pattern}': {reason}")
            }
            Self::InvalidRoot { path, source } => {
                write!(f, "{}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::BadPattern { .. } => None,
            Self::InvalidRoot { source, .. } => Some(source),
        }
    }
}

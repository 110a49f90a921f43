// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors surfaced by the remote booking backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The remote rejected the request as malformed or incomplete.
    Validation {
        /// The remote's description of the problem.
        message: String,
    },
    /// The caller is unauthenticated or lacks ownership/admin
    /// privilege. Surfaced to trigger a re-authentication flow.
    Auth {
        /// The remote's description of the problem.
        message: String,
    },
    /// The target record no longer exists remotely. Callers should
    /// resynchronize via reconciliation.
    NotFound {
        /// The remote's description of the problem.
        message: String,
    },
    /// The remote was unreachable or failed internally. Local state
    /// is left unchanged; safe to retry.
    Transport {
        /// A description of the failure.
        message: String,
    },
}

impl std::fmt::Display for RemoteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation { message } => write!(f, "Remote validation failed: {message}"),
            Self::Auth { message } => write!(f, "Authentication failed: {message}"),
            Self::NotFound { message } => write!(f, "Not found: {message}"),
            Self::Transport { message } => write!(f, "Remote unreachable: {message}"),
        }
    }
}

impl std::error::Error for RemoteError {}

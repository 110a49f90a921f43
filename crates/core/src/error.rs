// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use roombook_domain::BookingRejection;
use roombook_remote::RemoteError;
use thiserror::Error;

/// Failures surfaced by reservation store operations.
///
/// Every operation returns a structured `Result` rather than
/// panicking or hiding failures; rejection and remote-failure paths
/// are both plain data for the caller to handle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The conflict detector rejected the request. Local state is
    /// unchanged and the remote was never contacted.
    #[error("booking rejected: {0}")]
    Rejected(BookingRejection),
    /// An update was requested for a reservation that has no id yet.
    #[error("update requires an existing reservation id")]
    MissingId,
    /// The remote collaborator failed the operation. Local state is
    /// unchanged.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

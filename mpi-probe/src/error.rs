//! Error types for the probe.

use std::os::raw::c_int;
use thiserror::Error;

/// Result type for probe operations.
pub type Result<T> = std::result::Result<T, ProbeError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProbeError {
    /// This process already joined the process group.
    #[error("process group has already been joined")]
    AlreadyJoined,

    /// The process group was left; MPI cannot be initialized a second time.
    #[error("process group has already been left and cannot be joined again")]
    AlreadyLeft,

    #[error("failed to join the process group (MPI error code {0})")]
    Join(i32),

    #[error("failed to query the process group (MPI error code {0})")]
    Query(i32),

    #[error("failed to leave the process group (MPI error code {0})")]
    Leave(i32),

    /// The runtime handed back a negative rank or size.
    #[error("runtime returned a negative {what}: {value}")]
    NegativeValue { what: &'static str, value: i32 },

    #[error("rank {rank} is not valid in a group of size {size}")]
    InvalidIdentity { rank: u32, size: u32 },
}

/// Check an MPI return code. `MPI_SUCCESS` is 0 in every implementation.
pub(crate) fn check(code: c_int) -> std::result::Result<(), i32> {
    if code == 0 {
        Ok(())
    } else {
        Err(code)
    }
}

/// Convert a count returned by the runtime, rejecting negative values.
pub(crate) fn non_negative(what: &'static str, value: c_int) -> Result<u32> {
    u32::try_from(value).map_err(|_| ProbeError::NegativeValue { what, value })
}

//! The probe sequence run by every process between join and leave.
use crate::{CommGroup, ProbeError, ProcessGroup, Result};
use std::fmt;
use std::io::{self, Write};
use tracing::{debug, info_span, warn};

/// Rank of this process together with the size of its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    rank: u32,
    size: u32,
}

impl Identity {
    /// Fails unless `size >= 1` and `rank < size`.
    pub fn new(rank: u32, size: u32) -> Result<Identity> {
        if rank >= size {
            return Err(ProbeError::InvalidIdentity { rank, size });
        }
        Ok(Identity { rank, size })
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rank {} of {}", self.rank, self.size)
    }
}

/// Write the greeting line for `identity`.
pub fn report<W: Write>(identity: &Identity, out: &mut W) -> io::Result<()> {
    writeln!(out, "Hello from {}", identity)?;
    out.flush()
}

/// Query this process's identity in `group` and report it to `out`.
///
/// A failed write is logged and otherwise ignored: the caller still has to
/// reach the closing collective, or every other process would wait on it.
pub fn run<G, W>(group: &G, out: &mut W) -> Result<Identity>
where
    G: CommGroup + ?Sized,
    W: Write,
{
    let identity = group.identity()?;
    let span = info_span!("probe", rank = identity.rank(), size = identity.size());
    let _enter = span.enter();

    match report(&identity, out) {
        Ok(()) => debug!("reported identity"),
        Err(err) => warn!(%err, "failed to write greeting"),
    }
    Ok(identity)
}

/// Join a `P`, report this process's identity to `out`, then leave.
///
/// Any error here is fatal for the process: nothing is retried, and a failed
/// join writes nothing.
pub fn run_process<P, W>(out: &mut W) -> Result<Identity>
where
    P: ProcessGroup,
    W: Write,
{
    let group = P::join()?;
    let identity = run(&group, out)?;
    match group.processor_name() {
        Ok(node) => debug!(%identity, %node, "placement"),
        Err(err) => debug!(%identity, %err, "processor name unavailable"),
    }
    group.leave()?;
    Ok(identity)
}

pub trait CommGroup {
    /// Get the rank of the process in the group.
    fn rank(&self) -> Result<u32>;
    /// Get the size of this communication group.
    fn size(&self) -> Result<u32>;
    /// Get rank and size together, checked against each other.
    fn identity(&self) -> Result<Identity> {
        Identity::new(self.rank()?, self.size()?)
    }
}

/// A group this process joins at startup and leaves before exiting.
///
/// Both `join` and `leave` are collective over every launched process.
pub trait ProcessGroup: CommGroup + Sized {
    /// Join the process group launched alongside this process.
    fn join() -> Result<Self>;
    /// Leave the process group. No group operation may follow.
    fn leave(self) -> Result<()>;
    /// Name of the node this process runs on, as reported by the runtime.
    fn processor_name(&self) -> Result<String>;
}

mod error;
pub mod logging;
mod mpi;
mod probe;
pub use error::{ProbeError, Result};
pub use mpi::{library_version, MpiCommGroup};
pub use probe::{report, run, run_process, Identity};

//! MPI-based implementation of CommGroup.
use crate::error::{check, non_negative};
use crate::{CommGroup, ProbeError, ProcessGroup, Result};
use lazy_static::lazy_static;
use mpi_sys::{
    MPI_Comm, MPI_Comm_rank, MPI_Comm_size, MPI_Finalize, MPI_Finalized, MPI_Get_processor_name,
    MPI_Get_version, MPI_Init, MPI_Initialized, MPI_MAX_PROCESSOR_NAME, RSMPI_COMM_WORLD,
};
use std::os::raw::{c_char, c_int};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, warn};

lazy_static! {
    static ref MPI_JOIN_LOCK: Mutex<bool> = Mutex::new(false);
}

/// Version of the MPI standard implemented by the linked runtime.
///
/// May be called before joining and after leaving.
pub fn library_version() -> Result<(i32, i32)> {
    let mut version: c_int = 0;
    let mut subversion: c_int = 0;
    unsafe {
        check(MPI_Get_version(&mut version, &mut subversion)).map_err(ProbeError::Query)?;
    }
    Ok((version, subversion))
}

/// Membership of this process in the world communicator.
///
/// Joining initializes the runtime, and leaving (or dropping the group)
/// finalizes it. Both are collective over every launched process.
pub struct MpiCommGroup {
    comm: MPI_Comm,
    joined: bool,
}

impl ProcessGroup for MpiCommGroup {
    fn join() -> Result<MpiCommGroup> {
        let mut join_lock = MPI_JOIN_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *join_lock {
            return Err(ProbeError::AlreadyJoined);
        }
        unsafe {
            let mut flag: c_int = 0;
            check(MPI_Finalized(&mut flag)).map_err(ProbeError::Join)?;
            if flag != 0 {
                return Err(ProbeError::AlreadyLeft);
            }
            check(MPI_Initialized(&mut flag)).map_err(ProbeError::Join)?;
            if flag != 0 {
                return Err(ProbeError::AlreadyJoined);
            }
            check(MPI_Init(std::ptr::null_mut(), std::ptr::null_mut()))
                .map_err(ProbeError::Join)?;
            *join_lock = true;
            debug!("joined process group");
            Ok(MpiCommGroup {
                comm: RSMPI_COMM_WORLD,
                joined: true,
            })
        }
    }

    fn leave(mut self) -> Result<()> {
        self.finalize().map_err(ProbeError::Leave)?;
        debug!("left process group");
        Ok(())
    }

    fn processor_name(&self) -> Result<String> {
        let mut buffer = vec![0 as c_char; MPI_MAX_PROCESSOR_NAME as usize];
        let mut len: c_int = 0;
        unsafe {
            check(MPI_Get_processor_name(buffer.as_mut_ptr(), &mut len))
                .map_err(ProbeError::Query)?;
        }
        let len = non_negative("processor name length", len)? as usize;
        let bytes: Vec<u8> = buffer[..len.min(buffer.len())]
            .iter()
            .map(|&c| c as u8)
            .collect();
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl MpiCommGroup {
    fn finalize(&mut self) -> std::result::Result<(), i32> {
        if !self.joined {
            return Ok(());
        }
        self.joined = false;
        let code = unsafe { MPI_Finalize() };
        let mut join_lock = MPI_JOIN_LOCK
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *join_lock = false;
        check(code)
    }
}

impl Drop for MpiCommGroup {
    fn drop(&mut self) {
        if let Err(code) = self.finalize() {
            warn!(code, "failed to leave process group on drop");
        }
    }
}

impl CommGroup for MpiCommGroup {
    fn rank(&self) -> Result<u32> {
        let mut value = 0;
        unsafe {
            check(MPI_Comm_rank(self.comm, &mut value)).map_err(ProbeError::Query)?;
        }
        non_negative("rank", value)
    }

    fn size(&self) -> Result<u32> {
        let mut value = 0;
        unsafe {
            check(MPI_Comm_size(self.comm, &mut value)).map_err(ProbeError::Query)?;
        }
        non_negative("size", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Needs an MPI runtime that supports singleton initialization.
    #[test]
    #[ignore = "requires an MPI runtime"]
    fn join_query_leave_as_singleton() {
        let (version, _) = library_version().unwrap();
        assert!(version >= 1);

        let group = MpiCommGroup::join().unwrap();
        assert!(matches!(
            MpiCommGroup::join(),
            Err(ProbeError::AlreadyJoined)
        ));
        let identity = group.identity().unwrap();
        assert!(identity.rank() < identity.size());
        assert!(!group.processor_name().unwrap().is_empty());
        group.leave().unwrap();

        assert!(matches!(MpiCommGroup::join(), Err(ProbeError::AlreadyLeft)));
    }
}

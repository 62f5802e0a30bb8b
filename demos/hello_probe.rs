//! Join the launched process group, greet from this rank, and leave.
use mpi_probe::{library_version, logging, run_process, MpiCommGroup};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error};

fn main() -> ExitCode {
    logging::init_logging();
    match library_version() {
        Ok((version, subversion)) => debug!("runtime implements MPI-{}.{}", version, subversion),
        Err(err) => debug!(%err, "runtime version unavailable"),
    }

    match run_process::<MpiCommGroup, _>(&mut io::stdout().lock()) {
        Ok(identity) => {
            debug!(%identity, "probe finished");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "probe failed");
            ExitCode::FAILURE
        }
    }
}

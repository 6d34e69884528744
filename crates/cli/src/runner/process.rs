// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Child process isolation and termination.
//!
//! The toolchain forks its own children (compilers, test binaries), so a
//! runaway run is killed by process group rather than by pid.

use std::process::{Child, Command};

/// Start the command as the leader of a new process group.
#[cfg(unix)]
pub fn own_group(cmd: &mut Command) {
    use std::os::unix::process::CommandExt;
    cmd.process_group(0);
}

#[cfg(not(unix))]
pub fn own_group(_cmd: &mut Command) {}

/// Kill the child's process group and reap the child.
pub fn terminate(child: &mut Child) {
    kill_group(child);
    if let Err(e) = child.wait() {
        tracing::warn!("failed to reap pid {}: {}", child.id(), e);
    }
}

#[cfg(unix)]
#[allow(unsafe_code)]
fn kill_group(child: &mut Child) {
    let Ok(pgid) = libc::pid_t::try_from(child.id()) else {
        let _ = child.kill();
        return;
    };
    // SAFETY: killpg takes plain integers and touches no memory. The child
    // has not been reaped yet, so its pid still names the group it leads.
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(
            "killpg({}) failed: {}",
            pgid,
            std::io::Error::last_os_error()
        );
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) {
    let _ = child.kill();
}

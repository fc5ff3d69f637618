use std::io;

/// Ask the OS to deliver signal `signo` to `pid`
#[cfg(unix)]
pub fn deliver(pid: u32, signo: i32) -> io::Result<()> {
    let pid = libc::pid_t::try_from(pid).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("pid {} is out of range", pid),
        )
    })?;

    let rc = unsafe { libc::kill(pid, signo) };
    if rc == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
pub fn deliver(_pid: u32, _signo: i32) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "POSIX signals are not available on this platform",
    ))
}

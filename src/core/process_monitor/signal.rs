//! Signal delivery to a selected process.

use std::fmt;
use std::io;
use thiserror::Error;

use crate::platform::signal::deliver;

/// Signals that can be sent from the monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Terminate,
    Kill,
    Stop,
    Continue,
    Hangup,
    User1,
    User2,
}

impl SignalKind {
    /// Order of the signal menu
    pub const ALL: [SignalKind; 7] = [
        SignalKind::Terminate,
        SignalKind::Kill,
        SignalKind::Stop,
        SignalKind::Continue,
        SignalKind::Hangup,
        SignalKind::User1,
        SignalKind::User2,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SignalKind::Terminate => "SIGTERM",
            SignalKind::Kill => "SIGKILL",
            SignalKind::Stop => "SIGSTOP",
            SignalKind::Continue => "SIGCONT",
            SignalKind::Hangup => "SIGHUP",
            SignalKind::User1 => "SIGUSR1",
            SignalKind::User2 => "SIGUSR2",
        }
    }

    /// Linux signal number, used for labels
    pub fn number(self) -> i32 {
        match self {
            SignalKind::Terminate => 15,
            SignalKind::Kill => 9,
            SignalKind::Stop => 19,
            SignalKind::Continue => 18,
            SignalKind::Hangup => 1,
            SignalKind::User1 => 10,
            SignalKind::User2 => 12,
        }
    }

    /// Signal number on the running platform
    #[cfg(unix)]
    pub fn os_number(self) -> i32 {
        match self {
            SignalKind::Terminate => libc::SIGTERM,
            SignalKind::Kill => libc::SIGKILL,
            SignalKind::Stop => libc::SIGSTOP,
            SignalKind::Continue => libc::SIGCONT,
            SignalKind::Hangup => libc::SIGHUP,
            SignalKind::User1 => libc::SIGUSR1,
            SignalKind::User2 => libc::SIGUSR2,
        }
    }

    #[cfg(not(unix))]
    pub fn os_number(self) -> i32 {
        self.number()
    }

    pub fn description(self) -> &'static str {
        match self {
            SignalKind::Terminate => "Ask the process to terminate",
            SignalKind::Kill => "Kill immediately",
            SignalKind::Stop => "Pause execution",
            SignalKind::Continue => "Resume a stopped process",
            SignalKind::Hangup => "Hang up / reload",
            SignalKind::User1 => "User-defined signal 1",
            SignalKind::User2 => "User-defined signal 2",
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}

/// Why a signal could not be delivered
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("process not found")]
    NotFound,

    #[error("permission denied")]
    PermissionDenied,

    #[error("{0}")]
    Other(String),
}

impl DispatchError {
    pub fn other<S: Into<String>>(msg: S) -> Self {
        DispatchError::Other(msg.into())
    }
}

impl From<io::Error> for DispatchError {
    fn from(err: io::Error) -> Self {
        #[cfg(unix)]
        {
            if err.raw_os_error() == Some(libc::ESRCH) {
                return DispatchError::NotFound;
            }
        }

        match err.kind() {
            io::ErrorKind::NotFound => DispatchError::NotFound,
            io::ErrorKind::PermissionDenied => DispatchError::PermissionDenied,
            _ => DispatchError::Other(err.to_string()),
        }
    }
}

/// A signal aimed at one pid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalRequest {
    pub pid: u32,
    pub signal: SignalKind,
}

/// Sends signals to processes. Delivery is fire-and-forget: `send` returns
/// as soon as the OS accepted or refused the request.
pub trait SignalDispatcher {
    fn send(&self, pid: u32, signal: SignalKind) -> Result<(), DispatchError>;
}

/// Dispatcher using the OS `kill` primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct OsSignalDispatcher;

impl SignalDispatcher for OsSignalDispatcher {
    fn send(&self, pid: u32, signal: SignalKind) -> Result<(), DispatchError> {
        // pid 0 addresses our own process group
        if pid == 0 {
            return Err(DispatchError::other("refusing to signal pid 0"));
        }
        deliver(pid, signal.os_number()).map_err(DispatchError::from)
    }
}

/// Result of sending a signal, ready to be shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalOutcome {
    pub request: SignalRequest,
    pub result: Result<(), DispatchError>,
}

impl SignalOutcome {
    pub fn is_error(&self) -> bool {
        self.result.is_err()
    }

    pub fn message(&self) -> String {
        let SignalRequest { pid, signal } = self.request;
        match &self.result {
            Ok(()) => format!("Sent {} to process {}", signal.name(), pid),
            Err(DispatchError::NotFound) => format!("Process {} not found", pid),
            Err(DispatchError::PermissionDenied) => format!(
                "Permission denied to send {} to process {}",
                signal.name(),
                pid
            ),
            Err(DispatchError::Other(msg)) => format!(
                "Error sending {} to process {}: {}",
                signal.name(),
                pid,
                msg
            ),
        }
    }
}

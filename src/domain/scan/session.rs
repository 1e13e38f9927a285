//! Scan session state machine

use std::fmt;
use thiserror::Error;

/// Scan session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanState {
    #[default]
    Initializing,
    Running,
    Stopped,
    Failed,
}

impl ScanState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Initializing => "initializing",
            Self::Running => "running",
            Self::Stopped => "stopped",
            Self::Failed => "failed",
        }
    }

    /// Whether the session can make no further progress
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Stopped | Self::Failed)
    }
}

impl fmt::Display for ScanState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid scan transition: cannot {action} while in {current_state} state")]
pub struct InvalidScanTransition {
    pub current_state: ScanState,
    pub action: String,
}

/// Scan session entity.
/// Tracks the lifecycle of one camera scan.
///
/// State machine:
///   INITIALIZING -> RUNNING (start, camera acquired)
///   INITIALIZING -> FAILED  (fail, camera denied or unavailable)
///   RUNNING      -> STOPPED (stop, match dispatched or session torn down)
///   RUNNING      -> FAILED  (fail, capture broke mid-session)
///
/// STOPPED and FAILED are terminal; recovery is a new session.
#[derive(Debug, Default)]
pub struct ScanSession {
    state: ScanState,
}

impl ScanSession {
    /// Create a new session awaiting camera access
    pub fn new() -> Self {
        Self {
            state: ScanState::Initializing,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Check if frames may be sampled
    pub fn is_running(&self) -> bool {
        self.state == ScanState::Running
    }

    /// Transition from INITIALIZING to RUNNING
    pub fn start(&mut self) -> Result<(), InvalidScanTransition> {
        if self.state != ScanState::Initializing {
            return Err(InvalidScanTransition {
                current_state: self.state,
                action: "start scanning".to_string(),
            });
        }
        self.state = ScanState::Running;
        Ok(())
    }

    /// Transition from RUNNING to STOPPED
    pub fn stop(&mut self) -> Result<(), InvalidScanTransition> {
        if self.state != ScanState::Running {
            return Err(InvalidScanTransition {
                current_state: self.state,
                action: "stop scanning".to_string(),
            });
        }
        self.state = ScanState::Stopped;
        Ok(())
    }

    /// Transition from INITIALIZING or RUNNING to FAILED
    pub fn fail(&mut self) -> Result<(), InvalidScanTransition> {
        if self.state.is_terminal() {
            return Err(InvalidScanTransition {
                current_state: self.state,
                action: "fail".to_string(),
            });
        }
        self.state = ScanState::Failed;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_initializing() {
        let session = ScanSession::new();
        assert_eq!(session.state(), ScanState::Initializing);
        assert!(!session.is_running());
    }

    #[test]
    fn start_from_initializing() {
        let mut session = ScanSession::new();
        assert!(session.start().is_ok());
        assert!(session.is_running());
    }

    #[test]
    fn start_twice_fails() {
        let mut session = ScanSession::new();
        session.start().unwrap();

        let err = session.start().unwrap_err();
        assert_eq!(err.current_state, ScanState::Running);
        assert!(err.action.contains("start scanning"));
    }

    #[test]
    fn stop_from_running() {
        let mut session = ScanSession::new();
        session.start().unwrap();

        assert!(session.stop().is_ok());
        assert_eq!(session.state(), ScanState::Stopped);
    }

    #[test]
    fn stop_before_start_fails() {
        let mut session = ScanSession::new();

        let err = session.stop().unwrap_err();
        assert_eq!(err.current_state, ScanState::Initializing);
    }

    #[test]
    fn fail_from_initializing() {
        let mut session = ScanSession::new();
        assert!(session.fail().is_ok());
        assert_eq!(session.state(), ScanState::Failed);
    }

    #[test]
    fn fail_from_running() {
        let mut session = ScanSession::new();
        session.start().unwrap();
        assert!(session.fail().is_ok());
        assert_eq!(session.state(), ScanState::Failed);
    }

    #[test]
    fn terminal_states_reject_transitions() {
        let mut session = ScanSession::new();
        session.start().unwrap();
        session.stop().unwrap();

        assert!(session.start().is_err());
        assert!(session.stop().is_err());
        assert!(session.fail().is_err());

        let mut failed = ScanSession::new();
        failed.fail().unwrap();
        assert!(failed.start().is_err());
        assert!(failed.fail().is_err());
    }

    #[test]
    fn terminal_predicate() {
        assert!(!ScanState::Initializing.is_terminal());
        assert!(!ScanState::Running.is_terminal());
        assert!(ScanState::Stopped.is_terminal());
        assert!(ScanState::Failed.is_terminal());
    }

    #[test]
    fn state_display() {
        assert_eq!(ScanState::Initializing.to_string(), "initializing");
        assert_eq!(ScanState::Running.to_string(), "running");
        assert_eq!(ScanState::Stopped.to_string(), "stopped");
        assert_eq!(ScanState::Failed.to_string(), "failed");
    }

    #[test]
    fn error_display() {
        let err = InvalidScanTransition {
            current_state: ScanState::Stopped,
            action: "start scanning".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("start scanning"));
        assert!(msg.contains("stopped"));
    }
}

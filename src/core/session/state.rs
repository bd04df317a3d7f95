/// Lifecycle state of one session channel instance.
///
/// `Closed` and `Errored` are terminal; retrying a device requires a
/// fresh channel instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Open,
    Closed,
    Errored,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Closed | SessionState::Errored)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Connecting => write!(f, "Connecting"),
            SessionState::Open => write!(f, "Open"),
            SessionState::Closed => write!(f, "Closed"),
            SessionState::Errored => write!(f, "Errored"),
        }
    }
}

/// Explicit transition machine for the session lifecycle.
///
/// Every method returns `true` exactly when a transition occurred, so
/// the caller emits exactly one observable effect (transcript entry,
/// state display) per transition and none for refused ones. Refusal is
/// what implements cancellation: a connect completion arriving after a
/// local close finds the machine already terminal and is dropped.
#[derive(Debug)]
pub struct StateMachine {
    state: SessionState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Idle -> Connecting
    pub fn begin_connect(&mut self) -> bool {
        if self.state == SessionState::Idle {
            self.state = SessionState::Connecting;
            true
        } else {
            false
        }
    }

    /// Connecting -> Open
    pub fn connect_ok(&mut self) -> bool {
        if self.state == SessionState::Connecting {
            self.state = SessionState::Open;
            true
        } else {
            false
        }
    }

    /// Connecting -> Errored
    pub fn connect_err(&mut self) -> bool {
        if self.state == SessionState::Connecting {
            self.state = SessionState::Errored;
            true
        } else {
            false
        }
    }

    /// Open -> Closed (remote end or transport initiated the closure)
    pub fn remote_closed(&mut self) -> bool {
        if self.state == SessionState::Open {
            self.state = SessionState::Closed;
            true
        } else {
            false
        }
    }

    /// Connecting | Open -> Errored
    pub fn transport_error(&mut self) -> bool {
        if matches!(self.state, SessionState::Connecting | SessionState::Open) {
            self.state = SessionState::Errored;
            true
        } else {
            false
        }
    }

    /// Idle | Connecting | Open -> Closed; no-op once terminal
    pub fn close(&mut self) -> bool {
        if self.state.is_terminal() {
            false
        } else {
            self.state = SessionState::Closed;
            true
        }
    }

    /// Data delivery and sends are valid only while Open
    pub fn can_send(&self) -> bool {
        self.state == SessionState::Open
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

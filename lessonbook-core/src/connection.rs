use serde::Serialize;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of the single store connection held by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Connected => 2,
        }
    }
}

/// Shared, lock-free view of the connection state.
///
/// Cloning yields a handle onto the same state, so the store can move it
/// forward while health handlers read it.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTracker {
    state: Arc<AtomicU8>,
}

impl ConnectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConnectionState) {
        tracing::debug!(?state, "store connection state changed");
        self.state.store(state.as_u8(), Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_lifecycle() {
        let tracker = ConnectionTracker::new();
        assert_eq!(tracker.state(), ConnectionState::Disconnected);
        assert!(!tracker.is_connected());

        let handle = tracker.clone();
        handle.set(ConnectionState::Connecting);
        assert_eq!(tracker.state(), ConnectionState::Connecting);
        assert!(!tracker.is_connected());

        handle.set(ConnectionState::Connected);
        assert!(tracker.is_connected());

        handle.set(ConnectionState::Disconnected);
        assert!(!tracker.is_connected());
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&ConnectionState::Connected).unwrap();
        assert_eq!(json, "\"connected\"");
    }
}

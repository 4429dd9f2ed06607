//! Vendor device SDK abstraction
//!
//! The vendor SDK exposes a process-wide session. Here it is an explicitly
//! owned [`DeviceSession`] handed to the manager, so tests and the replay
//! binary can substitute [`MockSession`].

pub mod mock_session;
pub mod trace;
pub mod types;

pub use mock_session::MockSession;
pub use trace::{Trace, TraceError, TraceStep};
pub use types::*;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SdkError {
    #[error("Session failed to start (status {0})")]
    StartFailed(i32),

    #[error("Session is not started")]
    NotStarted,
}

/// Unified interface to the vendor controller session
pub trait DeviceSession {
    /// Whether the session is currently running
    fn is_started(&self) -> bool;

    /// Start the session
    fn start(&mut self, config: &SessionConfig) -> Result<(), SdkError>;

    /// Stop the session; a no-op when not started
    fn stop(&mut self);

    /// Begin queueing connect/disconnect/button callbacks
    fn subscribe(&mut self);

    /// Stop queueing callbacks
    fn unsubscribe(&mut self);

    /// Take every callback queued since the last call
    fn poll_events(&mut self) -> Vec<SdkEvent>;

    /// Look up a connected device by id
    fn device(&self, id: DeviceId) -> Option<DeviceInfo>;

    /// Look up the connected controller held in the given hand
    fn device_by_hand(&self, hand: Hand) -> Option<DeviceInfo>;

    /// All currently connected devices
    fn connected_devices(&self) -> Vec<DeviceInfo>;

    /// Freshest sample of every connected device
    fn samples(&self) -> Vec<RawSample>;
}
